// Links the prebuilt doomgeneric engine when the `engine` feature is on.
//
// Point DOOMGENERIC_LIB_DIR at the directory holding libdoomgeneric.a.
// DOOMGENERIC_RESX/DOOMGENERIC_RESY must match the values the engine was
// compiled with; they size the framebuffer view.

use std::env;

fn resolution(var: &str, default: u32) {
    println!("cargo:rerun-if-env-changed={}", var);
    let value = match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .unwrap_or_else(|_| panic!("{} must be a positive integer, got {:?}", var, value)),
        Err(_) => default,
    };
    assert!(value > 0, "{} must be a positive integer", var);
    println!("cargo:rustc-env={}={}", var, value);
}

fn main() {
    println!("cargo:rerun-if-env-changed=DOOMGENERIC_LIB_DIR");

    resolution("DOOMGENERIC_RESX", 640);
    resolution("DOOMGENERIC_RESY", 400);

    if env::var_os("CARGO_FEATURE_ENGINE").is_none() {
        return;
    }

    if let Some(dir) = env::var_os("DOOMGENERIC_LIB_DIR") {
        println!("cargo:rustc-link-search=native={}", dir.to_string_lossy());
    }
    println!("cargo:rustc-link-lib=static=doomgeneric");
}
