// doomgeneric-winit - Main Entry Point
//
// Loads the platform configuration, installs it for the engine hooks and
// hands control to the engine's own tick loop.

use clap::{Parser, ValueEnum};
use doomgeneric_winit::ffi;
use doomgeneric_winit::logging;
use doomgeneric_winit::platform::config::CONFIG_FILE;
use doomgeneric_winit::{PixelFormat, PlatformConfig, RepaintMode};
use std::ffi::{c_char, c_int, CString};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "doomgeneric-winit")]
#[command(about = "Run doomgeneric in a winit window", long_about = None)]
struct Cli {
    /// Platform configuration file
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Window scale factor (1-8)
    #[arg(long)]
    scale: Option<u32>,

    /// Start in fullscreen
    #[arg(long)]
    fullscreen: bool,

    /// How the window is repainted
    #[arg(long, value_enum)]
    repaint: Option<RepaintArg>,

    /// Framebuffer pixel format
    #[arg(long, value_enum)]
    pixel_format: Option<PixelFormatArg>,

    /// Arguments passed through to the engine (e.g. -iwad doom1.wad)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    engine_args: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum RepaintArg {
    Timer,
    PerFrame,
}

#[derive(Clone, Copy, ValueEnum)]
enum PixelFormatArg {
    Rgb32,
    Indexed8,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init();

    let mut config = PlatformConfig::load_or_default(&cli.config);
    if let Some(scale) = cli.scale {
        config = config.with_scale(scale);
    }
    if cli.fullscreen {
        config = config.with_fullscreen(true);
    }
    if let Some(repaint) = cli.repaint {
        config = config.with_repaint(match repaint {
            RepaintArg::Timer => RepaintMode::Timer,
            RepaintArg::PerFrame => RepaintMode::PerFrame,
        });
    }
    if let Some(format) = cli.pixel_format {
        config = config.with_pixel_format(match format {
            PixelFormatArg::Rgb32 => PixelFormat::Rgb32,
            PixelFormatArg::Indexed8 => PixelFormat::Indexed8,
        });
    }

    info!("doomgeneric-winit v{}", env!("CARGO_PKG_VERSION"));
    ffi::install(config);

    // argv[0] followed by the engine arguments; the strings must outlive the engine
    let args = std::iter::once(env!("CARGO_PKG_NAME").to_string())
        .chain(cli.engine_args)
        .map(CString::new)
        .collect::<Result<Vec<_>, _>>()?;
    let mut argv: Vec<*mut c_char> = args.iter().map(|arg| arg.as_ptr() as *mut c_char).collect();
    argv.push(std::ptr::null_mut());

    // SAFETY: argv holds argc valid NUL-terminated strings followed by NULL
    unsafe {
        ffi::doomgeneric_Create(args.len() as c_int, argv.as_mut_ptr());
        loop {
            ffi::doomgeneric_Tick();
        }
    }
}
