// C entry points for the doomgeneric engine
//
// The engine calls these `DG_*` functions by name from its own main loop.
// They all run on the engine thread, so the platform context lives in a
// thread-local slot for the rest of the process.

use crate::display::{Rgb, Surface, PALETTE_SIZE};
use crate::host::WinitBackend;
use crate::platform::config::{DOOMGENERIC_RESX, DOOMGENERIC_RESY};
use crate::platform::{Platform, PlatformConfig};
use std::cell::RefCell;
use std::ffi::{c_char, c_int, CStr};
use tracing::error;

/// Palette entry layout used by the engine (`struct color`)
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct DgColor {
    pub b: u8,
    pub g: u8,
    pub r: u8,
    pub a: u8,
}

extern "C" {
    /// Framebuffer allocated by the engine before it calls `DG_Init`
    static mut DG_ScreenBuffer: *mut u32;

    pub fn doomgeneric_Create(argc: c_int, argv: *mut *mut c_char);
    pub fn doomgeneric_Tick();
}

thread_local! {
    static PLATFORM: RefCell<Option<Platform<WinitBackend>>> = const { RefCell::new(None) };
}

/// Set the configuration used by `DG_Init`
///
/// Must be called before the engine starts; without it the defaults are used.
/// The resolution is always the one the engine was compiled with.
pub fn install(config: PlatformConfig) {
    let config = config.with_resolution(DOOMGENERIC_RESX, DOOMGENERIC_RESY);
    PLATFORM.with(|slot| *slot.borrow_mut() = Some(Platform::new(config)));
}

fn with_platform<R>(f: impl FnOnce(&mut Platform<WinitBackend>) -> R) -> R {
    PLATFORM.with(|slot| {
        let mut slot = slot.borrow_mut();
        let platform = slot.get_or_insert_with(|| Platform::new(PlatformConfig::default()));
        f(platform)
    })
}

#[no_mangle]
pub extern "C" fn DG_Init() {
    with_platform(|platform| {
        let size = platform.config().resolution();
        let format = platform.config().video.pixel_format;
        let stride = size.width as usize * format.bytes_per_pixel();

        // SAFETY: the engine allocated the buffer before calling DG_Init and
        // keeps it for the lifetime of the process
        let surface = unsafe {
            let buffer = std::ptr::addr_of!(DG_ScreenBuffer).read();
            Surface::wrap(buffer.cast(), size.width, size.height, format, stride)
        };

        let result = surface
            .map_err(Into::into)
            .and_then(|surface| platform.init(surface));
        if let Err(e) = result {
            error!("DG_Init failed: {}", e);
            std::process::exit(1);
        }
    });
}

#[no_mangle]
pub extern "C" fn DG_DrawFrame() {
    with_platform(|platform| platform.draw_frame());
}

#[no_mangle]
pub extern "C" fn DG_PumpEventLoop() {
    with_platform(|platform| platform.pump_event_loop());
}

#[no_mangle]
pub extern "C" fn DG_SleepMs(ms: u32) {
    with_platform(|platform| platform.sleep_ms(ms));
}

#[no_mangle]
pub extern "C" fn DG_GetTicksMs() -> u32 {
    with_platform(|platform| platform.ticks_ms())
}

/// Returns 1 and fills `pressed`/`key` if an event was queued, 0 otherwise
///
/// # Safety
/// `pressed` and `key` must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn DG_GetKey(pressed: *mut c_int, key: *mut u8) -> c_int {
    if pressed.is_null() || key.is_null() {
        return 0;
    }

    match with_platform(|platform| platform.get_key()) {
        Some(event) => {
            *pressed = event.pressed as c_int;
            *key = event.code;
            1
        }
        None => 0,
    }
}

/// # Safety
/// `title` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn DG_SetWindowTitle(title: *const c_char) {
    if title.is_null() {
        return;
    }
    let title = CStr::from_ptr(title).to_string_lossy();
    with_platform(|platform| platform.set_window_title(&title));
}

/// # Safety
/// `colors` must be null or point to 256 palette entries.
#[no_mangle]
pub unsafe extern "C" fn DG_SetPalette(colors: *const DgColor) {
    if colors.is_null() {
        return;
    }

    let entries = std::slice::from_raw_parts(colors, PALETTE_SIZE);
    let mut palette = [Rgb::default(); PALETTE_SIZE];
    for (dst, src) in palette.iter_mut().zip(entries) {
        *dst = Rgb::new(src.r, src.g, src.b);
    }

    with_platform(|platform| platform.set_palette(&palette));
}

#[no_mangle]
pub extern "C" fn DG_SetFullscreen(fullscreen: bool) {
    with_platform(|platform| platform.set_fullscreen(fullscreen));
}
