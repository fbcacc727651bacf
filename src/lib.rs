// doomgeneric platform layer
// Window, input and timing hooks for the doomgeneric engine, built on winit and pixels

// Public modules
pub mod display;
pub mod error;
#[cfg(feature = "engine")]
pub mod ffi;
pub mod host;
pub mod input;
pub mod keys;
pub mod logging;
pub mod platform;

// Re-export main types for convenience
pub use display::{IconImage, Palette, PixelFormat, Rect, Rgb, Size, Surface, PALETTE_SIZE};
pub use error::{ConfigError, IconError, PlatformError, Result, SurfaceError};
pub use host::{Backend, DoomView, KeyInput, MenuAction, MenuBar, Widget, WindowState, WinitBackend};
#[cfg(feature = "gamepad")]
pub use input::{GamepadInput, GamepadMapping};
pub use input::{KeyEvent, KeyQueue, KeyTranslator, KEY_QUEUE_SIZE};
pub use platform::{Clock, HookState, Platform, PlatformConfig, RepaintMode};
