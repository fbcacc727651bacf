// Display module - presents the engine framebuffer
//
// This module provides:
// - A zero-copy surface over the engine's framebuffer (RGB32 or indexed)
// - The 256-entry palette used by indexed framebuffers
// - Nearest-neighbour scaling into the window's RGBA buffer
// - Window icon loading

pub mod icon;
pub mod palette;
pub mod surface;

pub use icon::{load_png, IconImage};
pub use palette::{Palette, Rgb, PALETTE_SIZE};
pub use surface::{PixelFormat, Rect, Size, Surface};
