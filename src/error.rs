// Error types for the platform layer

use std::io;
use thiserror::Error;

/// Errors raised while wrapping the engine's framebuffer
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("framebuffer pointer is null")]
    NullBuffer,

    #[error("framebuffer has zero size ({width}x{height})")]
    EmptySize { width: u32, height: u32 },

    #[error("stride {stride} is smaller than a {row_bytes}-byte row")]
    StrideTooSmall { stride: usize, row_bytes: usize },
}

/// Errors raised while loading the window icon
#[derive(Error, Debug)]
pub enum IconError {
    #[error("failed to open icon: {0}")]
    Io(#[from] io::Error),

    #[error("failed to decode icon: {0}")]
    Decode(#[from] png::DecodingError),

    #[error("unsupported icon colour type {0:?}")]
    UnsupportedColor(png::ColorType),

    #[error("invalid icon: {0}")]
    BadIcon(#[from] winit::window::BadIcon),
}

/// Errors raised while loading or saving configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to access config file: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("unknown key name: {0}")]
    UnknownKey(String),

    #[error("unknown gamepad button: {0}")]
    UnknownButton(String),

    #[error("invalid hotkey: {0}")]
    InvalidHotkey(String),
}

/// Errors raised by the engine hook layer and its window backend
#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("platform is already initialised")]
    AlreadyInitialized,

    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("window was not created during startup")]
    WindowUnavailable,

    #[error("failed to create pixel buffer: {0}")]
    Pixels(#[from] pixels::Error),

    #[error("failed to resize pixel buffer: {0}")]
    Texture(#[from] pixels::TextureError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, PlatformError>;
