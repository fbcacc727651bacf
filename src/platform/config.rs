// Configuration management
//
// Handles platform settings and their persistence as TOML.

use crate::display::{PixelFormat, Size};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Default configuration file path
pub const CONFIG_FILE: &str = "doomgeneric.toml";

/// Engine framebuffer resolution, fixed when the engine is compiled
///
/// `build.rs` takes these from the `DOOMGENERIC_RESX`/`DOOMGENERIC_RESY`
/// environment variables (640x400 when unset).
pub const DOOMGENERIC_RESX: u32 = parse_dimension(env!("DOOMGENERIC_RESX"));
pub const DOOMGENERIC_RESY: u32 = parse_dimension(env!("DOOMGENERIC_RESY"));

const fn parse_dimension(s: &str) -> u32 {
    let bytes = s.as_bytes();
    let mut value = 0u32;
    let mut i = 0;
    while i < bytes.len() {
        assert!(bytes[i].is_ascii_digit(), "resolution must be a decimal number");
        value = value * 10 + (bytes[i] - b'0') as u32;
        i += 1;
    }
    value
}

/// How the window gets repainted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepaintMode {
    /// The host requests a repaint on its own timer, independent of the
    /// engine; `DrawFrame` only pumps the event loop
    Timer,
    /// `DrawFrame` repaints synchronously and does not pump; the engine
    /// pumps through `PumpEventLoop`
    PerFrame,
}

/// Platform configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Video settings
    pub video: VideoConfig,

    /// Window settings
    pub window: WindowConfig,

    /// Input settings
    pub input: InputConfig,

    /// Menu accelerators
    pub hotkeys: HotkeyConfig,
}

/// Video configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Engine framebuffer width; not read from or written to the file
    #[serde(skip)]
    pub width: u32,

    /// Engine framebuffer height; not read from or written to the file
    #[serde(skip)]
    pub height: u32,

    /// Initial window size as a multiple of the framebuffer (1-8)
    pub scale: u32,

    /// Start in fullscreen
    pub fullscreen: bool,

    /// Repaint strategy
    pub repaint: RepaintMode,

    /// Timer repaint interval in milliseconds
    pub repaint_interval_ms: u64,

    /// Engine framebuffer pixel layout
    pub pixel_format: PixelFormat,
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Title shown until the engine sets its own
    pub title: String,

    /// Optional PNG window icon
    pub icon: Option<PathBuf>,
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Map Alt to the engine's strafe modifier
    pub map_alt: bool,

    /// Enable gamepad input
    pub gamepad: bool,

    /// Gamepad button name -> engine key name; empty keeps the defaults
    pub gamepad_bindings: BTreeMap<String, String>,
}

/// Hotkey configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HotkeyConfig {
    /// Quit (default: Ctrl+Q)
    pub quit: String,

    /// Toggle fullscreen (default: F11)
    pub fullscreen: String,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            width: DOOMGENERIC_RESX,
            height: DOOMGENERIC_RESY,
            scale: 2,
            fullscreen: false,
            repaint: RepaintMode::Timer,
            repaint_interval_ms: 33,
            pixel_format: PixelFormat::Rgb32,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "DOOM".to_string(),
            icon: None,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            map_alt: true,
            gamepad: true,
            gamepad_bindings: BTreeMap::new(),
        }
    }
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            quit: "Ctrl+Q".to_string(),
            fullscreen: "F11".to_string(),
        }
    }
}

impl PlatformConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window scale factor
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.video.scale = scale.clamp(1, 8);
        self
    }

    /// Set the repaint strategy
    pub fn with_repaint(mut self, repaint: RepaintMode) -> Self {
        self.video.repaint = repaint;
        self
    }

    /// Set the engine framebuffer layout
    pub fn with_pixel_format(mut self, format: PixelFormat) -> Self {
        self.video.pixel_format = format;
        self
    }

    /// Set the engine framebuffer resolution
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.video.width = width;
        self.video.height = height;
        self
    }

    /// Start in fullscreen
    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.video.fullscreen = fullscreen;
        self
    }

    /// Engine framebuffer resolution
    pub fn resolution(&self) -> Size {
        Size::new(self.video.width, self.video.height)
    }

    /// Initial window size in pixels
    pub fn window_size(&self) -> Size {
        let scale = self.video.scale.clamp(1, 8);
        Size::new(self.video.width * scale, self.video.height * scale)
    }

    /// Interval between timer-driven repaints
    pub fn repaint_interval(&self) -> Duration {
        Duration::from_millis(self.video.repaint_interval_ms.max(1))
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Try to load configuration from file, or create default if it doesn't exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load_from_file(path) {
            Ok(config) => {
                info!("loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                warn!("could not load config ({}), using defaults", e);
                let config = Self::new();
                // Try to save the default config, but don't fail if we can't
                match config.save_to_file(path) {
                    Ok(()) => info!("created default configuration {}", path.display()),
                    Err(e) => warn!("could not save default config: {}", e),
                }
                config
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlatformConfig::default();
        assert_eq!(config.resolution(), Size::new(DOOMGENERIC_RESX, DOOMGENERIC_RESY));
        assert_eq!(config.video.scale, 2);
        assert_eq!(config.video.repaint, RepaintMode::Timer);
        assert_eq!(config.video.repaint_interval_ms, 33);
        assert_eq!(config.video.pixel_format, PixelFormat::Rgb32);
        assert!(config.input.map_alt);
        assert_eq!(config.hotkeys.quit, "Ctrl+Q");
        assert_eq!(config.hotkeys.fullscreen, "F11");
    }

    #[test]
    fn test_window_size_is_scaled() {
        let config = PlatformConfig::new().with_resolution(640, 400);
        assert_eq!(config.window_size(), Size::new(1280, 800));

        let config = PlatformConfig::new().with_scale(100);
        assert_eq!(config.video.scale, 8);
        let config = PlatformConfig::new().with_resolution(640, 400).with_scale(0);
        assert_eq!(config.window_size(), Size::new(640, 400));
    }

    #[test]
    fn test_repaint_interval() {
        let mut config = PlatformConfig::new();
        assert_eq!(config.repaint_interval(), Duration::from_millis(33));
        config.video.repaint_interval_ms = 0;
        assert_eq!(config.repaint_interval(), Duration::from_millis(1));
    }

    #[test]
    fn test_config_serialization() {
        let config = PlatformConfig::new()
            .with_repaint(RepaintMode::PerFrame)
            .with_pixel_format(PixelFormat::Indexed8);
        let toml_str = toml::to_string(&config).expect("Failed to serialize");
        assert!(toml_str.contains("per_frame"));
        assert!(toml_str.contains("indexed8"));

        let deserialized: PlatformConfig =
            toml::from_str(&toml_str).expect("Failed to deserialize");
        assert_eq!(deserialized.video.repaint, RepaintMode::PerFrame);
        assert_eq!(deserialized.video.pixel_format, PixelFormat::Indexed8);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml_str = r#"
            [video]
            scale = 3
            repaint = "per_frame"

            [input.gamepad_bindings]
            South = "use"
        "#;

        let config: PlatformConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.video.scale, 3);
        assert_eq!(config.video.width, DOOMGENERIC_RESX);
        assert_eq!(config.video.repaint, RepaintMode::PerFrame);
        assert_eq!(config.window.title, "DOOM");
        assert_eq!(config.input.gamepad_bindings["South"], "use");
    }

    #[test]
    fn test_resolution_is_not_configurable() {
        let toml_str = r#"
            [video]
            width = 1280
            height = 800
            scale = 1
        "#;

        let config: PlatformConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.resolution(), Size::new(DOOMGENERIC_RESX, DOOMGENERIC_RESY));
        assert_eq!(config.video.scale, 1);

        let saved = toml::to_string(&PlatformConfig::new()).unwrap();
        assert!(!saved.contains("width"));
        assert!(!saved.contains("height"));
    }

    #[test]
    fn test_parse_dimension() {
        assert_eq!(parse_dimension("640"), 640);
        assert_eq!(parse_dimension("0"), 0);
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("dg_config_{}.toml", std::process::id()));
        let config = PlatformConfig::new().with_scale(4).with_fullscreen(true);
        config.save_to_file(&path).unwrap();

        let loaded = PlatformConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.video.scale, 4);
        assert!(loaded.video.fullscreen);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(matches!(
            PlatformConfig::load_from_file("no/such/config.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
