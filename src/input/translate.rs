// Keyboard translation
//
// Maps winit's logical keys onto the engine's single-byte key codes.

use crate::keys::*;
use winit::keyboard::{Key, NamedKey};

/// Translates window key events into engine key codes
///
/// The translation is a pure function of the key and its produced text.
/// Alt is only mapped when the later keymap revision is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyTranslator {
    map_alt: bool,
}

impl KeyTranslator {
    /// Create a translator
    ///
    /// # Arguments
    /// * `map_alt` - Map Alt to `KEY_RALT` (strafe modifier)
    pub fn new(map_alt: bool) -> Self {
        Self { map_alt }
    }

    /// Whether Alt is mapped to `KEY_RALT`
    pub fn maps_alt(&self) -> bool {
        self.map_alt
    }

    /// Translate a key event to an engine key code
    ///
    /// # Arguments
    /// * `key` - Logical key reported by the window
    /// * `text` - Text produced by the key, if any
    ///
    /// # Returns
    /// The engine key code, or 0 for keys the engine does not know
    pub fn translate(&self, key: &Key, text: Option<&str>) -> u8 {
        match key {
            Key::Named(NamedKey::Enter) => KEY_ENTER,
            Key::Named(NamedKey::Escape) => KEY_ESCAPE,
            Key::Named(NamedKey::ArrowLeft) => KEY_LEFTARROW,
            Key::Named(NamedKey::ArrowRight) => KEY_RIGHTARROW,
            Key::Named(NamedKey::ArrowUp) => KEY_UPARROW,
            Key::Named(NamedKey::ArrowDown) => KEY_DOWNARROW,
            Key::Named(NamedKey::Control) => KEY_FIRE,
            Key::Named(NamedKey::Space) => KEY_USE,
            Key::Named(NamedKey::Shift) => KEY_RSHIFT,
            Key::Named(NamedKey::Alt) if self.map_alt => KEY_RALT,
            // Keys whose press text is a control character; winit sends
            // no text on release, so they are mapped by name
            Key::Named(NamedKey::Tab) => KEY_TAB,
            Key::Named(NamedKey::Backspace) => KEY_BACKSPACE,
            Key::Named(NamedKey::Delete) => KEY_BACKSPACE,
            Key::Character(chars) => chars
                .bytes()
                .next()
                .map(|b| b.to_ascii_lowercase())
                .unwrap_or(KEY_NONE),
            // Last resort: only presses carry text, so these may not pair up
            _ => text
                .and_then(|t| t.bytes().next())
                .map(|b| b.to_ascii_lowercase())
                .unwrap_or(KEY_NONE),
        }
    }
}

impl Default for KeyTranslator {
    fn default() -> Self {
        Self::new(true)
    }
}
