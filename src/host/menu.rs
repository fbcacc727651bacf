// Application menu
//
// winit has no native menus, so the menu bar is a model of actions that
// are triggered through keyboard accelerators.

use crate::error::ConfigError;
use crate::platform::config::HotkeyConfig;
use winit::keyboard::{Key, ModifiersState, NamedKey};

/// Things the menu can do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Terminate the process
    Quit,
    /// Flip fullscreen on or off
    ToggleFullscreen,
}

/// Key that completes an accelerator
#[derive(Debug, Clone, PartialEq, Eq)]
enum HotkeyKey {
    Named(NamedKey),
    Character(char),
}

/// Keyboard accelerator such as `Ctrl+Q` or `F11`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotkey {
    modifiers: ModifiersState,
    key: HotkeyKey,
}

impl Hotkey {
    /// Parse an accelerator string (`"Ctrl+Q"`, `"Alt+Enter"`, `"F11"`)
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidHotkey(s.to_string());

        let mut modifiers = ModifiersState::empty();
        let mut parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let key = parts.pop().filter(|k| !k.is_empty()).ok_or_else(invalid)?;

        for part in parts {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers |= ModifiersState::CONTROL,
                "alt" => modifiers |= ModifiersState::ALT,
                "shift" => modifiers |= ModifiersState::SHIFT,
                "super" | "cmd" | "logo" => modifiers |= ModifiersState::SUPER,
                _ => return Err(invalid()),
            }
        }

        let key = match string_to_named_key(key) {
            Some(named) => HotkeyKey::Named(named),
            None => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => HotkeyKey::Character(c.to_ascii_lowercase()),
                    _ => return Err(invalid()),
                }
            }
        };

        Ok(Self { modifiers, key })
    }

    /// Check whether a key press with the given modifiers triggers this accelerator
    pub fn matches(&self, key: &Key, modifiers: ModifiersState) -> bool {
        if modifiers != self.modifiers {
            return false;
        }

        match (&self.key, key) {
            (HotkeyKey::Named(expected), Key::Named(named)) => expected == named,
            (HotkeyKey::Character(expected), Key::Character(chars)) => {
                let mut chars = chars.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => c.to_ascii_lowercase() == *expected,
                    _ => false,
                }
            }
            _ => false,
        }
    }
}

/// A single menu entry
#[derive(Debug, Clone)]
pub struct Action {
    pub label: &'static str,
    pub kind: MenuAction,
    pub shortcut: Hotkey,
    checkable: bool,
    checked: bool,
}

impl Action {
    pub fn new(label: &'static str, kind: MenuAction, shortcut: Hotkey) -> Self {
        Self {
            label,
            kind,
            shortcut,
            checkable: false,
            checked: false,
        }
    }

    /// Make this action a checkable toggle
    pub fn checkable(mut self, checked: bool) -> Self {
        self.checkable = true;
        self.checked = checked;
        self
    }

    pub fn is_checkable(&self) -> bool {
        self.checkable
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        if self.checkable {
            self.checked = checked;
        }
    }
}

/// A named group of actions
#[derive(Debug, Clone)]
pub struct Menu {
    pub name: &'static str,
    pub actions: Vec<Action>,
}

/// The window's menu bar: "DOOM" (Quit) and "View" (Fullscreen)
#[derive(Debug, Clone)]
pub struct MenuBar {
    menus: Vec<Menu>,
}

impl MenuBar {
    /// Build the standard menu bar from the configured accelerators
    pub fn new(hotkeys: &HotkeyConfig, fullscreen: bool) -> Result<Self, ConfigError> {
        let quit = Action::new("Quit", MenuAction::Quit, Hotkey::parse(&hotkeys.quit)?);
        let toggle = Action::new(
            "Fullscreen",
            MenuAction::ToggleFullscreen,
            Hotkey::parse(&hotkeys.fullscreen)?,
        )
        .checkable(fullscreen);

        Ok(Self {
            menus: vec![
                Menu {
                    name: "DOOM",
                    actions: vec![quit],
                },
                Menu {
                    name: "View",
                    actions: vec![toggle],
                },
            ],
        })
    }

    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    /// Find the action whose accelerator matches a key press
    pub fn find_shortcut(&self, key: &Key, modifiers: ModifiersState) -> Option<&Action> {
        self.menus
            .iter()
            .flat_map(|menu| &menu.actions)
            .find(|action| action.shortcut.matches(key, modifiers))
    }

    /// Look up an action by kind
    pub fn action_mut(&mut self, kind: MenuAction) -> Option<&mut Action> {
        self.menus
            .iter_mut()
            .flat_map(|menu| menu.actions.iter_mut())
            .find(|action| action.kind == kind)
    }

    /// Flip a checkable action, returning its new state
    pub fn toggle(&mut self, kind: MenuAction) -> Option<bool> {
        let action = self.action_mut(kind)?;
        if !action.is_checkable() {
            return None;
        }
        let checked = !action.is_checked();
        action.set_checked(checked);
        Some(checked)
    }
}

/// Convert string to a named key usable in accelerators
fn string_to_named_key(s: &str) -> Option<NamedKey> {
    let key = match s.to_ascii_lowercase().as_str() {
        "f1" => NamedKey::F1,
        "f2" => NamedKey::F2,
        "f3" => NamedKey::F3,
        "f4" => NamedKey::F4,
        "f5" => NamedKey::F5,
        "f6" => NamedKey::F6,
        "f7" => NamedKey::F7,
        "f8" => NamedKey::F8,
        "f9" => NamedKey::F9,
        "f10" => NamedKey::F10,
        "f11" => NamedKey::F11,
        "f12" => NamedKey::F12,
        "enter" | "return" => NamedKey::Enter,
        "escape" | "esc" => NamedKey::Escape,
        "tab" => NamedKey::Tab,
        "space" => NamedKey::Space,
        "backspace" => NamedKey::Backspace,
        "pause" => NamedKey::Pause,
        "insert" => NamedKey::Insert,
        "delete" => NamedKey::Delete,
        "home" => NamedKey::Home,
        "end" => NamedKey::End,
        "pageup" => NamedKey::PageUp,
        "pagedown" => NamedKey::PageDown,
        _ => return None,
    };
    Some(key)
}
