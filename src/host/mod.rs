// Host module - the window the engine runs in
//
// This module provides:
// - The `Widget` callback interface and the engine's `DoomView`
// - The menu bar (Quit, Fullscreen) and its accelerators
// - Key dispatch shared by the view and the menu
// - The `Backend` trait the hook layer drives
// - A winit + pixels backend

pub mod controls;
pub mod menu;
pub mod view;
pub mod window;

pub use controls::{Controls, WindowCommand};
pub use menu::{Hotkey, MenuAction, MenuBar};
pub use view::{DoomView, KeyInput, Widget};
pub use window::WinitBackend;

use crate::error::Result;
use crate::platform::config::PlatformConfig;

/// Title and fullscreen state of the host window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowState {
    title: String,
    fullscreen: bool,
}

impl WindowState {
    pub fn new(title: &str, fullscreen: bool) -> Self {
        Self {
            title: title.to_string(),
            fullscreen,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Record a new title, returning whether it changed
    pub fn set_title(&mut self, title: &str) -> bool {
        if self.title == title {
            return false;
        }
        self.title = title.to_string();
        true
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Record the fullscreen flag, returning whether the window must change
    pub fn set_fullscreen(&mut self, fullscreen: bool) -> bool {
        if self.fullscreen == fullscreen {
            return false;
        }
        self.fullscreen = fullscreen;
        true
    }
}

/// Windowing system seen from the engine hook layer
///
/// Everything runs on the engine thread. Input handlers run inside
/// [`Backend::pump`] and push into the view's key queue.
pub trait Backend: Sized {
    /// Create the window and install the view as its main widget
    fn create(config: &PlatformConfig, view: DoomView) -> Result<Self>;

    /// Process every pending window event once, without blocking
    fn pump(&mut self);

    /// Paint the view right now
    fn repaint(&mut self);

    fn set_title(&mut self, title: &str);

    fn set_fullscreen(&mut self, fullscreen: bool);

    fn window_state(&self) -> &WindowState;

    fn view(&self) -> &DoomView;

    fn view_mut(&mut self) -> &mut DoomView;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fullscreen_is_idempotent() {
        let mut state = WindowState::new("DOOM", false);
        assert!(state.set_fullscreen(true));
        assert!(!state.set_fullscreen(true));
        assert!(state.is_fullscreen());
        assert!(state.set_fullscreen(false));
    }

    #[test]
    fn test_title_change_detection() {
        let mut state = WindowState::new("DOOM", false);
        assert!(!state.set_title("DOOM"));
        assert!(state.set_title("DOOM Shareware"));
        assert_eq!(state.title(), "DOOM Shareware");
    }
}
