// Window controls - key dispatch and menu state without a live window
//
// Every key goes to the view first. Menu accelerators run afterwards on the
// same event, so a shortcut key still reaches the engine. The window only
// has to apply the returned command.

use super::menu::{MenuAction, MenuBar};
use super::view::{DoomView, KeyInput, Widget};
use super::WindowState;
use tracing::debug;
use winit::keyboard::ModifiersState;

/// Change the real window has to make after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowCommand {
    /// Terminate the process
    Quit,
    /// Enter or leave fullscreen
    SetFullscreen(bool),
}

/// The engine view, the menu bar and the window state they share
#[derive(Debug)]
pub struct Controls {
    view: DoomView,
    menu: MenuBar,
    state: WindowState,
}

impl Controls {
    pub fn new(view: DoomView, menu: MenuBar, state: WindowState) -> Self {
        Self { view, menu, state }
    }

    pub fn view(&self) -> &DoomView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut DoomView {
        &mut self.view
    }

    pub fn state(&self) -> &WindowState {
        &self.state
    }

    /// Deliver a key to the view, then to the menu accelerators
    ///
    /// # Arguments
    /// * `input` - The key event
    /// * `repeat` - Whether this is an auto-repeat of a held key
    /// * `modifiers` - Modifier state at the time of the event
    pub fn handle_key(
        &mut self,
        input: &KeyInput,
        repeat: bool,
        modifiers: ModifiersState,
    ) -> Option<WindowCommand> {
        if input.pressed {
            self.view.keydown_event(input);
        } else {
            self.view.keyup_event(input);
        }

        if !input.pressed || repeat {
            return None;
        }

        let action = self.menu.find_shortcut(&input.key, modifiers)?;
        debug!("menu shortcut: {}", action.label);
        let kind = action.kind;
        self.run_action(kind)
    }

    fn run_action(&mut self, action: MenuAction) -> Option<WindowCommand> {
        match action {
            MenuAction::Quit => Some(WindowCommand::Quit),
            MenuAction::ToggleFullscreen => {
                let checked = self.menu.toggle(MenuAction::ToggleFullscreen)?;
                self.set_fullscreen(checked)
                    .then_some(WindowCommand::SetFullscreen(checked))
            }
        }
    }

    /// Request fullscreen, returning whether the window must change
    ///
    /// The menu check always follows the requested state.
    pub fn set_fullscreen(&mut self, fullscreen: bool) -> bool {
        self.check_fullscreen(fullscreen);
        self.state.set_fullscreen(fullscreen)
    }

    /// Adopt a fullscreen change the window made on its own
    pub fn sync_fullscreen(&mut self, fullscreen: bool) {
        if self.state.set_fullscreen(fullscreen) {
            debug!("fullscreen changed outside the menu: {}", fullscreen);
        }
        self.check_fullscreen(fullscreen);
    }

    /// Record a new title, returning whether it changed
    pub fn set_title(&mut self, title: &str) -> bool {
        self.state.set_title(title)
    }

    fn check_fullscreen(&mut self, fullscreen: bool) {
        if let Some(action) = self.menu.action_mut(MenuAction::ToggleFullscreen) {
            action.set_checked(fullscreen);
        }
    }
}
