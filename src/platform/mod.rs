// Platform module - the hooks the engine calls every tick
//
// `Platform` is the single context behind the engine's `DG_*` entry points.
// It starts uninitialised, becomes running after `init`, and is only torn
// down by process exit.

pub mod clock;
pub mod config;

pub use clock::Clock;
pub use config::{PlatformConfig, RepaintMode};

use crate::display::{Rgb, Surface, PALETTE_SIZE};
use crate::error::{PlatformError, Result};
use crate::host::{Backend, DoomView};
use crate::input::{KeyEvent, KeyTranslator};
use tracing::{debug, info};

/// Lifecycle of the hook layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookState {
    /// Before `init`
    Uninitialized,
    /// Window exists, engine is ticking
    Running,
}

/// Engine hook context
///
/// One instance lives for the whole process. Every hook takes it
/// explicitly; the C entry points keep it in a thread-local slot.
pub struct Platform<B: Backend> {
    config: PlatformConfig,
    clock: Clock,
    backend: Option<B>,
}

impl<B: Backend> Platform<B> {
    /// Create an uninitialised platform
    pub fn new(config: PlatformConfig) -> Self {
        Self {
            config,
            clock: Clock::new(),
            backend: None,
        }
    }

    pub fn config(&self) -> &PlatformConfig {
        &self.config
    }

    pub fn state(&self) -> HookState {
        if self.backend.is_some() {
            HookState::Running
        } else {
            HookState::Uninitialized
        }
    }

    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    pub fn backend_mut(&mut self) -> Option<&mut B> {
        self.backend.as_mut()
    }

    /// Create the window around the engine framebuffer (`DG_Init`)
    pub fn init(&mut self, surface: Surface) -> Result<()> {
        if self.backend.is_some() {
            return Err(PlatformError::AlreadyInitialized);
        }

        let size = surface.size();
        info!(
            "initialising {}x{} {:?} framebuffer",
            size.width,
            size.height,
            surface.format()
        );

        let translator = KeyTranslator::new(self.config.input.map_alt);
        let view = DoomView::new(surface, translator);
        self.backend = Some(B::create(&self.config, view)?);
        Ok(())
    }

    /// Per-frame hook (`DG_DrawFrame`)
    ///
    /// With timer repaint this pumps the event loop once. With per-frame
    /// repaint it paints synchronously and leaves the event loop alone.
    pub fn draw_frame(&mut self) {
        let repaint = self.config.video.repaint;
        let Some(backend) = &mut self.backend else {
            debug!("DrawFrame before Init ignored");
            return;
        };

        match repaint {
            RepaintMode::Timer => backend.pump(),
            RepaintMode::PerFrame => backend.repaint(),
        }
    }

    /// Drain pending window events once without blocking (`DG_PumpEventLoop`)
    pub fn pump_event_loop(&mut self) {
        match &mut self.backend {
            Some(backend) => backend.pump(),
            None => debug!("PumpEventLoop before Init ignored"),
        }
    }

    /// Block the engine thread (`DG_SleepMs`)
    pub fn sleep_ms(&self, ms: u32) {
        self.clock.sleep_ms(ms);
    }

    /// Milliseconds since an arbitrary epoch (`DG_GetTicksMs`)
    pub fn ticks_ms(&self) -> u32 {
        self.clock.ticks_ms()
    }

    /// Oldest queued key event (`DG_GetKey`)
    pub fn get_key(&mut self) -> Option<KeyEvent> {
        self.backend.as_mut()?.view_mut().pop_key()
    }

    /// Set the window title (`DG_SetWindowTitle`); no-op before init
    pub fn set_window_title(&mut self, title: &str) {
        if let Some(backend) = &mut self.backend {
            backend.set_title(title);
        }
    }

    /// Replace the indexed-colour palette (`DG_SetPalette`)
    pub fn set_palette(&mut self, colors: &[Rgb; PALETTE_SIZE]) {
        match &mut self.backend {
            Some(backend) => backend.view_mut().set_palette(colors),
            None => debug!("SetPalette before Init ignored"),
        }
    }

    /// Enter or leave fullscreen (`DG_SetFullscreen`); no-op before init
    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        if let Some(backend) = &mut self.backend {
            backend.set_fullscreen(fullscreen);
        }
    }
}
