// Window module - winit window presented through pixels
//
// The engine owns the main loop, so the winit event loop is never `run`.
// Instead every pump drains whatever events are pending and returns.

use super::controls::{Controls, WindowCommand};
use super::menu::MenuBar;
use super::view::{DoomView, KeyInput, Widget};
use super::{Backend, WindowState};
use crate::display::{self, Size};
use crate::error::{PlatformError, Result};
#[cfg(feature = "gamepad")]
use crate::input::{GamepadInput, GamepadMapping};
use crate::platform::config::{PlatformConfig, RepaintMode};
use pixels::{Pixels, SurfaceTexture};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::ModifiersState;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Fullscreen, Icon, Window, WindowId};

/// How long the first pump may wait for the window to appear
const STARTUP_TIMEOUT: Duration = Duration::from_millis(100);

/// winit + pixels implementation of [`Backend`]
pub struct WinitBackend {
    event_loop: EventLoop<()>,
    app: HostApp,
}

impl Backend for WinitBackend {
    fn create(config: &PlatformConfig, view: DoomView) -> Result<Self> {
        let mut event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = HostApp::new(config, view)?;

        // resumed() fires during the first pump on desktop platforms
        if let PumpStatus::Exit(code) = event_loop.pump_app_events(Some(STARTUP_TIMEOUT), &mut app)
        {
            debug!("event loop exited during startup ({})", code);
        }

        if let Some(err) = app.error.take() {
            return Err(err);
        }
        if app.window.is_none() {
            return Err(PlatformError::WindowUnavailable);
        }

        let size = config.window_size();
        info!(
            "window created: {}x{} ({}x scale, {:?} repaint)",
            size.width, size.height, config.video.scale, config.video.repaint
        );

        Ok(Self { event_loop, app })
    }

    fn pump(&mut self) {
        if let PumpStatus::Exit(code) = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.app)
        {
            debug!("event loop reported exit ({})", code);
        }
    }

    fn repaint(&mut self) {
        self.app.paint();
    }

    fn set_title(&mut self, title: &str) {
        self.app.set_title(title);
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.app.set_fullscreen(fullscreen);
    }

    fn window_state(&self) -> &WindowState {
        self.app.controls.state()
    }

    fn view(&self) -> &DoomView {
        self.app.controls.view()
    }

    fn view_mut(&mut self) -> &mut DoomView {
        self.app.controls.view_mut()
    }
}

/// Window, presentation buffer and widget, driven by the event loop
struct HostApp {
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    buffer_size: Size,
    controls: Controls,
    modifiers: ModifiersState,
    initial_size: Size,
    icon: Option<std::path::PathBuf>,
    repaint: RepaintMode,
    repaint_interval: Duration,
    last_repaint: Instant,
    error: Option<PlatformError>,
    #[cfg(feature = "gamepad")]
    gamepad: Option<GamepadInput>,
}

impl HostApp {
    fn new(config: &PlatformConfig, view: DoomView) -> Result<Self> {
        let menu = MenuBar::new(&config.hotkeys, config.video.fullscreen)?;
        let state = WindowState::new(&config.window.title, config.video.fullscreen);

        #[cfg(feature = "gamepad")]
        let gamepad = if config.input.gamepad {
            let mapping = GamepadMapping::from_config(&config.input.gamepad_bindings)?;
            GamepadInput::new(mapping)
        } else {
            None
        };

        Ok(Self {
            window: None,
            pixels: None,
            buffer_size: config.window_size(),
            controls: Controls::new(view, menu, state),
            modifiers: ModifiersState::empty(),
            initial_size: config.window_size(),
            icon: config.window.icon.clone(),
            repaint: config.video.repaint,
            repaint_interval: config.repaint_interval(),
            last_repaint: Instant::now(),
            error: None,
            #[cfg(feature = "gamepad")]
            gamepad,
        })
    }

    fn load_icon(&self) -> Option<Icon> {
        let path = self.icon.as_ref()?;
        match display::load_png(path).and_then(|image| image.into_icon()) {
            Ok(icon) => Some(icon),
            Err(e) => {
                warn!("could not load window icon {}: {}", path.display(), e);
                None
            }
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let fullscreen = self
            .controls
            .state()
            .is_fullscreen()
            .then_some(Fullscreen::Borderless(None));

        let window_attributes = Window::default_attributes()
            .with_title(self.controls.state().title())
            .with_inner_size(LogicalSize::new(
                self.initial_size.width,
                self.initial_size.height,
            ))
            .with_window_icon(self.load_icon())
            .with_fullscreen(fullscreen);

        let window = Arc::new(event_loop.create_window(window_attributes)?);
        let window_size = window.inner_size();

        // The presentation buffer matches the window so scaling happens on
        // our side and always fills the whole widget
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());
        let pixels = Pixels::new(window_size.width, window_size.height, surface_texture)?;

        self.buffer_size = Size::new(window_size.width, window_size.height);
        self.window = Some(window);
        self.pixels = Some(pixels);
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        // Minimised windows report a zero size
        if width == 0 || height == 0 {
            return;
        }
        let Some(pixels) = &mut self.pixels else {
            return;
        };

        if let Err(e) = pixels.resize_surface(width, height) {
            warn!("failed to resize surface: {}", e);
            return;
        }
        if let Err(e) = pixels.resize_buffer(width, height) {
            warn!("failed to resize pixel buffer: {}", e);
            return;
        }
        self.buffer_size = Size::new(width, height);

        if let Some(window) = &self.window {
            // The compositor may have left or entered fullscreen by itself
            self.controls.sync_fullscreen(window.fullscreen().is_some());
            window.request_redraw();
        }
    }

    /// Present the engine framebuffer scaled to the whole window
    fn paint(&mut self) {
        let Some(pixels) = &mut self.pixels else {
            return;
        };

        let size = self.buffer_size;
        self.controls
            .view_mut()
            .paint_event(pixels.frame_mut(), size, size.rect());

        if let Err(e) = pixels.render() {
            warn!("render error: {}", e);
        }
    }

    fn set_title(&mut self, title: &str) {
        if self.controls.set_title(title) {
            if let Some(window) = &self.window {
                window.set_title(title);
            }
        }
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        if self.controls.set_fullscreen(fullscreen) {
            self.apply(WindowCommand::SetFullscreen(fullscreen));
        }
    }

    /// Carry out a command from the controls on the real window
    fn apply(&mut self, command: WindowCommand) {
        match command {
            WindowCommand::Quit => {
                info!("quit requested, exiting");
                std::process::exit(0);
            }
            WindowCommand::SetFullscreen(fullscreen) => {
                if let Some(window) = &self.window {
                    window.set_fullscreen(fullscreen.then_some(Fullscreen::Borderless(None)));
                }
            }
        }
    }

    fn handle_key(&mut self, event: &winit::event::KeyEvent) {
        let input = KeyInput::from_event(event);
        if let Some(command) = self
            .controls
            .handle_key(&input, event.repeat, self.modifiers)
        {
            self.apply(command);
        }
    }

    /// Check if enough time has passed for the next timer repaint
    fn should_repaint(&mut self) -> bool {
        if self.repaint != RepaintMode::Timer {
            return false;
        }

        if self.last_repaint.elapsed() >= self.repaint_interval {
            self.last_repaint = Instant::now();
            true
        } else {
            false
        }
    }
}

impl ApplicationHandler for HostApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.create_window(event_loop) {
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => self.apply(WindowCommand::Quit),
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
            }
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(&event),
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            WindowEvent::RedrawRequested => self.paint(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        #[cfg(feature = "gamepad")]
        if let Some(gamepad) = &mut self.gamepad {
            gamepad.drain_into(self.controls.view_mut().queue_mut());
        }

        if self.should_repaint() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }
}
