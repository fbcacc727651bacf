// Common test utilities for hook-level integration tests
//
// This module provides a headless backend that records what the hook layer
// asked of the window, and helpers to build engine framebuffers.

#![allow(dead_code)]

use doomgeneric_winit::{
    Backend, DoomView, KeyInput, PixelFormat, PlatformConfig, Result, Size, Surface, Widget,
    WindowState,
};
use winit::keyboard::{Key, NamedKey, SmolStr};

/// Backend with no window; counts calls instead of drawing
pub struct HeadlessBackend {
    view: DoomView,
    state: WindowState,
    /// Number of event loop pumps
    pub pumps: u32,
    /// Number of synchronous repaints
    pub repaints: u32,
    /// Number of real fullscreen transitions
    pub fullscreen_transitions: u32,
    /// RGBA buffer painted on every repaint
    pub window: Vec<u8>,
    pub window_size: Size,
}

impl HeadlessBackend {
    /// Deliver a key press to the view, as the window would during a pump
    pub fn press(&mut self, key: Key, text: Option<&str>) {
        self.view
            .keydown_event(&KeyInput::new(true, key, text.map(SmolStr::new)));
    }

    /// Deliver a key release to the view
    pub fn release(&mut self, key: Key) {
        self.view.keyup_event(&KeyInput::new(false, key, None));
    }

    pub fn press_named(&mut self, key: NamedKey) {
        self.press(Key::Named(key), None);
    }
}

impl Backend for HeadlessBackend {
    fn create(config: &PlatformConfig, view: DoomView) -> Result<Self> {
        let window_size = config.window_size();
        Ok(Self {
            view,
            state: WindowState::new(&config.window.title, config.video.fullscreen),
            pumps: 0,
            repaints: 0,
            fullscreen_transitions: 0,
            window: vec![0; window_size.width as usize * window_size.height as usize * 4],
            window_size,
        })
    }

    fn pump(&mut self) {
        self.pumps += 1;
    }

    fn repaint(&mut self) {
        self.repaints += 1;
        let size = self.window_size;
        self.view.paint_event(&mut self.window, size, size.rect());
    }

    fn set_title(&mut self, title: &str) {
        self.state.set_title(title);
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        if self.state.set_fullscreen(fullscreen) {
            self.fullscreen_transitions += 1;
        }
    }

    fn window_state(&self) -> &WindowState {
        &self.state
    }

    fn view(&self) -> &DoomView {
        &self.view
    }

    fn view_mut(&mut self) -> &mut DoomView {
        &mut self.view
    }
}

/// Wrap a test-owned Rgb32 framebuffer
pub fn rgb32_surface(buffer: &mut [u32], width: u32, height: u32) -> Surface {
    assert_eq!(buffer.len(), (width * height) as usize);
    unsafe {
        Surface::wrap(
            buffer.as_mut_ptr().cast(),
            width,
            height,
            PixelFormat::Rgb32,
            width as usize * 4,
        )
        .unwrap()
    }
}

/// Wrap a test-owned Indexed8 framebuffer
pub fn indexed_surface(buffer: &mut [u8], width: u32, height: u32) -> Surface {
    assert_eq!(buffer.len(), (width * height) as usize);
    unsafe {
        Surface::wrap(
            buffer.as_mut_ptr(),
            width,
            height,
            PixelFormat::Indexed8,
            width as usize,
        )
        .unwrap()
    }
}

/// Small configuration so the headless window buffer stays cheap
pub fn small_config() -> PlatformConfig {
    PlatformConfig::default()
        .with_resolution(4, 2)
        .with_scale(2)
}
