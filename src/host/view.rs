// Doom view - the widget that shows the engine and collects its keys
//
// The host calls into the widget through the `Widget` trait; the widget
// never talks to the window directly.

use crate::display::{Rect, Rgb, Size, Surface, PALETTE_SIZE};
use crate::input::{KeyEvent, KeyQueue, KeyTranslator};
use winit::keyboard::{Key, SmolStr};

/// Key event as delivered by the window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    /// true for key-down
    pub pressed: bool,
    /// Logical key
    pub key: Key,
    /// Text produced by the key (only present on press)
    pub text: Option<SmolStr>,
}

impl KeyInput {
    pub fn new(pressed: bool, key: Key, text: Option<SmolStr>) -> Self {
        Self { pressed, key, text }
    }

    /// Build from a winit keyboard event
    pub fn from_event(event: &winit::event::KeyEvent) -> Self {
        Self {
            pressed: event.state.is_pressed(),
            key: event.logical_key.clone(),
            text: event.text.clone(),
        }
    }
}

/// Callbacks the window host invokes on its main widget
pub trait Widget {
    /// A key went down
    fn keydown_event(&mut self, event: &KeyInput);

    /// A key went up
    fn keyup_event(&mut self, event: &KeyInput);

    /// Paint into the window's RGBA buffer, touching only `damage`
    fn paint_event(&mut self, target: &mut [u8], size: Size, damage: Rect);
}

/// The engine's widget: translates keys into the queue and paints the
/// engine framebuffer stretched over the whole widget
#[derive(Debug)]
pub struct DoomView {
    surface: Surface,
    translator: KeyTranslator,
    queue: KeyQueue,
}

impl DoomView {
    /// Create a view over the engine framebuffer
    pub fn new(surface: Surface, translator: KeyTranslator) -> Self {
        Self {
            surface,
            translator,
            queue: KeyQueue::new(),
        }
    }

    /// Take the oldest queued key event
    pub fn pop_key(&mut self) -> Option<KeyEvent> {
        self.queue.pop()
    }

    /// Queue shared with other input sources (gamepads)
    pub fn queue_mut(&mut self) -> &mut KeyQueue {
        &mut self.queue
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Apply a full engine palette
    pub fn set_palette(&mut self, colors: &[Rgb; PALETTE_SIZE]) {
        self.surface.set_palette(colors);
    }

    fn add_key_to_queue(&mut self, event: &KeyInput) {
        let code = self
            .translator
            .translate(&event.key, event.text.as_deref());
        self.queue.push(event.pressed, code);
    }
}

impl Widget for DoomView {
    fn keydown_event(&mut self, event: &KeyInput) {
        self.add_key_to_queue(event);
    }

    fn keyup_event(&mut self, event: &KeyInput) {
        self.add_key_to_queue(event);
    }

    fn paint_event(&mut self, target: &mut [u8], size: Size, damage: Rect) {
        self.surface.present_scaled(target, size, size.rect(), damage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::PixelFormat;
    use crate::keys::*;
    use winit::keyboard::NamedKey;

    fn view_over(buffer: &mut [u32], width: u32, height: u32) -> DoomView {
        let surface = unsafe {
            Surface::wrap(
                buffer.as_mut_ptr().cast(),
                width,
                height,
                PixelFormat::Rgb32,
                width as usize * 4,
            )
            .unwrap()
        };
        DoomView::new(surface, KeyTranslator::default())
    }

    #[test]
    fn test_key_down_then_up() {
        let mut buffer = vec![0u32; 4];
        let mut view = view_over(&mut buffer, 2, 2);

        let left = Key::Named(NamedKey::ArrowLeft);
        view.keydown_event(&KeyInput::new(true, left.clone(), None));
        view.keyup_event(&KeyInput::new(false, left, None));

        assert_eq!(view.pop_key(), Some(KeyEvent::new(true, KEY_LEFTARROW)));
        assert_eq!(view.pop_key(), Some(KeyEvent::new(false, KEY_LEFTARROW)));
        assert_eq!(view.pop_key(), None);
    }

    #[test]
    fn test_unknown_keys_are_still_queued() {
        let mut buffer = vec![0u32; 4];
        let mut view = view_over(&mut buffer, 2, 2);

        view.keydown_event(&KeyInput::new(true, Key::Named(NamedKey::F1), None));
        assert_eq!(view.pop_key(), Some(KeyEvent::new(true, KEY_NONE)));
    }

    #[test]
    fn test_paint_fills_widget() {
        let mut buffer = vec![0x00102030u32; 4];
        let mut view = view_over(&mut buffer, 2, 2);

        let size = Size::new(6, 4);
        let mut target = vec![0u8; 6 * 4 * 4];
        view.paint_event(&mut target, size, size.rect());

        assert!(target
            .chunks_exact(4)
            .all(|px| px == [0x10, 0x20, 0x30, 0xFF]));
    }
}
