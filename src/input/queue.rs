// Key event queue
//
// Fixed-capacity ring buffer between the window's key handlers (producer)
// and the engine's per-tick key poll (consumer). Both run on the engine
// thread, so no synchronisation is involved.
//
// There is no backpressure. When the engine falls behind, new events
// overwrite the oldest unread ones.

/// Number of events the queue can hold before it starts overwriting
pub const KEY_QUEUE_SIZE: usize = 16;

/// A single key transition in the engine's key space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// true for key-down, false for key-up
    pub pressed: bool,
    /// Engine key code (see [`crate::keys`])
    pub code: u8,
}

impl KeyEvent {
    /// Create a new key event
    pub fn new(pressed: bool, code: u8) -> Self {
        Self { pressed, code }
    }

    /// Pack into the 16-bit storage word (`pressed << 8 | code`)
    #[inline]
    pub fn pack(self) -> u16 {
        ((self.pressed as u16) << 8) | self.code as u16
    }

    /// Unpack a storage word produced by [`KeyEvent::pack`]
    #[inline]
    pub fn unpack(word: u16) -> Self {
        Self {
            pressed: (word >> 8) != 0,
            code: (word & 0xFF) as u8,
        }
    }
}

/// Fixed-size circular key event queue
///
/// Cursors are free-running counters; the slot index is the counter
/// modulo [`KEY_QUEUE_SIZE`]. The queue is empty when both counters are
/// equal, which lets it hold a full [`KEY_QUEUE_SIZE`] events.
#[derive(Debug, Clone)]
pub struct KeyQueue {
    slots: [u16; KEY_QUEUE_SIZE],
    read: usize,
    write: usize,
}

impl KeyQueue {
    /// Create an empty, zero-initialised queue
    pub fn new() -> Self {
        Self {
            slots: [0; KEY_QUEUE_SIZE],
            read: 0,
            write: 0,
        }
    }

    /// Append an event to the tail
    ///
    /// Never blocks and never fails. If the queue already holds
    /// [`KEY_QUEUE_SIZE`] unread events the oldest one is lost.
    pub fn push(&mut self, pressed: bool, code: u8) {
        self.slots[self.write % KEY_QUEUE_SIZE] = KeyEvent::new(pressed, code).pack();
        self.write = self.write.wrapping_add(1);

        if self.len() > KEY_QUEUE_SIZE {
            // The slot we just wrote was the oldest unread one
            self.read = self.write.wrapping_sub(KEY_QUEUE_SIZE);
        }
    }

    /// Remove and return the oldest unread event
    ///
    /// Returns `None` without touching the cursors when the queue is empty.
    pub fn pop(&mut self) -> Option<KeyEvent> {
        if self.is_empty() {
            return None;
        }

        let word = self.slots[self.read % KEY_QUEUE_SIZE];
        self.read = self.read.wrapping_add(1);

        Some(KeyEvent::unpack(word))
    }

    /// Number of unread events
    pub fn len(&self) -> usize {
        self.write.wrapping_sub(self.read)
    }

    /// Check whether there are no unread events
    pub fn is_empty(&self) -> bool {
        self.read == self.write
    }

    /// Drop all unread events
    pub fn clear(&mut self) {
        self.read = self.write;
    }

    /// Current (read, write) slot indices
    pub fn cursors(&self) -> (usize, usize) {
        (self.read % KEY_QUEUE_SIZE, self.write % KEY_QUEUE_SIZE)
    }
}

impl Default for KeyQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(queue: &mut KeyQueue) -> Vec<KeyEvent> {
        std::iter::from_fn(|| queue.pop()).collect()
    }

    #[test]
    fn test_pack_layout() {
        assert_eq!(KeyEvent::new(true, 0xac).pack(), 0x01ac);
        assert_eq!(KeyEvent::new(false, b'a').pack(), 0x0061);
        assert_eq!(KeyEvent::unpack(0x01ac), KeyEvent::new(true, 0xac));
    }

    #[test]
    fn test_new_queue_is_empty() {
        let mut queue = KeyQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = KeyQueue::new();
        for code in 1..=5u8 {
            queue.push(code % 2 == 0, code);
        }

        let events = drain(&mut queue);
        let codes: Vec<u8> = events.iter().map(|e| e.code).collect();
        assert_eq!(codes, vec![1, 2, 3, 4, 5]);
        assert!(!events[0].pressed);
        assert!(events[1].pressed);
    }

    #[test]
    fn test_full_capacity_is_fifo() {
        let mut queue = KeyQueue::new();
        for code in 0..KEY_QUEUE_SIZE as u8 {
            queue.push(true, code);
        }
        assert_eq!(queue.len(), KEY_QUEUE_SIZE);

        let codes: Vec<u8> = drain(&mut queue).iter().map(|e| e.code).collect();
        assert_eq!(codes, (0..KEY_QUEUE_SIZE as u8).collect::<Vec<_>>());
    }

    #[test]
    fn test_overflow_drops_oldest() {
        let mut queue = KeyQueue::new();
        for code in 1..=17u8 {
            queue.push(true, code);
        }

        let codes: Vec<u8> = drain(&mut queue).iter().map(|e| e.code).collect();
        assert_eq!(codes, (2..=17).collect::<Vec<_>>());
    }

    #[test]
    fn test_sustained_overflow_keeps_newest() {
        let mut queue = KeyQueue::new();
        for code in 0..100u8 {
            queue.push(false, code);
        }

        let codes: Vec<u8> = drain(&mut queue).iter().map(|e| e.code).collect();
        assert_eq!(codes, (84..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_pop_on_empty_keeps_cursors() {
        let mut queue = KeyQueue::new();
        queue.push(true, 1);
        queue.push(true, 2);
        queue.pop();
        queue.pop();

        let before = queue.cursors();
        assert_eq!(queue.pop(), None);
        assert_eq!(queue.cursors(), before);
    }

    #[test]
    fn test_interleaved_push_pop_wraps() {
        let mut queue = KeyQueue::new();
        for round in 0..40u8 {
            queue.push(true, round);
            queue.push(false, round);
            assert_eq!(queue.pop(), Some(KeyEvent::new(true, round)));
            assert_eq!(queue.pop(), Some(KeyEvent::new(false, round)));
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut queue = KeyQueue::new();
        queue.push(true, 7);
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.pop(), None);
    }
}
