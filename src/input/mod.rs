// Input module - key translation and the engine key queue
//
// Window key events are translated to engine key codes and buffered in a
// fixed-size queue until the engine polls for them.

#[cfg(feature = "gamepad")]
pub mod gamepad;
pub mod queue;
pub mod translate;

#[cfg(feature = "gamepad")]
pub use gamepad::{GamepadInput, GamepadMapping};
pub use queue::{KeyEvent, KeyQueue, KEY_QUEUE_SIZE};
pub use translate::KeyTranslator;
