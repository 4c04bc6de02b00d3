//! Keyboard input.
//!
//! Public types are platform-agnostic; `translate_key_event` is the only
//! place winit keyboard events are mapped into them.

mod keymap;
mod state;
mod types;

pub use keymap::translate_key_event;
pub use state::InputState;
pub use types::{Key, KeyEvent, KeyState};
