use std::collections::HashSet;

use super::types::{Key, KeyEvent, KeyState};

/// Keyboard state for a single window.
#[derive(Debug, Default)]
pub struct InputState {
    /// Set of currently held keys.
    keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies a key event. Returns true on the press edge only, so
    /// auto-repeat and already-held keys do not trigger twice.
    pub fn apply_key(&mut self, ev: KeyEvent) -> bool {
        match ev.state {
            KeyState::Pressed => self.keys_down.insert(ev.key) && !ev.repeat,
            KeyState::Released => {
                self.keys_down.remove(&ev.key);
                false
            }
        }
    }

    pub fn set_focused(&mut self, focused: bool) {
        if !focused {
            // Releases are not delivered while unfocused.
            self.keys_down.clear();
        }
    }
}
