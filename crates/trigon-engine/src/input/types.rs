/// Keyboard key identifier.
///
/// Only keys a render loop reacts to are named. Everything else maps to
/// `Key::Unknown` with the platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,

    /// Platform-dependent key not represented here.
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Keyboard event translated from the windowing layer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyEvent {
    pub key: Key,
    pub state: KeyState,
    /// True for auto-repeat presses.
    pub repeat: bool,
}

impl KeyEvent {
    pub fn pressed(key: Key) -> Self {
        Self { key, state: KeyState::Pressed, repeat: false }
    }

    pub fn released(key: Key) -> Self {
        Self { key, state: KeyState::Released, repeat: false }
    }
}
