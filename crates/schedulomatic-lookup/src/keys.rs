//! Keyboard surface of the lookup.

/// Keys the lookup reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    Enter,
    Escape,
    Delete,
    Backspace,
}

impl Key {
    /// Map a legacy numeric key code to a [`Key`].
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            8 => Some(Key::Backspace),
            13 => Some(Key::Enter),
            27 => Some(Key::Escape),
            38 => Some(Key::ArrowUp),
            40 => Some(Key::ArrowDown),
            46 => Some(Key::Delete),
            _ => None,
        }
    }

    /// Whether the host must suppress the default input behavior for this
    /// key. ArrowUp would otherwise move the text cursor to the start of the
    /// field.
    pub fn suppresses_default(&self) -> bool {
        matches!(self, Key::ArrowUp)
    }
}
