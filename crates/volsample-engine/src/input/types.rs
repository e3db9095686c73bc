/// Keyboard key identifier.
///
/// Only keys the host reacts to get their own variant. For everything else,
/// use `Key::Unknown(u32)` with a stable platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,

    /// Platform-dependent key not represented here.
    Unknown(u32),
}

/// What happened to a key.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyAction {
    Press,
    Release,
    /// Auto-repeat while held. Not a press.
    Repeat,
}

/// Event records produced by the window system and consumed by the host.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HostEvent {
    /// The user asked to close the window.
    CloseRequested,

    Key { key: Key, action: KeyAction },
}

impl HostEvent {
    /// Whether handling this event terminates the render loop.
    pub fn requests_exit(&self) -> bool {
        matches!(
            self,
            HostEvent::CloseRequested
                | HostEvent::Key {
                    key: Key::Escape,
                    action: KeyAction::Press,
                }
        )
    }
}
