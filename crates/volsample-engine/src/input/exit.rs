use super::types::HostEvent;

/// Whether the render loop should stop.
///
/// Starts clear. Only ever goes from clear to set.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct ExitFlag {
    set: bool,
}

impl ExitFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.set
    }

    /// Applies a single event.
    pub fn apply(&mut self, ev: &HostEvent) {
        if ev.requests_exit() {
            if !self.set {
                log::debug!("exit requested by {ev:?}");
            }
            self.set = true;
        }
    }

    /// Applies a batch of events in order.
    pub fn fold<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = HostEvent>,
    {
        for ev in events {
            self.apply(&ev);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, KeyAction};

    fn key(key: Key, action: KeyAction) -> HostEvent {
        HostEvent::Key { key, action }
    }

    #[test]
    fn starts_clear() {
        assert!(!ExitFlag::new().is_set());
    }

    #[test]
    fn close_request_sets_flag() {
        let mut flag = ExitFlag::new();
        flag.fold([HostEvent::CloseRequested]);
        assert!(flag.is_set());
    }

    #[test]
    fn escape_press_sets_flag() {
        let mut flag = ExitFlag::new();
        flag.fold([key(Key::Escape, KeyAction::Press)]);
        assert!(flag.is_set());
    }

    #[test]
    fn escape_release_and_repeat_are_ignored() {
        let mut flag = ExitFlag::new();
        flag.fold([
            key(Key::Escape, KeyAction::Release),
            key(Key::Escape, KeyAction::Repeat),
        ]);
        assert!(!flag.is_set());
    }

    #[test]
    fn other_keys_are_ignored() {
        let mut flag = ExitFlag::new();
        flag.fold([
            key(Key::Unknown(7), KeyAction::Press),
            key(Key::Unknown(42), KeyAction::Press),
        ]);
        assert!(!flag.is_set());
    }

    #[test]
    fn stays_set() {
        let mut flag = ExitFlag::new();
        flag.fold([HostEvent::CloseRequested, key(Key::Escape, KeyAction::Release)]);
        assert!(flag.is_set());
    }
}
