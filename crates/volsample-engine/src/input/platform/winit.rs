use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::input::{HostEvent, Key, KeyAction};

/// Translates a winit `WindowEvent` into a [`HostEvent`].
///
/// Returns `None` for events the host does not react to.
pub fn translate_window_event(event: &WindowEvent) -> Option<HostEvent> {
    match event {
        WindowEvent::CloseRequested => Some(HostEvent::CloseRequested),

        WindowEvent::KeyboardInput { event, .. } => Some(translate_key_event(event)),

        _ => None,
    }
}

fn translate_key_event(event: &KeyEvent) -> HostEvent {
    HostEvent::Key {
        key: map_key(event.physical_key),
        action: map_action(event.state, event.repeat),
    }
}

pub(crate) fn map_action(state: ElementState, repeat: bool) -> KeyAction {
    match (state, repeat) {
        (ElementState::Pressed, false) => KeyAction::Press,
        (ElementState::Pressed, true) => KeyAction::Repeat,
        (ElementState::Released, _) => KeyAction::Release,
    }
}

pub(crate) fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::Escape => Key::Escape,
            other => Key::Unknown(other as u32),
        },

        // winit 0.30 uses NativeKeyCode; no stable numeric is guaranteed here.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_maps_to_escape() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Escape)), Key::Escape);
    }

    #[test]
    fn keys_other_than_escape_are_unknown() {
        assert!(matches!(map_key(PhysicalKey::Code(KeyCode::KeyQ)), Key::Unknown(_)));
        assert!(matches!(map_key(PhysicalKey::Code(KeyCode::Space)), Key::Unknown(_)));
    }

    #[test]
    fn repeat_is_not_a_press() {
        assert_eq!(map_action(ElementState::Pressed, false), KeyAction::Press);
        assert_eq!(map_action(ElementState::Pressed, true), KeyAction::Repeat);
        assert_eq!(map_action(ElementState::Released, false), KeyAction::Release);
    }

    #[test]
    fn close_request_translates() {
        assert_eq!(
            translate_window_event(&WindowEvent::CloseRequested),
            Some(HostEvent::CloseRequested)
        );
    }

    #[test]
    fn unrelated_events_are_dropped() {
        assert_eq!(translate_window_event(&WindowEvent::Focused(true)), None);
    }
}
