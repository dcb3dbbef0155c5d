//! Async input service: crossterm events in, normalized `core_events` out.

mod async_service;
pub use async_service::AsyncInputShutdown;

use async_service::spawn_async_event_task;

use core_events::{Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::event::{KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyModifiers as CMods};
use tokio::task::JoinHandle;

/// Spawn the async input service backed by `crossterm::EventStream`.
///
/// Returns the `JoinHandle` for the background task alongside a shutdown handle
/// that can be used to request immediate termination.
pub fn spawn_async_input(
    sender: tokio::sync::mpsc::Sender<Event>,
) -> (JoinHandle<()>, AsyncInputShutdown) {
    spawn_async_event_task(sender)
}

pub(crate) fn map_mods(m: CMods) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    if m.contains(CMods::CONTROL) {
        out |= KeyModifiers::CTRL;
    }
    if m.contains(CMods::ALT) {
        out |= KeyModifiers::ALT;
    }
    if m.contains(CMods::SHIFT) {
        out |= KeyModifiers::SHIFT;
    }
    out
}

/// Translate a crossterm key into the editor's key model. Keys the editor has
/// no binding for (media keys, caps lock, ...) map to `None`.
pub(crate) fn map_key_event(key: &CKeyEvent) -> Option<KeyEvent> {
    let code = match key.code {
        CKeyCode::Char(c) => KeyCode::Char(c),
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Backspace => KeyCode::Backspace,
        CKeyCode::Delete => KeyCode::Delete,
        CKeyCode::Tab => KeyCode::Tab,
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        CKeyCode::Home => KeyCode::Home,
        CKeyCode::End => KeyCode::End,
        CKeyCode::PageUp => KeyCode::PageUp,
        CKeyCode::PageDown => KeyCode::PageDown,
        CKeyCode::F(n) => KeyCode::F(n),
        _ => return None,
    };
    Some(KeyEvent::new(code, map_mods(key.modifiers)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_modifier_combinations() {
        let mods = map_mods(CMods::CONTROL | CMods::SHIFT);
        assert!(mods.contains(KeyModifiers::CTRL));
        assert!(mods.contains(KeyModifiers::SHIFT));
        assert!(!mods.contains(KeyModifiers::ALT));
    }

    #[test]
    fn maps_named_and_function_keys() {
        let k = map_key_event(&CKeyEvent::new(CKeyCode::F(5), CMods::NONE)).unwrap();
        assert_eq!(k.code, KeyCode::F(5));
        let k = map_key_event(&CKeyEvent::new(CKeyCode::Home, CMods::NONE)).unwrap();
        assert_eq!(k.code, KeyCode::Home);
        assert!(map_key_event(&CKeyEvent::new(CKeyCode::CapsLock, CMods::NONE)).is_none());
    }
}
