//! Stateless key -> `Action` translation.
//!
//! Two tables: one while a prompt (find / upload) owns the keyboard and one
//! for the text area. Quit chords work in both. Keys with no binding map to
//! `None` and are dropped by the runtime.

use crate::{Action, EditKind, MotionKind};
use core_config::Alignment;
use core_events::{KeyCode, KeyEvent, KeyModifiers};
use core_model::PromptKind;

pub fn translate_key(prompt_active: bool, key: &KeyEvent) -> Option<Action> {
    let ctrl = key.mods.contains(KeyModifiers::CTRL);
    if ctrl && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c')) {
        return Some(Action::Quit);
    }
    if prompt_active {
        return translate_prompt_key(key, ctrl);
    }
    if ctrl {
        return translate_chord(key.code);
    }
    let action = match key.code {
        KeyCode::Char(c) if !key.mods.contains(KeyModifiers::ALT) => {
            Action::Edit(EditKind::Insert(c.to_string()))
        }
        KeyCode::Enter => Action::Edit(EditKind::Insert("\n".into())),
        KeyCode::Tab => Action::Edit(EditKind::Insert("\t".into())),
        KeyCode::Backspace => Action::Edit(EditKind::Backspace),
        KeyCode::Delete => Action::Edit(EditKind::Delete),
        KeyCode::Esc => Action::ClearSelection,
        KeyCode::Left => Action::Motion(MotionKind::Left),
        KeyCode::Right => Action::Motion(MotionKind::Right),
        KeyCode::Up => Action::Motion(MotionKind::Up),
        KeyCode::Down => Action::Motion(MotionKind::Down),
        KeyCode::Home => Action::Motion(MotionKind::LineStart),
        KeyCode::End => Action::Motion(MotionKind::LineEnd),
        KeyCode::PageUp => Action::Motion(MotionKind::PageUp),
        KeyCode::PageDown => Action::Motion(MotionKind::PageDown),
        KeyCode::F(5) => Action::FontSmaller,
        KeyCode::F(6) => Action::FontLarger,
        _ => return None,
    };
    Some(action)
}

fn translate_chord(code: KeyCode) -> Option<Action> {
    let KeyCode::Char(c) = code else {
        return None;
    };
    let action = match c.to_ascii_lowercase() {
        'z' => Action::Undo,
        'y' => Action::Redo,
        's' => Action::Save,
        'o' => Action::PromptStart(PromptKind::Upload),
        'f' => Action::PromptStart(PromptKind::Find),
        't' => Action::ToggleTheme,
        'p' => Action::ToggleAutosave,
        'l' => Action::Align(Alignment::Left),
        'e' => Action::Align(Alignment::Center),
        'r' => Action::Align(Alignment::Right),
        _ => return None,
    };
    Some(action)
}

fn translate_prompt_key(key: &KeyEvent, ctrl: bool) -> Option<Action> {
    match key.code {
        KeyCode::Enter => Some(Action::PromptSubmit),
        KeyCode::Esc => Some(Action::PromptCancel),
        KeyCode::Backspace => Some(Action::PromptBackspace),
        KeyCode::Char(c) if !ctrl && !key.mods.contains(KeyModifiers::ALT) => {
            Some(Action::PromptInsert(c.to_string()))
        }
        _ => None,
    }
}

/// Bracketed paste: one insert into the document, or into the prompt buffer
/// with line breaks dropped.
pub fn translate_paste(prompt_active: bool, raw: &str) -> Option<Action> {
    let text = core_text::segment::normalize_input(raw);
    if text.is_empty() {
        return None;
    }
    if prompt_active {
        let single: String = text.chars().filter(|c| *c != '\n').collect();
        return Some(Action::PromptInsert(single));
    }
    Some(Action::Edit(EditKind::Insert(text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_chords_map_to_commands() {
        assert_eq!(translate_key(false, &KeyEvent::ctrl('z')), Some(Action::Undo));
        assert_eq!(translate_key(false, &KeyEvent::ctrl('y')), Some(Action::Redo));
        assert_eq!(translate_key(false, &KeyEvent::ctrl('s')), Some(Action::Save));
        assert_eq!(
            translate_key(false, &KeyEvent::ctrl('e')),
            Some(Action::Align(Alignment::Center))
        );
        assert_eq!(translate_key(false, &KeyEvent::ctrl('k')), None);
    }

    #[test]
    fn quit_works_inside_prompt() {
        assert_eq!(translate_key(true, &KeyEvent::ctrl('q')), Some(Action::Quit));
        assert_eq!(translate_key(false, &KeyEvent::ctrl('c')), Some(Action::Quit));
    }

    #[test]
    fn prompt_keys_edit_buffer() {
        let k = KeyEvent::plain(KeyCode::Char('x'));
        assert_eq!(translate_key(true, &k), Some(Action::PromptInsert("x".into())));
        assert_eq!(
            translate_key(true, &KeyEvent::plain(KeyCode::Enter)),
            Some(Action::PromptSubmit)
        );
        assert_eq!(translate_key(true, &KeyEvent::ctrl('z')), None);
    }

    #[test]
    fn text_keys_insert() {
        assert_eq!(
            translate_key(false, &KeyEvent::plain(KeyCode::Enter)),
            Some(Action::Edit(EditKind::Insert("\n".into())))
        );
        let shifted = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(
            translate_key(false, &shifted),
            Some(Action::Edit(EditKind::Insert("A".into())))
        );
        assert_eq!(
            translate_key(false, &KeyEvent::plain(KeyCode::F(6))),
            Some(Action::FontLarger)
        );
    }

    #[test]
    fn paste_into_prompt_is_single_line() {
        assert_eq!(
            translate_paste(true, "a\r\nb"),
            Some(Action::PromptInsert("ab".into()))
        );
        assert_eq!(
            translate_paste(false, "a\r\nb"),
            Some(Action::Edit(EditKind::Insert("a\nb".into())))
        );
        assert_eq!(translate_paste(false, ""), None);
    }
}
