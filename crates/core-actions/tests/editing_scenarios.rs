mod common;

use common::{press, type_str};
use core_events::{KeyCode, KeyEvent};
use core_model::{EditorModel, Selection};
use pretty_assertions::assert_eq;

#[test]
fn each_keystroke_is_one_undo_step() {
    let mut m = EditorModel::default();
    type_str(&mut m, "abc");
    assert_eq!(m.text.text(), "abc");
    assert_eq!(m.text.undo_stack(), ["", "a", "ab"]);
    press(&mut m, KeyEvent::ctrl('z'));
    assert_eq!(m.text.text(), "ab");
    press(&mut m, KeyEvent::ctrl('z'));
    press(&mut m, KeyEvent::ctrl('y'));
    assert_eq!(m.text.text(), "ab");
    assert_eq!(m.text.redo_depth(), 1);
}

#[test]
fn typing_after_undo_clears_redo() {
    let mut m = EditorModel::default();
    type_str(&mut m, "ab");
    press(&mut m, KeyEvent::ctrl('z'));
    assert!(m.text.can_redo());
    type_str(&mut m, "c");
    assert_eq!(m.text.text(), "ac");
    assert!(!m.text.can_redo());
    let r = press(&mut m, KeyEvent::ctrl('y')).unwrap();
    assert!(!r.text_changed);
}

#[test]
fn typing_over_find_selection_replaces_it() {
    let mut m = EditorModel::default();
    m.replace_all("hello world".into());
    press(&mut m, KeyEvent::ctrl('f'));
    type_str(&mut m, "WORLD");
    press(&mut m, KeyEvent::plain(KeyCode::Enter));
    assert_eq!(m.view.selection, Selection::new(6, 11));
    type_str(&mut m, "X");
    assert_eq!(m.text.text(), "hello X");
    assert_eq!(m.text.undo_stack().last().map(String::as_str), Some("hello world"));
}

#[test]
fn enter_and_tab_insert_characters() {
    let mut m = EditorModel::default();
    type_str(&mut m, "a");
    press(&mut m, KeyEvent::plain(KeyCode::Enter));
    press(&mut m, KeyEvent::plain(KeyCode::Tab));
    type_str(&mut m, "b");
    assert_eq!(m.text.text(), "a\n\tb");
    let counts = m.text.counts();
    assert_eq!((counts.characters, counts.words, counts.lines), (4, 2, 2));
}

#[test]
fn escape_cancels_prompt_without_running_find() {
    let mut m = EditorModel::default();
    m.replace_all("abc".into());
    press(&mut m, KeyEvent::ctrl('f'));
    type_str(&mut m, "b");
    press(&mut m, KeyEvent::plain(KeyCode::Esc));
    assert!(m.view.prompt.is_none());
    assert!(m.view.search_query.is_empty());
    assert!(m.view.selection.is_none());
}

#[test]
fn controls_reflect_latest_toggle() {
    let mut m = EditorModel::default();
    press(&mut m, KeyEvent::ctrl('t'));
    press(&mut m, KeyEvent::ctrl('t'));
    press(&mut m, KeyEvent::plain(KeyCode::F(5)));
    press(&mut m, KeyEvent::ctrl('r'));
    assert_eq!(m.view.theme.as_str(), "dark");
    assert_eq!(m.view.font_size.px(), 14);
    assert_eq!(m.view.alignment.as_str(), "right");
}
