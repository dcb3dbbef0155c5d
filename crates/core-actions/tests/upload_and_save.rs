mod common;

use common::run;
use core_actions::io_ops::{EXPORT_FILE_NAME, apply_file_load, read_upload};
use core_actions::{Action, Effect};
use core_events::FileLoad;
use core_model::{EditorModel, NOT_SAVED_YET, PromptKind, StatusLevel};
use pretty_assertions::assert_eq;
use std::path::Path;

#[tokio::test]
async fn upload_replaces_text_as_one_fresh_edit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("x.txt");
    std::fs::write(&path, "X").unwrap();

    let mut m = EditorModel::default();
    m.replace_all("old".into());
    run(&mut m, Action::PromptStart(PromptKind::Upload), dir.path());
    run(
        &mut m,
        Action::PromptInsert(path.display().to_string()),
        dir.path(),
    );
    let r = run(&mut m, Action::PromptSubmit, dir.path());
    let Some(Effect::ReadFile(target)) = r.effect else {
        panic!("expected read effect");
    };
    let load = read_upload(target).await;
    assert!(apply_file_load(&mut m, load));
    assert_eq!(m.text.text(), "X");
    assert_eq!(m.text.undo_stack(), ["", "old"]);
    assert!(m.text.redo_stack().is_empty());
    assert_eq!(m.view.cursor, 1);
}

#[tokio::test]
async fn failed_upload_leaves_state_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let mut m = EditorModel::default();
    m.replace_all("keep".into());
    let undo_before = m.text.undo_stack().to_vec();

    let load: FileLoad = read_upload(dir.path().join("missing.txt")).await;
    assert!(!apply_file_load(&mut m, load));
    assert_eq!(m.text.text(), "keep");
    assert_eq!(m.text.undo_stack(), undo_before.as_slice());
    let status = m.view.status.as_ref().unwrap();
    assert_eq!(status.level, StatusLevel::Error);
    assert!(status.text.contains("missing.txt"));
}

#[test]
fn save_writes_export_file_and_stamps_last_saved() {
    let dir = tempfile::tempdir().unwrap();
    let mut m = EditorModel::default();
    m.replace_all("line one\nline two".into());
    assert_eq!(m.view.last_saved, NOT_SAVED_YET);

    run(&mut m, Action::Save, dir.path());
    let written = std::fs::read_to_string(dir.path().join(EXPORT_FILE_NAME)).unwrap();
    assert_eq!(written, "line one\nline two");
    assert_ne!(m.view.last_saved, NOT_SAVED_YET);
}

#[test]
fn failed_save_keeps_last_saved() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("no-such-dir");
    let mut m = EditorModel::default();
    m.replace_all("text".into());
    run(&mut m, Action::Save, Path::new(&missing));
    assert_eq!(m.view.last_saved, NOT_SAVED_YET);
    assert_eq!(m.view.status.as_ref().map(|s| s.level), Some(StatusLevel::Error));
}
