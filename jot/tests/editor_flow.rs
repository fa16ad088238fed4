//! End-to-end controller flows through `EditorEngine::handle_event`.

use jot::{testing::TestEditor, EditorEvent, Effect, Motion};

#[test]
fn new_editor_is_empty_and_clean() {
    TestEditor::new()
        .assert_text("")
        .assert_dirty(false)
        .assert_bound_path(None);
}

#[test]
fn type_save_as_then_autosave_appends() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("note.txt");

    TestEditor::new()
        .type_text("foo")
        .save_file_as(&path)
        .assert_bound_path(Some(path.as_path()))
        .assert_dirty(false)
        .type_text("bar")
        .assert_text("foobar")
        .assert_dirty(true)
        .tick()
        .assert_dirty(false);

    assert_eq!(
        std::fs::read_to_string(&path).expect("read back"),
        "foobar"
    );
}

#[test]
fn open_replaces_content_and_binds() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("existing.txt");
    std::fs::write(&path, "from disk").expect("fixture");

    TestEditor::new()
        .type_text("scratch")
        .open_file(&path)
        .assert_text("from disk")
        .assert_dirty(false)
        .assert_bound_path(Some(path.as_path()))
        .assert_cursor_offset(0);
}

#[test]
fn open_failure_leaves_the_document_alone() {
    let dir = tempfile::tempdir().expect("tempdir");

    let mut editor = TestEditor::new()
        .type_text("precious")
        .open_file(dir.path().join("missing.txt"));

    assert!(matches!(
        editor.take_effects().as_slice(),
        [Effect::ShowError { .. }]
    ));
    editor
        .assert_text("precious")
        .assert_dirty(true)
        .assert_bound_path(None);
}

#[test]
fn save_writes_to_the_bound_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("note.txt");

    TestEditor::new()
        .type_text("v1")
        .save_file_as(&path)
        .type_text("+v2")
        .event(EditorEvent::Save)
        .assert_dirty(false);

    assert_eq!(std::fs::read_to_string(&path).expect("read back"), "v1+v2");
}

#[test]
fn new_file_clears_text_and_binding() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("note.txt");

    TestEditor::new()
        .type_text("content")
        .save_file_as(&path)
        .event(EditorEvent::NewFile)
        .assert_text("")
        .assert_dirty(false)
        .assert_bound_path(None);
}

#[test]
fn search_highlights_then_edit_invalidates() {
    TestEditor::with_text("Hello hello HELLO")
        .search("hello")
        .assert_search_spans(&[(0, 5), (6, 11), (12, 17)])
        .type_text("x")
        .assert_search_spans(&[]);
}

#[test]
fn search_replaces_previous_highlights() {
    TestEditor::with_text("aa bb aa")
        .search("aa")
        .assert_search_spans(&[(0, 2), (6, 8)])
        .search("bb")
        .assert_search_spans(&[(3, 5)]);
}

#[test]
fn cursor_motion_walks_lines() {
    TestEditor::with_text("ab\ncdef")
        .move_cursor(Motion::Down)
        .move_cursor(Motion::LineEnd)
        .assert_cursor_offset(7)
        .move_cursor(Motion::DocStart)
        .assert_cursor_offset(0);
}

#[test]
fn scenario_from_scratch_to_autosaved_file() {
    jot_log::test();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("note.txt");

    // New document, type, save-as, type more, let autosave catch up.
    let mut editor = TestEditor::new();
    editor = editor.event(EditorEvent::NewFile);
    editor = editor
        .type_text("foo")
        .save_file_as(&path)
        .assert_bound_path(Some(path.as_path()));
    assert_eq!(std::fs::read_to_string(&path).expect("read"), "foo");

    editor = editor.type_text("bar").tick();
    editor.assert_text("foobar").assert_dirty(false);
    assert_eq!(std::fs::read_to_string(&path).expect("read"), "foobar");
}
