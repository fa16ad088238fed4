//! Pure document transitions.
//!
//! The editing half of event processing: text changes and cursor motion,
//! with no I/O and no effects. The [`crate::engine::EditorEngine`] calls
//! these and layers persistence, search, and autosave on top.

use crate::{
    events::Motion,
    state::{Cursor, EditorState},
};

/// Insert `text` at the cursor and advance past it.
///
/// Marks the document dirty and drops stale search highlights, whose
/// offsets no longer describe the changed text.
pub fn insert_text(state: &mut EditorState, text: &str) {
    if text.is_empty() {
        return;
    }

    state.buffer.insert(state.cursor.offset, text);
    state.cursor.offset += text.chars().count();
    sync_desired_column(state);
    mark_edited(state);
}

/// Delete the char before the cursor, if any.
pub fn backspace(state: &mut EditorState) {
    if state.cursor.offset == 0 {
        return;
    }

    state
        .buffer
        .remove(state.cursor.offset - 1, state.cursor.offset);
    state.cursor.offset -= 1;
    sync_desired_column(state);
    mark_edited(state);
}

/// Delete the char after the cursor, if any.
pub fn delete_forward(state: &mut EditorState) {
    if state.cursor.offset >= state.buffer.char_len() {
        return;
    }

    state
        .buffer
        .remove(state.cursor.offset, state.cursor.offset + 1);
    sync_desired_column(state);
    mark_edited(state);
}

/// Move the cursor. Vertical motion aims for the desired column, so
/// passing through a short line does not lose the original column.
pub fn apply_motion(state: &mut EditorState, motion: Motion) {
    let len = state.buffer.char_len();
    let (line, _) = state.buffer.line_col_at(state.cursor.offset);

    match motion {
        Motion::Left => {
            state.cursor.offset = state.cursor.offset.saturating_sub(1);
            sync_desired_column(state);
        },
        Motion::Right => {
            state.cursor.offset = (state.cursor.offset + 1).min(len);
            sync_desired_column(state);
        },
        Motion::Up => {
            if line > 0 {
                let target = state.cursor.desired_column;
                state.cursor.offset = state.buffer.offset_at(line - 1, target);
            }
        },
        Motion::Down => {
            if line + 1 < state.buffer.line_count() {
                let target = state.cursor.desired_column;
                state.cursor.offset = state.buffer.offset_at(line + 1, target);
            }
        },
        Motion::LineStart => {
            state.cursor.offset = state.buffer.offset_at(line, 0);
            sync_desired_column(state);
        },
        Motion::LineEnd => {
            state.cursor.offset = state.buffer.offset_at(line, usize::MAX);
            sync_desired_column(state);
        },
        Motion::DocStart => {
            state.cursor = Cursor::default();
        },
        Motion::DocEnd => {
            state.cursor.offset = len;
            sync_desired_column(state);
        },
    }
}

fn sync_desired_column(state: &mut EditorState) {
    let (_, column) = state.buffer.line_col_at(state.cursor.offset);
    state.cursor.desired_column = column;
}

fn mark_edited(state: &mut EditorState) {
    state.is_dirty = true;
    state.search = None;
}
