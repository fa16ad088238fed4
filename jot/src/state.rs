//! Editor state representation.
//!
//! The editor state is an explicit, passed-around record owned by the
//! controller: buffer content, cursor, dirty flag, view settings, and any
//! active search highlights. Core components receive the narrow pieces
//! they need as arguments rather than reaching into shared state.

use crate::{search::MatchSpan, view::ViewSettings};

/// Complete state of the text editor, minus the path binding (which is
/// owned exclusively by [`crate::persist::PersistenceManager`]).
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    /// Text content of the document.
    pub buffer: TextBuffer,

    /// Current insertion point.
    pub cursor: Cursor,

    /// Whether the document has unsaved changes. Mutated by edits and by
    /// successful saves; the autosave policy only reads it and clears it
    /// after a successful write.
    pub is_dirty: bool,

    /// Theme and font display state.
    pub view: ViewSettings,

    /// Active search highlights, if any.
    pub search: Option<SearchState>,
}

impl EditorState {
    /// Creates a new empty editor state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an editor state with the given text content.
    pub fn with_text(text: &str) -> Self {
        Self {
            buffer: TextBuffer::with_text(text),
            ..Self::default()
        }
    }

    /// Returns the complete text content.
    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    /// Replace the document content wholesale, as after opening a file.
    ///
    /// Resets the cursor to the document start and drops stale highlights.
    pub fn replace_content(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.cursor = Cursor::default();
        self.search = None;
    }
}

/// In-memory document content, decoupled from any display surface.
///
/// A String-backed character store addressed by char offsets into the
/// document's linear character stream. Line structure is derived, not
/// stored; fine for the whole-buffer operations a notepad performs.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    text: String,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Length of the document in chars.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Replace the whole content.
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Insert `s` at the given char offset; offsets past the end append.
    pub fn insert(&mut self, offset: usize, s: &str) {
        let at = self.byte_offset(offset);
        self.text.insert_str(at, s);
    }

    /// Remove the chars in the half-open range `[start, end)`.
    pub fn remove(&mut self, start: usize, end: usize) {
        let from = self.byte_offset(start);
        let to = self.byte_offset(end);
        if from < to {
            self.text.replace_range(from..to, "");
        }
    }

    /// Lines of the document. An empty document has one empty line, and a
    /// trailing newline produces a trailing empty line, matching how an
    /// editing surface addresses them.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    pub fn line_count(&self) -> usize {
        self.lines().count()
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines().nth(index)
    }

    /// Convert a char offset to a `(line, column)` pair, clamping offsets
    /// past the end to the final position.
    pub fn line_col_at(&self, offset: usize) -> (usize, usize) {
        let mut line = 0;
        let mut column = 0;
        for (i, ch) in self.text.chars().enumerate() {
            if i == offset {
                return (line, column);
            }
            if ch == '\n' {
                line += 1;
                column = 0;
            } else {
                column += 1;
            }
        }
        (line, column)
    }

    /// Convert a `(line, column)` pair to a char offset, clamping the line
    /// to the document and the column to the line.
    pub fn offset_at(&self, line: usize, column: usize) -> usize {
        let mut offset = 0;
        for (i, l) in self.lines().enumerate() {
            let len = l.chars().count();
            if i == line {
                return offset + column.min(len);
            }
            offset += len + 1; // +1 for the newline
        }
        // Line past the end: clamp to the end of the document.
        self.char_len()
    }

    fn byte_offset(&self, char_offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_offset)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

/// Insertion point as an offset into the document's character stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Char offset of the insertion point.
    pub offset: usize,

    /// Column to aim for on vertical movement, preserved across lines
    /// shorter than it.
    pub desired_column: usize,
}

impl Cursor {
    pub fn at(offset: usize) -> Self {
        Self {
            offset,
            desired_column: 0,
        }
    }
}

/// The active search: the keyword and its computed spans.
///
/// Materialized so the frontend can paint highlights and clear the previous
/// set before painting a new one. Any edit invalidates the spans, so the
/// processor drops this on every text change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    pub keyword: String,
    pub spans: Vec<MatchSpan>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_has_one_line() {
        let buffer = TextBuffer::new();
        assert_eq!(buffer.line_count(), 1);
        assert_eq!(buffer.line(0), Some(""));
    }

    #[test]
    fn insert_and_remove_by_char_offset() {
        let mut buffer = TextBuffer::with_text("hällo");
        buffer.insert(5, "!");
        assert_eq!(buffer.text(), "hällo!");

        buffer.remove(1, 2);
        assert_eq!(buffer.text(), "hllo!");
    }

    #[test]
    fn line_col_round_trip() {
        let buffer = TextBuffer::with_text("one\ntwo\nthree");
        assert_eq!(buffer.line_col_at(0), (0, 0));
        assert_eq!(buffer.line_col_at(4), (1, 0));
        assert_eq!(buffer.line_col_at(6), (1, 2));
        assert_eq!(buffer.offset_at(1, 2), 6);
        assert_eq!(buffer.offset_at(2, 5), 13);
    }

    #[test]
    fn offset_at_clamps_column_to_line() {
        let buffer = TextBuffer::with_text("ab\ncdef");
        assert_eq!(buffer.offset_at(0, 99), 2);
        assert_eq!(buffer.offset_at(99, 0), 7);
    }

    #[test]
    fn replace_content_resets_cursor_and_search() {
        let mut state = EditorState::with_text("abc");
        state.cursor.offset = 3;
        state.search = Some(SearchState {
            keyword: "a".into(),
            spans: vec![],
        });

        state.replace_content("xyz");
        assert_eq!(state.cursor.offset, 0);
        assert!(state.search.is_none());
    }
}
