//! Status bar contents, computed headlessly.
//!
//! Displays cursor position, word count, and the file label with a dirty
//! marker, plus an optional transient notice (save errors, match counts).
//! The frontend renders this however its surface paints a single line.

use crate::{persist::PersistenceManager, state::EditorState};
use std::fmt;

/// Maximum chars of file label before path truncation kicks in.
const MAX_LABEL_CHARS: usize = 40;

/// One computed status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    /// Cursor line, zero-based; rendered one-based.
    pub line: usize,
    /// Cursor column, zero-based; rendered one-based.
    pub column: usize,
    /// Whitespace-separated word count of the whole document.
    pub words: usize,
    /// Bound path (truncated from the start) or "Untitled".
    pub file_label: String,
    /// Whether the document has unsaved changes.
    pub dirty: bool,
    /// Transient message overlaying the right side of the bar.
    pub notice: Option<String>,
}

impl StatusLine {
    pub fn compute(state: &EditorState, persist: &PersistenceManager) -> Self {
        let (line, column) = state.buffer.line_col_at(state.cursor.offset);
        Self {
            line,
            column,
            words: state.text().split_whitespace().count(),
            file_label: truncate_path_from_start(&persist.display_path(), MAX_LABEL_CHARS),
            dirty: state.is_dirty,
            notice: None,
        }
    }

    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ln {}, Col {} | Words: {} | {}{}",
            self.line + 1,
            self.column + 1,
            self.words,
            self.file_label,
            if self.dirty { "*" } else { "" },
        )?;
        if let Some(notice) = &self.notice {
            write!(f, " | {notice}")?;
        }
        Ok(())
    }
}

/// Truncate a path from the beginning to fit within `max_chars`.
///
/// Preserves the file name and as much parent path as possible.
/// Example: `long/path/to/parent/file.txt` with max 20 becomes
/// `...parent/file.txt`.
fn truncate_path_from_start(path: &str, max_chars: usize) -> String {
    if path.chars().count() <= max_chars {
        return path.to_string();
    }

    let components: Vec<&str> = path.split('/').collect();
    let Some(filename) = components.last() else {
        return path.to_string();
    };

    let ellipsis = "...";

    // If just the file name is too long, truncate it from the end.
    if filename.chars().count() + ellipsis.len() > max_chars {
        let keep = max_chars.saturating_sub(ellipsis.len());
        let tail: String = filename
            .chars()
            .skip(filename.chars().count().saturating_sub(keep))
            .collect();
        return format!("{ellipsis}{tail}");
    }

    // Work backwards, including parent directories while they fit.
    let mut result = (*filename).to_string();
    for component in components.iter().rev().skip(1) {
        let candidate = format!("{component}/{result}");
        if candidate.chars().count() + ellipsis.len() <= max_chars {
            result = candidate;
        } else {
            break;
        }
    }

    format!("{ellipsis}{result}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_one_based_position_and_word_count() {
        let state = EditorState::with_text("one two\nthree");
        let persist = PersistenceManager::new();

        let status = StatusLine::compute(&state, &persist);
        assert_eq!(status.to_string(), "Ln 1, Col 1 | Words: 3 | Untitled");
    }

    #[test]
    fn dirty_marker_and_notice() {
        let mut state = EditorState::with_text("x");
        state.is_dirty = true;
        let persist = PersistenceManager::new();

        let status = StatusLine::compute(&state, &persist).with_notice("3 matches");
        assert_eq!(
            status.to_string(),
            "Ln 1, Col 1 | Words: 1 | Untitled* | 3 matches"
        );
    }

    #[test]
    fn short_paths_pass_through() {
        assert_eq!(truncate_path_from_start("a/b.txt", 20), "a/b.txt");
    }

    #[test]
    fn long_paths_keep_the_file_name() {
        let truncated = truncate_path_from_start("very/long/path/to/some/parent/file.txt", 20);
        assert!(truncated.starts_with("..."));
        assert!(truncated.ends_with("parent/file.txt"));
        assert!(truncated.chars().count() <= 20);
    }

    #[test]
    fn oversized_file_name_is_cut_from_the_front() {
        let truncated = truncate_path_from_start("an_extremely_long_file_name.txt", 12);
        assert_eq!(truncated.chars().count(), 12);
        assert!(truncated.starts_with("..."));
        assert!(truncated.ends_with(".txt"));
    }
}
