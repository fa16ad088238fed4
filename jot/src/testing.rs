//! Testing utilities and helpers.
//!
//! Provides a fluent harness around [`EditorEngine`] so tests read as a
//! chain of actions and assertions, plus a builder for editor states.
//!
//! # Example
//!
//! ```rust
//! use jot::testing::TestEditor;
//!
//! TestEditor::new()
//!     .type_text("Hello")
//!     .assert_text("Hello")
//!     .assert_dirty(true);
//! ```

use crate::{
    effects::Effect,
    engine::EditorEngine,
    events::{EditorEvent, Motion},
    state::EditorState,
};
use std::path::Path;

/// Chainable wrapper around [`EditorEngine`] for tests.
///
/// Every event processed through the harness accumulates its effects,
/// which assertions can inspect and [`take_effects`](Self::take_effects)
/// drains.
pub struct TestEditor {
    engine: EditorEngine,
    effects: Vec<Effect>,
}

impl TestEditor {
    pub fn new() -> Self {
        Self {
            engine: EditorEngine::new(),
            effects: Vec::new(),
        }
    }

    /// Starts from an engine with pre-seeded content (not dirty).
    pub fn with_text(text: &str) -> Self {
        Self {
            engine: EditorEngine::with_state(EditorState::with_text(text)),
            effects: Vec::new(),
        }
    }

    /// Process one event, recording its effects.
    pub fn event(mut self, event: EditorEvent) -> Self {
        let effects = self.engine.handle_event(event);
        self.effects.extend(effects);
        self
    }

    /// Type text at the cursor.
    pub fn type_text(self, text: &str) -> Self {
        self.event(EditorEvent::Insert { text: text.into() })
    }

    pub fn move_cursor(self, motion: Motion) -> Self {
        self.event(EditorEvent::Move { motion })
    }

    pub fn save_file_as(self, path: impl AsRef<Path>) -> Self {
        self.event(EditorEvent::SaveFileAs {
            path: path.as_ref().to_path_buf(),
        })
    }

    pub fn open_file(self, path: impl AsRef<Path>) -> Self {
        self.event(EditorEvent::OpenFile {
            path: path.as_ref().to_path_buf(),
        })
    }

    pub fn search(self, keyword: &str) -> Self {
        self.event(EditorEvent::Search {
            keyword: keyword.into(),
        })
    }

    /// Fire one autosave tick.
    pub fn tick(self) -> Self {
        self.event(EditorEvent::AutosaveTick)
    }

    pub fn assert_text(self, expected: &str) -> Self {
        assert_eq!(self.engine.text(), expected, "document text mismatch");
        self
    }

    pub fn assert_dirty(self, expected: bool) -> Self {
        assert_eq!(self.engine.is_dirty(), expected, "dirty flag mismatch");
        self
    }

    pub fn assert_bound_path(self, expected: Option<&Path>) -> Self {
        assert_eq!(
            self.engine.persist().bound_path(),
            expected,
            "bound path mismatch"
        );
        self
    }

    pub fn assert_cursor_offset(self, expected: usize) -> Self {
        assert_eq!(
            self.engine.state().cursor.offset,
            expected,
            "cursor offset mismatch"
        );
        self
    }

    /// Assert the spans of the active search, as `(start, end)` pairs.
    pub fn assert_search_spans(self, expected: &[(usize, usize)]) -> Self {
        let spans: Vec<(usize, usize)> = self
            .engine
            .state()
            .search
            .as_ref()
            .map(|s| s.spans.iter().map(|m| (m.start, m.end)).collect())
            .unwrap_or_default();
        assert_eq!(spans, expected, "search spans mismatch");
        self
    }

    /// Effects accumulated since the last drain.
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// Drain and return the accumulated effects.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub fn engine(&self) -> &EditorEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut EditorEngine {
        &mut self.engine
    }

    pub fn into_engine(self) -> EditorEngine {
        self.engine
    }
}

impl Default for TestEditor {
    fn default() -> Self {
        Self::new()
    }
}
