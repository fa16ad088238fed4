//! Core library for the `jot` notepad.
//!
//! A single text-editing surface with open/save/save-as, in-memory
//! search-and-highlight, adjustable font size, a dark/light theme toggle,
//! a status bar, and a periodic autosave timer. Everything here is
//! headless: the frontend owns the event loop, dialogs, and rendering, and
//! talks to the core through [`EditorEngine::handle_event`].
//!
//! Module map, leaf-first:
//!
//! - [`persist`] - whole-file read/write and the document's path binding
//! - [`search`] - keyword match enumeration over the character stream
//! - [`autosave`] - the write-if-dirty timer policy
//! - [`state`] / [`processor`] - the in-memory document and pure edits
//! - [`engine`] - the controller tying the above together
//! - [`status`] / [`theme`] / [`view`] - display state for the frontend

pub mod autosave;
pub mod effects;
pub mod engine;
pub mod events;
pub mod persist;
pub mod processor;
pub mod search;
pub mod state;
pub mod status;
pub mod testing;
pub mod theme;
pub mod view;

pub use autosave::{AutosavePolicy, TickOutcome, DEFAULT_AUTOSAVE_INTERVAL};
pub use effects::Effect;
pub use engine::EditorEngine;
pub use events::{EditorEvent, Motion};
pub use persist::{PersistError, PersistenceManager};
pub use search::{find_all, CaseMatching, MatchSpan, Matches};
pub use state::{Cursor, EditorState, SearchState, TextBuffer};
pub use status::StatusLine;
pub use theme::{Palette, Rgb, Theme};
pub use view::{FontSize, ViewSettings};
