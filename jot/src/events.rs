//! Event types for the jot editor.
//!
//! Events are pure data describing input or external triggers; they carry
//! no behavior. Dialog interaction (choosing a path, entering a keyword,
//! confirming a destructive action) belongs to the frontend, which passes
//! the result along in the event.

use std::path::PathBuf;

/// Cursor motions over the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    DocStart,
    DocEnd,
}

/// Events that the editor can process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// Insert text at the cursor (typing, paste).
    Insert { text: String },

    /// Delete the char before the cursor.
    Backspace,

    /// Delete the char after the cursor.
    DeleteForward,

    /// Move the cursor.
    Move { motion: Motion },

    /// Clear the document and its path binding. The frontend confirms
    /// before sending this when the document is dirty.
    NewFile,

    /// Load a file chosen by the user.
    OpenFile { path: PathBuf },

    /// Write the document to its bound path.
    Save,

    /// Write the document to a path chosen by the user and rebind.
    SaveFileAs { path: PathBuf },

    /// Find and highlight every occurrence of `keyword`.
    Search { keyword: String },

    /// Drop the current search highlights.
    ClearSearch,

    IncreaseFont,
    DecreaseFont,
    ResetFont,

    /// Flip between the light and dark themes.
    ToggleTheme,

    /// One firing of the autosave timer.
    AutosaveTick,

    /// Exit the editor; refused with a notice while dirty.
    Exit,

    /// Exit regardless of unsaved changes, after the frontend confirmed.
    ForceExit,
}
