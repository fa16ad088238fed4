//! Stateful editor engine: the headless controller.
//!
//! [`EditorEngine`] owns the editor state, the persistence manager, and
//! the autosave policy, and processes [`EditorEvent`]s into state changes
//! plus [`Effect`]s for the frontend to execute. Pure document transitions
//! live in [`crate::processor`]; this module layers file persistence,
//! search, and autosave on top.

use crate::{
    autosave::{AutosavePolicy, TickOutcome, DEFAULT_AUTOSAVE_INTERVAL},
    effects::Effect,
    events::EditorEvent,
    persist::PersistenceManager,
    processor,
    search::{self, CaseMatching},
    state::{EditorState, SearchState},
    status::StatusLine,
};
use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

/// Application name used in window titles.
const APP_NAME: &str = "Jot";

pub struct EditorEngine {
    state: EditorState,
    persist: PersistenceManager,
    autosave: AutosavePolicy,
}

impl EditorEngine {
    /// Creates a new engine with an empty document and the default
    /// autosave interval.
    pub fn new() -> Self {
        Self::with_autosave_interval(DEFAULT_AUTOSAVE_INTERVAL)
    }

    pub fn with_autosave_interval(interval: Duration) -> Self {
        tracing::info!(
            autosave_secs = interval.as_secs_f64(),
            "creating editor engine"
        );
        Self {
            state: EditorState::new(),
            persist: PersistenceManager::new(),
            autosave: AutosavePolicy::new(interval),
        }
    }

    /// Creates an engine with the given initial state.
    pub fn with_state(state: EditorState) -> Self {
        Self {
            state,
            persist: PersistenceManager::new(),
            autosave: AutosavePolicy::new(DEFAULT_AUTOSAVE_INTERVAL),
        }
    }

    /// Read-only access to the complete editor state, for rendering.
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Replaces the engine's state entirely, for tests and host
    /// integrations with their own document source.
    pub fn set_state(&mut self, state: EditorState) {
        self.state = state;
    }

    pub fn persist(&self) -> &PersistenceManager {
        &self.persist
    }

    pub fn autosave(&self) -> &AutosavePolicy {
        &self.autosave
    }

    pub fn autosave_mut(&mut self) -> &mut AutosavePolicy {
        &mut self.autosave
    }

    /// Returns the current text content of the document.
    pub fn text(&self) -> &str {
        self.state.text()
    }

    /// Returns whether the document has unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.state.is_dirty
    }

    /// Window title for the current binding, `"name - Jot"`.
    pub fn title(&self) -> String {
        format!("{} - {APP_NAME}", self.persist.display_name())
    }

    /// Status bar contents for the current state.
    pub fn status_line(&self) -> StatusLine {
        StatusLine::compute(&self.state, &self.persist)
    }

    /// Handles an event and returns any effects that should be executed.
    ///
    /// This is the main entry point for processing user input and timer
    /// firings. Explicit open/save errors come back as [`Effect::ShowError`]
    /// with no automatic retry; the frontend presents them and moves on.
    pub fn handle_event(&mut self, event: EditorEvent) -> Vec<Effect> {
        tracing::debug!(?event, "handling event");

        match event {
            EditorEvent::Insert { text } => {
                processor::insert_text(&mut self.state, &text);
                vec![]
            },
            EditorEvent::Backspace => {
                processor::backspace(&mut self.state);
                vec![]
            },
            EditorEvent::DeleteForward => {
                processor::delete_forward(&mut self.state);
                vec![]
            },
            EditorEvent::Move { motion } => {
                processor::apply_motion(&mut self.state, motion);
                vec![]
            },

            EditorEvent::NewFile => self.new_file(),
            EditorEvent::OpenFile { path } => self.open_file(path),
            EditorEvent::Save => self.save(),
            EditorEvent::SaveFileAs { path } => self.save_file_as(path),

            EditorEvent::Search { keyword } => self.run_search(keyword),
            EditorEvent::ClearSearch => {
                self.state.search = None;
                vec![]
            },

            EditorEvent::IncreaseFont => {
                self.state.view.font_size = self.state.view.font_size.increase();
                vec![]
            },
            EditorEvent::DecreaseFont => {
                self.state.view.font_size = self.state.view.font_size.decrease();
                vec![]
            },
            EditorEvent::ResetFont => {
                self.state.view.font_size = self.state.view.font_size.reset();
                vec![]
            },
            EditorEvent::ToggleTheme => {
                self.state.view.theme = self.state.view.theme.toggle();
                vec![]
            },

            EditorEvent::AutosaveTick => {
                let outcome = self.autosave.tick(&mut self.state, &mut self.persist);
                autosave_effects(outcome)
            },

            EditorEvent::Exit => {
                if self.state.is_dirty {
                    vec![Effect::ShowInfo {
                        message: "Unsaved changes; save first or force exit".to_string(),
                    }]
                } else {
                    vec![Effect::Exit]
                }
            },
            EditorEvent::ForceExit => vec![Effect::Exit],
        }
    }

    /// Fire the autosave tick if its deadline has passed.
    ///
    /// The host loop calls this after every wakeup with the current time;
    /// failures surface as status effects, never as errors.
    pub fn poll_autosave(&mut self, now: Instant) -> Vec<Effect> {
        match self.autosave.poll(now, &mut self.state, &mut self.persist) {
            Some(outcome) => autosave_effects(outcome),
            None => vec![],
        }
    }

    fn new_file(&mut self) -> Vec<Effect> {
        self.state.replace_content("");
        self.state.is_dirty = false;
        self.persist.reset();
        vec![Effect::SetTitle {
            title: self.title(),
        }]
    }

    fn open_file(&mut self, path: PathBuf) -> Vec<Effect> {
        match self.persist.read(&path) {
            Ok(content) => {
                self.state.replace_content(&content);
                self.state.is_dirty = false;
                vec![Effect::SetTitle {
                    title: self.title(),
                }]
            },
            Err(error) => vec![Effect::ShowError {
                message: format!("Open failed: {error}"),
            }],
        }
    }

    fn save(&mut self) -> Vec<Effect> {
        let Some(path) = self.persist.bound_path().map(Path::to_path_buf) else {
            // The frontend falls back to a save-as prompt on this.
            return vec![Effect::ShowError {
                message: "No file path set for the document".to_string(),
            }];
        };

        match self.persist.write(&path, self.state.text()) {
            Ok(()) => {
                self.state.is_dirty = false;
                vec![Effect::ShowInfo {
                    message: format!("Wrote {}", path.display()),
                }]
            },
            Err(error) => vec![Effect::ShowError {
                message: format!("Save failed: {error}"),
            }],
        }
    }

    fn save_file_as(&mut self, path: PathBuf) -> Vec<Effect> {
        match self.persist.write(&path, self.state.text()) {
            Ok(()) => {
                self.state.is_dirty = false;
                vec![
                    Effect::SetTitle {
                        title: self.title(),
                    },
                    Effect::ShowInfo {
                        message: format!("Wrote {}", path.display()),
                    },
                ]
            },
            Err(error) => vec![Effect::ShowError {
                message: format!("Save failed: {error}"),
            }],
        }
    }

    fn run_search(&mut self, keyword: String) -> Vec<Effect> {
        if keyword.is_empty() {
            self.state.search = None;
            return vec![];
        }

        let spans: Vec<_> =
            search::find_all(self.state.text(), &keyword, CaseMatching::Ignore).collect();
        let count = spans.len();
        tracing::debug!(keyword = %keyword, count, "search");
        self.state.search = Some(SearchState { keyword, spans });

        let message = match count {
            0 => "No matches".to_string(),
            1 => "1 match".to_string(),
            n => format!("{n} matches"),
        };
        vec![Effect::ShowInfo { message }]
    }
}

impl Default for EditorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EditorEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorEngine")
            .field("state", &self.state)
            .field("persist", &self.persist)
            .finish()
    }
}

fn autosave_effects(outcome: TickOutcome) -> Vec<Effect> {
    match outcome {
        // Passive outcomes stay silent; the log already has them.
        TickOutcome::NotBound | TickOutcome::Clean | TickOutcome::Saved { .. } => vec![],
        TickOutcome::Failed(error) => vec![Effect::ShowError {
            message: format!("Autosave failed: {error}"),
        }],
    }
}
