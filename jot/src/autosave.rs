//! Periodic write-if-dirty policy.
//!
//! The policy is `Idle` until [`start`](AutosavePolicy::start) is called
//! and `Scheduled` from then on: every tick re-arms the deadline
//! unconditionally, so one failed write can never stop the timer. The host
//! event loop drives it cooperatively via [`poll`](AutosavePolicy::poll);
//! nothing here spawns a thread.

use crate::{
    persist::{PersistError, PersistenceManager},
    state::EditorState,
};
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

/// Interval used when the host does not configure one.
pub const DEFAULT_AUTOSAVE_INTERVAL: Duration = Duration::from_secs(10);

/// What one tick decided to do.
///
/// A failed write is reported here as data; the tick itself never raises,
/// so the scheduling loop is never broken by one failed save.
#[derive(Debug)]
pub enum TickOutcome {
    /// No path is bound; nothing to save to.
    NotBound,

    /// The document has no unsaved changes.
    Clean,

    /// The document was written and the dirty flag cleared.
    Saved { path: PathBuf },

    /// The write failed; the dirty flag stays set so the next tick
    /// retries.
    Failed(PersistError),
}

/// Fixed-interval autosave with an explicit deadline and stop handle.
#[derive(Debug)]
pub struct AutosavePolicy {
    interval: Duration,
    next_tick: Option<Instant>,
}

impl AutosavePolicy {
    /// Create an idle policy; no tick fires until [`start`](Self::start).
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_tick: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Arm the first deadline, one interval from now.
    pub fn start(&mut self) {
        tracing::debug!(interval_secs = self.interval.as_secs_f64(), "autosave armed");
        self.next_tick = Some(Instant::now() + self.interval);
    }

    /// Disarm the timer, for clean shutdown and tests.
    pub fn stop(&mut self) {
        tracing::debug!("autosave disarmed");
        self.next_tick = None;
    }

    pub fn is_scheduled(&self) -> bool {
        self.next_tick.is_some()
    }

    /// The next firing time, if armed. The host sleeps until this.
    pub fn deadline(&self) -> Option<Instant> {
        self.next_tick
    }

    /// Fire the tick if its deadline has passed.
    ///
    /// Returns `None` while idle or not yet due. When due, runs
    /// [`tick`](Self::tick) (which re-arms) and returns its outcome.
    pub fn poll(
        &mut self,
        now: Instant,
        state: &mut EditorState,
        persist: &mut PersistenceManager,
    ) -> Option<TickOutcome> {
        let deadline = self.next_tick?;
        if now < deadline {
            return None;
        }
        Some(self.tick(state, persist))
    }

    /// One firing of the autosave decision logic.
    ///
    /// Writes the document if a path is bound and the dirty flag is set;
    /// clears the flag only after a successful write. Re-arms the deadline
    /// unconditionally, whatever the outcome.
    pub fn tick(
        &mut self,
        state: &mut EditorState,
        persist: &mut PersistenceManager,
    ) -> TickOutcome {
        self.next_tick = Some(Instant::now() + self.interval);

        let Some(path) = persist.bound_path().map(PathBuf::from) else {
            return TickOutcome::NotBound;
        };
        if !state.is_dirty {
            return TickOutcome::Clean;
        }

        match persist.write(&path, state.text()) {
            Ok(()) => {
                state.is_dirty = false;
                tracing::debug!(path = %path.display(), "autosaved");
                TickOutcome::Saved { path }
            },
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "autosave failed");
                TickOutcome::Failed(error)
            },
        }
    }
}

impl Default for AutosavePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_AUTOSAVE_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_until_started() {
        let policy = AutosavePolicy::default();
        assert!(!policy.is_scheduled());
        assert!(policy.deadline().is_none());
    }

    #[test]
    fn poll_before_deadline_does_nothing() {
        let mut policy = AutosavePolicy::new(Duration::from_secs(3600));
        policy.start();

        let mut state = EditorState::new();
        let mut persist = PersistenceManager::new();
        assert!(policy
            .poll(Instant::now(), &mut state, &mut persist)
            .is_none());
    }

    #[test]
    fn tick_without_binding_is_a_noop_and_rearms() {
        let mut policy = AutosavePolicy::default();
        let mut state = EditorState::with_text("unsaved");
        state.is_dirty = true;
        let mut persist = PersistenceManager::new();

        let outcome = policy.tick(&mut state, &mut persist);
        assert!(matches!(outcome, TickOutcome::NotBound));
        assert!(state.is_dirty);
        assert!(policy.is_scheduled());
    }

    #[test]
    fn stop_disarms() {
        let mut policy = AutosavePolicy::default();
        policy.start();
        policy.stop();
        assert!(!policy.is_scheduled());
    }
}
