//! Autosave policy tests: tick decisions, idempotence, and resilience.

use jot::{AutosavePolicy, EditorState, PersistenceManager, TickOutcome};
use std::time::{Duration, Instant};

fn policy() -> AutosavePolicy {
    let mut policy = AutosavePolicy::new(Duration::from_secs(10));
    policy.start();
    policy
}

#[test]
fn unbound_tick_is_a_silent_noop() {
    let mut policy = policy();
    let mut state = EditorState::with_text("typed but never saved");
    state.is_dirty = true;
    let mut persist = PersistenceManager::new();

    let outcome = policy.tick(&mut state, &mut persist);
    assert!(matches!(outcome, TickOutcome::NotBound));
    assert!(state.is_dirty, "dirty flag is owned by the surface");
    assert!(policy.is_scheduled(), "tick must re-arm");
}

#[test]
fn clean_tick_skips_the_write() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("note.txt");

    let mut policy = policy();
    let mut state = EditorState::with_text("saved content");
    let mut persist = PersistenceManager::new();
    persist.write(&path, state.text()).expect("initial save");

    let before = std::fs::metadata(&path).expect("metadata").modified().expect("mtime");
    std::thread::sleep(Duration::from_millis(10));

    let outcome = policy.tick(&mut state, &mut persist);
    assert!(matches!(outcome, TickOutcome::Clean));

    let after = std::fs::metadata(&path).expect("metadata").modified().expect("mtime");
    assert_eq!(before, after, "clean document must not be rewritten");
}

#[test]
fn dirty_tick_writes_and_clears_the_flag() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("note.txt");

    let mut policy = policy();
    let mut state = EditorState::with_text("fresh edits");
    state.is_dirty = true;
    let mut persist = PersistenceManager::new();
    persist.write(&path, "stale").expect("bind");

    let outcome = policy.tick(&mut state, &mut persist);
    assert!(matches!(outcome, TickOutcome::Saved { .. }));
    assert!(!state.is_dirty);
    assert_eq!(
        std::fs::read_to_string(&path).expect("read back"),
        "fresh edits"
    );
}

#[test]
fn second_tick_without_changes_writes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("note.txt");

    let mut policy = policy();
    let mut state = EditorState::with_text("once");
    state.is_dirty = true;
    let mut persist = PersistenceManager::new();
    persist.write(&path, "").expect("bind");

    assert!(matches!(
        policy.tick(&mut state, &mut persist),
        TickOutcome::Saved { .. }
    ));
    assert!(matches!(
        policy.tick(&mut state, &mut persist),
        TickOutcome::Clean
    ));
}

#[test]
fn failed_tick_keeps_dirty_and_keeps_firing() {
    jot_log::test();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("doomed").join("note.txt");
    std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");

    let mut policy = policy();
    let mut state = EditorState::with_text("precious");
    state.is_dirty = true;
    let mut persist = PersistenceManager::new();
    persist.write(&path, "").expect("bind");

    // Remove the directory out from under the binding so writes fail.
    std::fs::remove_dir_all(dir.path().join("doomed")).expect("rmdir");

    let first = policy.tick(&mut state, &mut persist);
    assert!(matches!(first, TickOutcome::Failed(_)));
    assert!(state.is_dirty, "failure must not clear the dirty flag");
    assert!(policy.is_scheduled(), "failure must not stop the timer");

    // Still eligible: the next tick retries the same write.
    let second = policy.tick(&mut state, &mut persist);
    assert!(matches!(second, TickOutcome::Failed(_)));
    assert!(state.is_dirty);
    assert!(policy.is_scheduled());
}

#[test]
fn poll_respects_the_deadline() {
    let mut policy = AutosavePolicy::new(Duration::from_secs(3600));
    policy.start();

    let mut state = EditorState::new();
    let mut persist = PersistenceManager::new();

    assert!(policy
        .poll(Instant::now(), &mut state, &mut persist)
        .is_none());

    let deadline = policy.deadline().expect("scheduled");
    let outcome = policy.poll(deadline, &mut state, &mut persist);
    assert!(matches!(outcome, Some(TickOutcome::NotBound)));
}

#[test]
fn stopped_policy_never_fires_from_poll() {
    let mut policy = AutosavePolicy::new(Duration::from_secs(0));
    policy.start();
    policy.stop();

    let mut state = EditorState::new();
    let mut persist = PersistenceManager::new();
    assert!(policy
        .poll(Instant::now() + Duration::from_secs(60), &mut state, &mut persist)
        .is_none());
}
