use grounding_core::capture::{dequeue, enqueue, next_for_clarification, pending, set_status};
use grounding_core::db::open_db_in_memory;
use grounding_core::{
    split_capture, AppSession, AppState, DraftStatus, LocalStore, MemoryRecordRepository,
    SessionError, SessionPhase, SqliteRecordRepository,
};

fn texts(state: &AppState) -> Vec<&str> {
    state.drafts.iter().map(|draft| draft.text.as_str()).collect()
}

#[test]
fn brain_dump_lines_land_newest_batch_first() {
    let conn = open_db_in_memory().unwrap();
    let mut session = AppSession::open(LocalStore::new(SqliteRecordRepository::new(&conn)));

    session
        .update(|state| enqueue(&mut state.drafts, &split_capture("- a\n\n  • b  ")))
        .unwrap();
    session
        .update(|state| enqueue(&mut state.drafts, &split_capture("* c\r\n")))
        .unwrap();

    assert_eq!(texts(session.state()), vec!["c", "a", "b"]);
    assert!(session
        .state()
        .drafts
        .iter()
        .all(|draft| draft.status == DraftStatus::NeedsClarification));
}

#[test]
fn dequeue_after_enqueue_restores_previous_queue() {
    let mut session = AppSession::open(LocalStore::new(MemoryRecordRepository::new()));
    session
        .update(|state| enqueue(&mut state.drafts, &split_capture("keep me")))
        .unwrap();
    let before = session.state().drafts.clone();

    let ids = session
        .update(|state| enqueue(&mut state.drafts, &split_capture("temporary")))
        .unwrap();
    let removed = session
        .update(|state| dequeue(&mut state.drafts, &ids[0]))
        .unwrap();

    assert!(removed);
    assert_eq!(session.state().drafts, before);
}

#[test]
fn blank_capture_changes_nothing() {
    let mut session = AppSession::open(LocalStore::new(MemoryRecordRepository::new()));
    let ids = session
        .update(|state| enqueue(&mut state.drafts, &split_capture(" \n \t\r\n  ")))
        .unwrap();

    assert!(ids.is_empty());
    assert!(session.state().drafts.is_empty());
}

#[test]
fn bare_bullet_line_is_captured_verbatim() {
    let mut session = AppSession::open(LocalStore::new(MemoryRecordRepository::new()));
    let ids = session
        .update(|state| enqueue(&mut state.drafts, &split_capture(" \n - \n\t")))
        .unwrap();

    assert_eq!(ids.len(), 1);
    assert_eq!(texts(session.state()), vec!["-"]);
}

#[test]
fn set_aside_drafts_leave_the_clarify_front() {
    let mut session = AppSession::open(LocalStore::new(MemoryRecordRepository::new()));
    let ids = session
        .update(|state| enqueue(&mut state.drafts, &split_capture("first\nsecond")))
        .unwrap();

    session
        .try_update(|state| set_status(&mut state.drafts, &ids[0], DraftStatus::SetAside))
        .unwrap();

    let state = session.state();
    assert_eq!(next_for_clarification(&state.drafts).unwrap().text, "second");
    assert_eq!(pending(&state.drafts).count(), 1);
}

#[test]
fn unknown_draft_status_change_keeps_document_untouched() {
    let mut session = AppSession::open(LocalStore::new(MemoryRecordRepository::new()));
    session
        .update(|state| enqueue(&mut state.drafts, &split_capture("only")))
        .unwrap();
    let before = session.state().clone();

    let err = session
        .try_update(|state| set_status(&mut state.drafts, "ghost", DraftStatus::Deleted))
        .unwrap_err();

    assert!(matches!(err, SessionError::Service(_)));
    assert_eq!(*session.state(), before);
    assert_eq!(session.phase(), SessionPhase::Persisted);
}

#[test]
fn capture_is_rejected_before_hydration() {
    let mut session = AppSession::new(LocalStore::new(MemoryRecordRepository::new()));
    let err = session
        .update(|state| enqueue(&mut state.drafts, &split_capture("too early")))
        .unwrap_err();

    assert!(matches!(err, SessionError::NotHydrated));
    assert!(session.state().drafts.is_empty());
}
