//! Capture and clarify calls.

use super::{
    label_of, non_blank, parse_label, resolve_db_path, run_change, with_session, ActionResponse,
};
use grounding_core::{capture, split_capture, Clarification, DraftItem, DraftKind, DraftStatus};
use std::path::Path;

/// Capture response: one draft ID per accepted line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureResponse {
    pub ok: bool,
    pub draft_ids: Vec<String>,
    pub persisted: bool,
    pub message: String,
}

/// Flat draft projection for the clarify card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftView {
    pub id: String,
    pub text: String,
    /// RFC 3339 capture time.
    pub created_at: String,
    /// `task|habit|log|idea|unknown`.
    pub kind: String,
    /// `needs_clarification|set_aside|confirmed|deleted`.
    pub status: String,
}

/// Clarify queue front plus queue depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextDraftResponse {
    pub ok: bool,
    /// Front-most draft awaiting triage, if any.
    pub draft: Option<DraftView>,
    /// Drafts still waiting for triage, including `draft`.
    pub pending: u32,
    pub message: String,
}

/// Splits brain-dump text and enqueues one draft per line.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Blank input succeeds with no drafts and no write.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_capture(text: String) -> CaptureResponse {
    capture_at(&resolve_db_path(), &text)
}

/// Returns the draft currently offered for clarification.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_next_draft() -> NextDraftResponse {
    next_draft_at(&resolve_db_path())
}

/// Removes a draft outright (undo of a capture).
///
/// An ID that is already gone succeeds without touching storage.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_dismiss_draft(draft_id: String) -> ActionResponse {
    dismiss_draft_at(&resolve_db_path(), &draft_id)
}

/// Moves a draft to `status` (`needs_clarification|set_aside|confirmed|deleted`).
#[flutter_rust_bridge::frb(sync)]
pub fn entry_set_draft_status(draft_id: String, status: String) -> ActionResponse {
    set_draft_status_at(&resolve_db_path(), &draft_id, &status)
}

/// Records the user's classification of a draft.
///
/// Blank `category`/`kind` are treated as not chosen.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_clarify_draft(
    draft_id: String,
    category: Option<String>,
    kind: Option<String>,
) -> ActionResponse {
    clarify_draft_at(&resolve_db_path(), &draft_id, category, kind)
}

pub(crate) fn capture_at(db_path: &Path, text: &str) -> CaptureResponse {
    let lines = split_capture(text);
    if lines.is_empty() {
        return CaptureResponse {
            ok: true,
            draft_ids: Vec::new(),
            persisted: false,
            message: "Nothing to capture.".to_string(),
        };
    }

    match with_session(db_path, |session| {
        let ids = session
            .update(|state| capture::enqueue(&mut state.drafts, &lines))
            .map_err(|err| err.to_string())?;
        Ok((ids, session.phase().is_persisted()))
    }) {
        Ok((draft_ids, persisted)) => CaptureResponse {
            ok: true,
            message: format!("Captured {} draft(s).", draft_ids.len()),
            draft_ids,
            persisted,
        },
        Err(err) => CaptureResponse {
            ok: false,
            draft_ids: Vec::new(),
            persisted: false,
            message: format!("entry_capture failed: {err}"),
        },
    }
}

pub(crate) fn next_draft_at(db_path: &Path) -> NextDraftResponse {
    match with_session(db_path, |session| {
        let drafts = &session.state().drafts;
        let draft = capture::next_for_clarification(drafts).map(to_draft_view);
        let pending = capture::pending(drafts).count();
        Ok((draft, pending))
    }) {
        Ok((draft, pending)) => NextDraftResponse {
            ok: true,
            message: if draft.is_some() {
                format!("{pending} draft(s) waiting.")
            } else {
                "Queue is clear.".to_string()
            },
            draft,
            pending: u32::try_from(pending).unwrap_or(u32::MAX),
        },
        Err(err) => NextDraftResponse {
            ok: false,
            draft: None,
            pending: 0,
            message: format!("entry_next_draft failed: {err}"),
        },
    }
}

pub(crate) fn dismiss_draft_at(db_path: &Path, draft_id: &str) -> ActionResponse {
    let draft_id = draft_id.trim();
    match with_session(db_path, |session| {
        let present = session.state().drafts.iter().any(|draft| draft.id == draft_id);
        if present {
            session
                .update(|state| capture::dequeue(&mut state.drafts, draft_id))
                .map_err(|err| err.to_string())?;
        }
        Ok((present, session.phase().is_persisted()))
    }) {
        Ok((true, persisted)) => ActionResponse::success("Draft dismissed.", persisted),
        Ok((false, persisted)) => ActionResponse::success("Draft already dismissed.", persisted),
        Err(err) => ActionResponse::failure(format!("entry_dismiss_draft failed: {err}")),
    }
}

pub(crate) fn set_draft_status_at(db_path: &Path, draft_id: &str, status: &str) -> ActionResponse {
    let status = match parse_label::<DraftStatus>(status) {
        Some(status) => status,
        None => return ActionResponse::failure(format!("unsupported draft status: {status}")),
    };
    let draft_id = draft_id.trim();
    super::apply_change(db_path, "entry_set_draft_status", "Draft updated.", |state| {
        capture::set_status(&mut state.drafts, draft_id, status)
    })
}

pub(crate) fn clarify_draft_at(
    db_path: &Path,
    draft_id: &str,
    category: Option<String>,
    kind: Option<String>,
) -> ActionResponse {
    let kind = match non_blank(kind) {
        Some(raw) => match parse_label::<DraftKind>(&raw) {
            Some(kind) => Some(kind),
            None => return ActionResponse::failure(format!("unsupported draft kind: {raw}")),
        },
        None => None,
    };
    let clarification = Clarification {
        category: non_blank(category).map(|value| value.to_ascii_lowercase()),
        kind,
    };
    let draft_id = draft_id.trim();
    match run_change(db_path, |state| {
        capture::clarify(&mut state.drafts, draft_id, clarification)
    }) {
        Ok((_, persisted)) => ActionResponse::success("Draft clarified.", persisted),
        Err(err) => ActionResponse::failure(format!("entry_clarify_draft failed: {err}")),
    }
}

fn to_draft_view(draft: &DraftItem) -> DraftView {
    DraftView {
        id: draft.id.clone(),
        text: draft.text.clone(),
        created_at: draft.created_at.to_rfc3339(),
        kind: label_of(&draft.kind),
        status: label_of(&draft.status),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        capture_at, clarify_draft_at, dismiss_draft_at, next_draft_at, set_draft_status_at,
    };
    use crate::api::document::export_at;
    use crate::api::test_support::temp_db;
    use grounding_core::db::open_db;
    use grounding_core::APP_STATE_KEY;

    fn stored_document(db: &std::path::Path) -> (String, i64) {
        let conn = open_db(db).expect("open db");
        conn.query_row(
            "SELECT value, updated_at FROM records WHERE key = ?1",
            [APP_STATE_KEY],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .expect("stored document")
    }

    #[test]
    fn capture_then_next_draft_surfaces_newest_batch() {
        let (_dir, db) = temp_db();
        assert!(capture_at(&db, "- older").ok);
        let created = capture_at(&db, "newer\n\nnewest");
        assert!(created.ok, "{}", created.message);
        assert_eq!(created.draft_ids.len(), 2);
        assert!(created.persisted);

        let next = next_draft_at(&db);
        assert!(next.ok, "{}", next.message);
        assert_eq!(next.pending, 3);
        let draft = next.draft.expect("front draft");
        assert_eq!(draft.id, created.draft_ids[0]);
        assert_eq!(draft.text, "newer");
        assert_eq!(draft.kind, "unknown");
        assert_eq!(draft.status, "needs_clarification");
    }

    #[test]
    fn blank_capture_is_a_successful_no_op() {
        let (_dir, db) = temp_db();
        let response = capture_at(&db, "  \n\t\n\r\n");
        assert!(response.ok);
        assert!(!response.persisted);
        assert!(response.draft_ids.is_empty());
        assert_eq!(next_draft_at(&db).pending, 0);
    }

    #[test]
    fn dismiss_removes_draft_and_repeat_is_a_quiet_success() {
        let (_dir, db) = temp_db();
        let created = capture_at(&db, "oops");
        let id = created.draft_ids[0].clone();

        let first = dismiss_draft_at(&db, &id);
        assert!(first.ok && first.persisted, "{}", first.message);
        assert!(next_draft_at(&db).draft.is_none());
        let after_dismiss = stored_document(&db);

        let again = dismiss_draft_at(&db, &id);
        assert!(again.ok, "{}", again.message);
        assert!(again.message.contains("already"));
        assert_eq!(stored_document(&db), after_dismiss);
    }

    #[test]
    fn dismissing_unknown_id_on_fresh_store_writes_nothing() {
        let (_dir, db) = temp_db();
        let response = dismiss_draft_at(&db, "ghost");
        assert!(response.ok, "{}", response.message);

        let conn = open_db(&db).expect("open db");
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))
            .expect("count");
        assert_eq!(rows, 0);
    }

    #[test]
    fn set_status_validates_label_and_hides_set_aside_drafts() {
        let (_dir, db) = temp_db();
        let id = capture_at(&db, "later").draft_ids[0].clone();

        let bad = set_draft_status_at(&db, &id, "someday");
        assert!(!bad.ok);
        assert!(bad.message.contains("unsupported draft status"));

        let ok = set_draft_status_at(&db, &id, " Set_Aside ");
        assert!(ok.ok, "{}", ok.message);
        assert_eq!(next_draft_at(&db).pending, 0);
    }

    #[test]
    fn clarify_sets_kind_and_rejects_unknown_kinds() {
        let (_dir, db) = temp_db();
        let id = capture_at(&db, "water plants").draft_ids[0].clone();

        let bad = clarify_draft_at(&db, &id, None, Some("chore".to_string()));
        assert!(!bad.ok);

        let ok = clarify_draft_at(&db, &id, Some(" Home ".to_string()), Some("habit".to_string()));
        assert!(ok.ok, "{}", ok.message);
        let draft = next_draft_at(&db).draft.expect("still pending");
        assert_eq!(draft.kind, "habit");

        let exported = export_at(&db);
        assert!(exported.json.contains("\"category\": \"home\""));
    }

    #[test]
    fn clarify_unknown_draft_fails() {
        let (_dir, db) = temp_db();
        let response = clarify_draft_at(&db, "ghost", None, None);
        assert!(!response.ok);
        assert!(response.message.contains("entry_clarify_draft failed"));
    }
}
