//! Clarify queue operations over the document's draft list.
//!
//! # Invariants
//! - New batches are prepended; order inside a batch is preserved.
//! - `dequeue` physically removes one entry; `set_status(Deleted)` is the
//!   soft-delete path that keeps the entry for review.
//! - Only `needs_clarification` drafts are surfaced for triage, one at a time.

use crate::model::draft::{Clarification, DraftItem, DraftStatus};
use crate::model::EntityId;
use crate::service::{ServiceError, ServiceResult};
use chrono::{DateTime, Utc};
use log::debug;

/// Enqueues one draft per line, stamped with the current time.
///
/// Returns the created IDs in line order.
pub fn enqueue(queue: &mut Vec<DraftItem>, lines: &[String]) -> Vec<EntityId> {
    enqueue_at(queue, lines, Utc::now())
}

/// Enqueues one draft per line with a caller-provided timestamp.
///
/// The whole batch shares `created_at` and lands in front of existing items.
/// An empty `lines` slice leaves the queue untouched.
pub fn enqueue_at(
    queue: &mut Vec<DraftItem>,
    lines: &[String],
    created_at: DateTime<Utc>,
) -> Vec<EntityId> {
    if lines.is_empty() {
        return Vec::new();
    }

    let mut batch: Vec<DraftItem> = lines
        .iter()
        .map(|line| DraftItem::new(line.as_str(), created_at))
        .collect();
    let ids = batch.iter().map(|draft| draft.id.clone()).collect();

    batch.append(queue);
    *queue = batch;
    debug!(
        "event=capture_enqueue module=capture status=ok added={} queued={}",
        lines.len(),
        queue.len()
    );
    ids
}

/// Removes the draft with `id`. Returns whether anything was removed.
pub fn dequeue(queue: &mut Vec<DraftItem>, id: &str) -> bool {
    match queue.iter().position(|draft| draft.id == id) {
        Some(index) => {
            queue.remove(index);
            true
        }
        None => false,
    }
}

/// Returns the single draft currently offered for clarification.
///
/// This is the front-most pending draft, i.e. one from the newest batch.
pub fn next_for_clarification(queue: &[DraftItem]) -> Option<&DraftItem> {
    queue.iter().find(|draft| draft.needs_clarification())
}

/// Iterates drafts still waiting for triage, in queue order.
pub fn pending(queue: &[DraftItem]) -> impl Iterator<Item = &DraftItem> {
    queue.iter().filter(|draft| draft.needs_clarification())
}

/// Records the user's classification of a draft.
///
/// The chosen kind, when present, also becomes the draft's `kind`.
pub fn clarify(
    queue: &mut [DraftItem],
    id: &str,
    clarification: Clarification,
) -> ServiceResult<()> {
    let draft = find_draft(queue, id)?;
    if let Some(kind) = clarification.kind {
        draft.kind = kind;
    }
    draft.clarified = Some(clarification);
    Ok(())
}

/// Moves a draft to an explicit triage status.
pub fn set_status(queue: &mut [DraftItem], id: &str, status: DraftStatus) -> ServiceResult<()> {
    let draft = find_draft(queue, id)?;
    draft.status = status;
    Ok(())
}

fn find_draft<'a>(queue: &'a mut [DraftItem], id: &str) -> ServiceResult<&'a mut DraftItem> {
    queue
        .iter_mut()
        .find(|draft| draft.id == id)
        .ok_or_else(|| ServiceError::NotFound {
            entity: "draft",
            id: id.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::{clarify, dequeue, enqueue, enqueue_at, next_for_clarification, pending, set_status};
    use crate::capture::split_capture;
    use crate::model::draft::{Clarification, DraftItem, DraftKind, DraftStatus};
    use crate::service::ServiceError;
    use chrono::{TimeZone, Utc};

    fn lines(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    fn texts(queue: &[DraftItem]) -> Vec<&str> {
        queue.iter().map(|draft| draft.text.as_str()).collect()
    }

    #[test]
    fn newest_batch_goes_first_and_keeps_batch_order() {
        let mut queue = Vec::new();
        enqueue(&mut queue, &lines(&["a", "b"]));
        enqueue(&mut queue, &lines(&["c"]));
        assert_eq!(texts(&queue), vec!["c", "a", "b"]);
    }

    #[test]
    fn batch_shares_timestamp_and_starts_pending() {
        let at = Utc.with_ymd_and_hms(2026, 1, 5, 8, 30, 0).unwrap();
        let mut queue = Vec::new();
        let ids = enqueue_at(&mut queue, &split_capture("- one\n- two"), at);

        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0], queue[0].id);
        assert_ne!(ids[0], ids[1]);
        for draft in &queue {
            assert_eq!(draft.created_at, at);
            assert_eq!(draft.kind, DraftKind::Unknown);
            assert_eq!(draft.status, DraftStatus::NeedsClarification);
        }
    }

    #[test]
    fn empty_batch_is_noop() {
        let mut queue = Vec::new();
        enqueue(&mut queue, &lines(&["keep"]));
        let before = queue.clone();

        assert!(enqueue(&mut queue, &[]).is_empty());
        assert_eq!(queue, before);
    }

    #[test]
    fn dequeue_every_new_id_restores_previous_queue() {
        let mut queue = Vec::new();
        enqueue(&mut queue, &lines(&["existing"]));
        let before = queue.clone();

        let ids = enqueue(&mut queue, &lines(&["x", "y", "z"]));
        for id in &ids {
            assert!(dequeue(&mut queue, id));
        }
        assert_eq!(queue, before);
    }

    #[test]
    fn dequeue_unknown_id_is_noop() {
        let mut queue = Vec::new();
        enqueue(&mut queue, &lines(&["x"]));
        assert!(!dequeue(&mut queue, "nope"));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn only_front_pending_draft_is_surfaced() {
        let mut queue = Vec::new();
        enqueue(&mut queue, &lines(&["old"]));
        let ids = enqueue(&mut queue, &lines(&["new"]));

        assert_eq!(next_for_clarification(&queue).unwrap().text, "new");

        set_status(&mut queue, &ids[0], DraftStatus::SetAside).unwrap();
        assert_eq!(next_for_clarification(&queue).unwrap().text, "old");
        assert_eq!(pending(&queue).count(), 1);
    }

    #[test]
    fn clarify_records_choice_without_promoting() {
        let mut queue = Vec::new();
        let ids = enqueue(&mut queue, &lines(&["water plants"]));

        clarify(
            &mut queue,
            &ids[0],
            Clarification {
                category: Some("home".to_string()),
                kind: Some(DraftKind::Habit),
            },
        )
        .unwrap();

        let draft = &queue[0];
        assert_eq!(draft.kind, DraftKind::Habit);
        assert_eq!(draft.status, DraftStatus::NeedsClarification);
        assert_eq!(
            draft.clarified.as_ref().and_then(|c| c.category.as_deref()),
            Some("home")
        );
    }

    #[test]
    fn soft_delete_keeps_entry_but_hides_it() {
        let mut queue = Vec::new();
        let ids = enqueue(&mut queue, &lines(&["maybe later"]));

        set_status(&mut queue, &ids[0], DraftStatus::Deleted).unwrap();
        assert_eq!(queue.len(), 1);
        assert!(queue[0].is_deleted());
        assert!(next_for_clarification(&queue).is_none());
    }

    #[test]
    fn triage_on_unknown_id_reports_not_found() {
        let mut queue: Vec<DraftItem> = Vec::new();
        let err = set_status(&mut queue, "ghost", DraftStatus::Confirmed).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "draft", .. }));
    }
}
