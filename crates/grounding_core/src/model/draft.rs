//! Brain-dump draft model.
//!
//! # Responsibility
//! - Represent one captured, not-yet-classified thought.
//! - Carry typed suggestion/clarification records instead of free-form bags.
//!
//! # Invariants
//! - New drafts start as `kind = Unknown`, `status = NeedsClarification`.
//! - Status only changes through explicit triage calls; nothing auto-promotes.

use super::task::Difficulty;
use super::{new_entity_id, EntityId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a draft probably is once clarified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftKind {
    Task,
    Habit,
    Log,
    Idea,
    Unknown,
}

/// Triage state of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftStatus {
    NeedsClarification,
    SetAside,
    Confirmed,
    /// Soft-delete tombstone.
    Deleted,
}

/// Machine- or UI-proposed classification, shown as a hint only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSuggestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<DraftKind>,
    /// Human-ish schedule phrase ("tomorrow evening").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

/// Classification chosen by the user during clarify.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clarification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<DraftKind>,
}

/// One unclassified captured entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftItem {
    pub id: EntityId,
    /// Raw captured line, already trimmed and bullet-stripped.
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub kind: DraftKind,
    pub status: DraftStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested: Option<DraftSuggestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clarified: Option<Clarification>,
}

impl DraftItem {
    /// Creates a pending draft with a generated ID.
    pub fn new(text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: new_entity_id(),
            text: text.into(),
            created_at,
            kind: DraftKind::Unknown,
            status: DraftStatus::NeedsClarification,
            suggested: None,
            clarified: None,
        }
    }

    /// Returns whether the draft still waits for triage.
    pub fn needs_clarification(&self) -> bool {
        self.status == DraftStatus::NeedsClarification
    }

    pub fn is_deleted(&self) -> bool {
        self.status == DraftStatus::Deleted
    }
}
