//! Persisted application document model.
//!
//! # Responsibility
//! - Define every entity stored in the single `AppState` document.
//! - Keep the JSON wire shape stable (camelCase fields, snake_case enums).
//!
//! # Invariants
//! - Identifiers are opaque strings generated once and never reused.
//! - `created_at` and date-like fields are never rewritten after creation.
//! - Optional fields are omitted from the wire form when absent.

pub mod draft;
pub mod habit;
pub mod records;
pub mod state;
pub mod task;

use uuid::Uuid;

/// Opaque identifier shared by every document entity.
///
/// Kept as `String` rather than `Uuid` because documents written by older
/// clients carry non-UUID identifiers.
pub type EntityId = String;

/// Generates a fresh identifier for a new entity.
pub fn new_entity_id() -> EntityId {
    Uuid::new_v4().to_string()
}
