//! Document mutation use-cases.
//!
//! # Responsibility
//! - Implement the actions pages perform on the `AppState` document.
//! - Keep every mutation a plain function over `&mut AppState` so the owning
//!   session decides when and how the result is persisted.
//!
//! # Invariants
//! - Services never rewrite `id`, `created_at` or date-like fields.
//! - Entities with a status field are soft-deleted through that status.
//! - Unknown IDs are reported as `ServiceError::NotFound`, never ignored.

pub mod habit_service;
pub mod household_service;
pub mod journal_service;
pub mod progress_service;
pub mod task_service;

use crate::model::EntityId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for document use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Referenced entity does not exist in the document.
    NotFound { entity: &'static str, id: EntityId },
    /// Input failed validation (blank title, out-of-range weekday, ...).
    InvalidInput(String),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
        }
    }
}

impl Error for ServiceError {}

/// Trims a user-provided title and rejects blank values.
pub(crate) fn normalize_title(field: &str, value: &str) -> ServiceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::InvalidInput(format!("{field} cannot be blank")));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn not_found(entity: &'static str, id: &str) -> ServiceError {
    ServiceError::NotFound {
        entity,
        id: id.to_string(),
    }
}
