//! Remote collaborator contracts.
//!
//! # Responsibility
//! - Describe the identity service and the remote brain-dump sink as opaque
//!   synchronous adapters.
//! - Keep failure reporting uniform: one human-readable message per failure.
//!
//! # Invariants
//! - Core never inspects tokens or session payloads.
//! - No remote call is retried by core.

pub mod brain_dump;
pub mod identity;

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Failure reported by a remote collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    /// Service-provided, user-presentable message.
    pub message: String,
}

impl RemoteError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for RemoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for RemoteError {}
