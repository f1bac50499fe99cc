//! Core domain logic for the grounding app.
//! This crate is the single source of truth for document invariants.

pub mod capture;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod remote;
pub mod repo;
pub mod service;
pub mod store;
pub mod theme;

pub use capture::{split_capture, split_lines};
pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::draft::{Clarification, DraftItem, DraftKind, DraftStatus, DraftSuggestion};
pub use model::state::AppState;
pub use model::{new_entity_id, EntityId};
pub use remote::brain_dump::{submit_brain_dump, BrainDumpError, BrainDumpSink};
pub use remote::identity::{authenticate, AuthMode, Credential, IdentityService, UserProfile};
pub use remote::{RemoteError, RemoteResult};
pub use repo::record_repo::{
    MemoryRecordRepository, RecordRepository, RepoError, RepoResult, SqliteRecordRepository,
};
pub use service::{ServiceError, ServiceResult};
pub use store::local_store::{LocalStore, APP_STATE_KEY};
pub use store::session::{AppSession, SessionError, SessionPhase, SessionResult};
pub use theme::{Theme, ThemeStore, THEME_KEY};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
