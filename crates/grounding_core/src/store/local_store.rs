//! Whole-document persistence over a record repository.

use crate::model::state::AppState;
use crate::repo::record_repo::RecordRepository;
use log::{debug, warn};

/// Record key holding the serialized `AppState` document.
pub const APP_STATE_KEY: &str = "grounding_app_v1";

/// Best-effort persistence for the application document.
///
/// A store without a repository ("detached") behaves like an environment with
/// no storage at all: loads return the fallback and writes do nothing.
pub struct LocalStore<R: RecordRepository> {
    repo: Option<R>,
}

impl<R: RecordRepository> LocalStore<R> {
    pub fn new(repo: R) -> Self {
        Self { repo: Some(repo) }
    }

    /// Creates a store with no persistence backend.
    pub fn detached() -> Self {
        Self { repo: None }
    }

    pub fn is_attached(&self) -> bool {
        self.repo.is_some()
    }

    /// Reads the persisted document.
    ///
    /// Returns `fallback` unchanged when detached, when no record exists, when
    /// the backend read fails, or when the record does not parse as a complete
    /// document. Never returns a partially parsed document.
    pub fn load(&self, fallback: AppState) -> AppState {
        let Some(repo) = self.repo.as_ref() else {
            return fallback;
        };

        let raw = match repo.read_record(APP_STATE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("event=state_load module=store status=miss");
                return fallback;
            }
            Err(err) => {
                warn!("event=state_load module=store status=error error_code=read_failed error={err}");
                return fallback;
            }
        };

        match serde_json::from_str::<AppState>(&raw) {
            Ok(state) => {
                debug!(
                    "event=state_load module=store status=ok bytes={}",
                    raw.len()
                );
                state
            }
            Err(err) => {
                // Error position only; serde messages never echo payload text.
                warn!(
                    "event=state_load module=store status=fallback error_code=parse_failed line={} column={}",
                    err.line(),
                    err.column()
                );
                fallback
            }
        }
    }

    /// Serializes the whole document and replaces the persisted record.
    ///
    /// Returns `true` when the write landed. Failures are logged and otherwise
    /// ignored; the caller's in-memory document stays authoritative.
    pub fn save(&self, state: &AppState) -> bool {
        let Some(repo) = self.repo.as_ref() else {
            return false;
        };

        let raw = match serde_json::to_string(state) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("event=state_save module=store status=error error_code=serialize_failed error={err}");
                return false;
            }
        };

        match repo.write_record(APP_STATE_KEY, &raw) {
            Ok(()) => {
                debug!(
                    "event=state_save module=store status=ok bytes={}",
                    raw.len()
                );
                true
            }
            Err(err) => {
                warn!("event=state_save module=store status=dropped error_code=write_failed error={err}");
                false
            }
        }
    }

    /// Removes the persisted record. In-memory copies are untouched.
    ///
    /// Returns `true` when storage no longer holds a document, including
    /// when there was none to remove.
    pub fn reset(&self) -> bool {
        let Some(repo) = self.repo.as_ref() else {
            return false;
        };

        match repo.remove_record(APP_STATE_KEY) {
            Ok(existed) => {
                debug!("event=state_reset module=store status=ok existed={existed}");
                true
            }
            Err(err) => {
                warn!("event=state_reset module=store status=error error_code=remove_failed error={err}");
                false
            }
        }
    }
}
