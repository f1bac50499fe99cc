//! FFI use-case API for UI-facing calls.
//!
//! # Responsibility
//! - Expose capture, planning, journaling, household, progress and document
//!   calls to the UI shell via FRB.
//! - Map core errors into flat response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every document call hydrates from the configured store before writing.
//! - Document calls are serialized within the process so whole-document
//!   writes never interleave.
//! - Dates cross the boundary as `YYYY-MM-DD`; enum values as their
//!   snake_case wire labels.

pub mod document;
pub mod entry;
pub mod household;
pub mod journal;
pub mod planner;
pub mod progress;

use chrono::NaiveDate;
use grounding_core::db::open_db;
use grounding_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, AppSession, AppState,
    CoreConfig, EntityId, LocalStore, ServiceResult, SqliteRecordRepository,
};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

static DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static DOCUMENT_LOCK: Mutex<()> = Mutex::new(());

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Whether the resulting document reached storage.
    pub persisted: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    pub(crate) fn success(message: impl Into<String>, persisted: bool) -> Self {
        Self {
            ok: true,
            persisted,
            message: message.into(),
        }
    }

    pub(crate) fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            persisted: false,
            message: message.into(),
        }
    }
}

/// Response envelope for calls that create one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityResponse {
    pub ok: bool,
    /// Created entity ID on success.
    pub id: Option<String>,
    pub persisted: bool,
    pub message: String,
}

impl EntityResponse {
    pub(crate) fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            persisted: false,
            message: message.into(),
        }
    }
}

/// Response envelope for on/off toggles (check-ins, grocery ticks).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleResponse {
    pub ok: bool,
    /// State after the toggle.
    pub on: bool,
    pub persisted: bool,
    pub message: String,
}

impl ToggleResponse {
    pub(crate) fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            on: false,
            persisted: false,
            message: message.into(),
        }
    }
}

/// Applies a service mutation and answers with a plain action envelope.
pub(crate) fn apply_change(
    db_path: &Path,
    operation: &str,
    message: &str,
    mutate: impl FnOnce(&mut AppState) -> ServiceResult<()>,
) -> ActionResponse {
    match run_change(db_path, mutate) {
        Ok(((), persisted)) => ActionResponse::success(message, persisted),
        Err(err) => ActionResponse::failure(format!("{operation} failed: {err}")),
    }
}

/// Applies a creating service call and answers with the new ID.
pub(crate) fn create_entity(
    db_path: &Path,
    operation: &str,
    message: &str,
    create: impl FnOnce(&mut AppState) -> ServiceResult<EntityId>,
) -> EntityResponse {
    match run_change(db_path, create) {
        Ok((id, persisted)) => EntityResponse {
            ok: true,
            id: Some(id),
            persisted,
            message: message.to_string(),
        },
        Err(err) => EntityResponse::failure(format!("{operation} failed: {err}")),
    }
}

/// Applies a toggling service call and reports the resulting state.
pub(crate) fn toggle_change(
    db_path: &Path,
    operation: &str,
    toggle: impl FnOnce(&mut AppState) -> ServiceResult<bool>,
) -> ToggleResponse {
    match run_change(db_path, toggle) {
        Ok((on, persisted)) => ToggleResponse {
            ok: true,
            on,
            persisted,
            message: if on { "Checked." } else { "Unchecked." }.to_string(),
        },
        Err(err) => ToggleResponse::failure(format!("{operation} failed: {err}")),
    }
}

pub(crate) fn run_change<T>(
    db_path: &Path,
    mutate: impl FnOnce(&mut AppState) -> ServiceResult<T>,
) -> Result<(T, bool), String> {
    with_session(db_path, |session| {
        let output = session.try_update(mutate).map_err(|err| err.to_string())?;
        Ok((output, session.phase().is_persisted()))
    })
}

pub(crate) fn with_session<T>(
    db_path: &Path,
    f: impl FnOnce(&mut AppSession<SqliteRecordRepository<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let _guard = DOCUMENT_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let conn = open_db(db_path).map_err(|err| format!("document DB open failed: {err}"))?;
    let mut session = AppSession::open(LocalStore::new(SqliteRecordRepository::new(&conn)));
    f(&mut session)
}

pub(crate) fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| CoreConfig::from_env().db_path)
        .clone()
}

/// Parses a snake_case wire label into one of the core enums.
pub(crate) fn parse_label<T: serde::de::DeserializeOwned>(raw: &str) -> Option<T> {
    serde_json::from_value(serde_json::Value::String(raw.trim().to_ascii_lowercase())).ok()
}

pub(crate) fn label_of<T: serde::Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(label)) => label,
        _ => String::new(),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| format!("invalid date `{}`; expected YYYY-MM-DD", raw.trim()))
}

/// Blank input means "no date".
pub(crate) fn parse_optional_date(raw: Option<String>) -> Result<Option<NaiveDate>, String> {
    non_blank(raw).map(|raw| parse_date(&raw)).transpose()
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}


#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, label_of, parse_date, parse_label, parse_optional_date,
    };
    use grounding_core::model::records::ProjectStatus;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn labels_use_wire_names() {
        assert_eq!(
            parse_label::<ProjectStatus>(" Set_Aside "),
            Some(ProjectStatus::SetAside)
        );
        assert_eq!(parse_label::<ProjectStatus>("paused"), None);
        assert_eq!(label_of(&ProjectStatus::SetAside), "set_aside");
    }

    #[test]
    fn dates_parse_strictly() {
        assert!(parse_date("2026-03-01").is_ok());
        assert!(parse_date("03/01/2026").unwrap_err().contains("YYYY-MM-DD"));
        assert_eq!(parse_optional_date(Some("  ".to_string())), Ok(None));
    }
}
