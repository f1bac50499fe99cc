//! Whole-document calls: theme, settings, reset and export.

use super::{apply_change, resolve_db_path, with_session, ActionResponse};
use grounding_core::db::open_db;
use grounding_core::service::progress_service;
use grounding_core::{SqliteRecordRepository, Theme, ThemeStore};
use log::warn;
use std::path::Path;

/// Exported document payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResponse {
    pub ok: bool,
    /// Pretty-printed document JSON; empty on failure.
    pub json: String,
    pub message: String,
}

/// Returns the persisted theme identifier (`default|ink|80s`).
///
/// # FFI contract
/// - Never fails; storage problems read as `default`.
#[flutter_rust_bridge::frb(sync)]
pub fn theme_get() -> String {
    theme_get_at(&resolve_db_path())
}

/// Persists the theme identifier.
#[flutter_rust_bridge::frb(sync)]
pub fn theme_set(theme: String) -> ActionResponse {
    theme_set_at(&resolve_db_path(), &theme)
}

/// Toggles whether overdue tasks are highlighted.
#[flutter_rust_bridge::frb(sync)]
pub fn settings_set_show_overdue(show_overdue: bool) -> ActionResponse {
    set_show_overdue_at(&resolve_db_path(), show_overdue)
}

/// Removes the persisted document; the next hydrate yields the default.
///
/// Fails when the stored document could not be removed, in which case it
/// will be loaded again on the next call.
#[flutter_rust_bridge::frb(sync)]
pub fn state_reset() -> ActionResponse {
    reset_at(&resolve_db_path())
}

/// Exports the persisted document as JSON.
#[flutter_rust_bridge::frb(sync)]
pub fn state_export_json() -> ExportResponse {
    export_at(&resolve_db_path())
}

pub(crate) fn theme_get_at(db_path: &Path) -> String {
    match open_db(db_path) {
        Ok(conn) => ThemeStore::new(SqliteRecordRepository::new(&conn))
            .current()
            .as_str()
            .to_string(),
        Err(err) => {
            warn!("event=theme_get module=ffi status=fallback error={err}");
            Theme::Default.as_str().to_string()
        }
    }
}

pub(crate) fn theme_set_at(db_path: &Path, raw: &str) -> ActionResponse {
    let theme = match raw.parse::<Theme>() {
        Ok(theme) => theme,
        Err(err) => return ActionResponse::failure(err.to_string()),
    };
    match open_db(db_path) {
        Ok(conn) => {
            let persisted = ThemeStore::new(SqliteRecordRepository::new(&conn)).set(theme);
            ActionResponse::success(format!("Theme set to {theme}."), persisted)
        }
        Err(err) => ActionResponse::failure(format!("theme_set failed: {err}")),
    }
}

pub(crate) fn set_show_overdue_at(db_path: &Path, show_overdue: bool) -> ActionResponse {
    apply_change(db_path, "settings_set_show_overdue", "Settings saved.", |state| {
        progress_service::set_show_overdue(state, show_overdue);
        Ok(())
    })
}

pub(crate) fn reset_at(db_path: &Path) -> ActionResponse {
    match with_session(db_path, |session| Ok(session.reset())) {
        Ok(removed) => reset_outcome(removed),
        Err(err) => ActionResponse::failure(format!("state_reset failed: {err}")),
    }
}

fn reset_outcome(removed: bool) -> ActionResponse {
    if removed {
        ActionResponse::success("Document reset.", true)
    } else {
        ActionResponse::failure("state_reset failed: stored document could not be removed")
    }
}

pub(crate) fn export_at(db_path: &Path) -> ExportResponse {
    match with_session(db_path, |session| {
        serde_json::to_string_pretty(session.state()).map_err(|err| err.to_string())
    }) {
        Ok(json) => ExportResponse {
            ok: true,
            json,
            message: "Document exported.".to_string(),
        },
        Err(err) => ExportResponse {
            ok: false,
            json: String::new(),
            message: format!("state_export_json failed: {err}"),
        },
    }
}
