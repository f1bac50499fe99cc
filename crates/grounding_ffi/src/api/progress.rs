//! Experience and badge calls.

use super::{apply_change, resolve_db_path, run_change, with_session, ActionResponse};
use grounding_core::service::progress_service;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryXp {
    pub category: String,
    pub xp: u64,
}

/// Experience and badge snapshot for the progress visuals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSummary {
    pub ok: bool,
    pub xp_total: u64,
    /// Sorted by category.
    pub xp_by_category: Vec<CategoryXp>,
    pub badges: Vec<String>,
    pub message: String,
}

/// Adds `amount` experience to the global total and `category`.
#[flutter_rust_bridge::frb(sync)]
pub fn xp_award(category: String, amount: u64) -> ActionResponse {
    award_xp_at(&resolve_db_path(), &category, amount)
}

/// Unlocks a badge; unlocking twice succeeds without a second entry.
#[flutter_rust_bridge::frb(sync)]
pub fn badge_unlock(badge_id: String) -> ActionResponse {
    unlock_badge_at(&resolve_db_path(), &badge_id)
}

#[flutter_rust_bridge::frb(sync)]
pub fn progress_summary() -> ProgressSummary {
    summary_at(&resolve_db_path())
}

pub(crate) fn award_xp_at(db_path: &Path, category: &str, amount: u64) -> ActionResponse {
    apply_change(db_path, "xp_award", "Experience added.", |state| {
        progress_service::award_xp(state, category, amount)
    })
}

pub(crate) fn unlock_badge_at(db_path: &Path, badge_id: &str) -> ActionResponse {
    match run_change(db_path, |state| progress_service::unlock_badge(state, badge_id)) {
        Ok((true, persisted)) => ActionResponse::success("Badge unlocked.", persisted),
        Ok((false, persisted)) => ActionResponse::success("Badge already unlocked.", persisted),
        Err(err) => ActionResponse::failure(format!("badge_unlock failed: {err}")),
    }
}

pub(crate) fn summary_at(db_path: &Path) -> ProgressSummary {
    match with_session(db_path, |session| {
        let state = session.state();
        Ok(ProgressSummary {
            ok: true,
            xp_total: state.xp.global_total,
            xp_by_category: state
                .xp
                .by_category
                .iter()
                .map(|(category, xp)| CategoryXp {
                    category: category.clone(),
                    xp: *xp,
                })
                .collect(),
            badges: state.badges.unlocked.clone(),
            message: String::new(),
        })
    }) {
        Ok(summary) => summary,
        Err(err) => ProgressSummary {
            ok: false,
            xp_total: 0,
            xp_by_category: Vec::new(),
            badges: Vec::new(),
            message: format!("progress_summary failed: {err}"),
        },
    }
}
