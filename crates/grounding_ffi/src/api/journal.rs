//! Log and goal calls for the journaling pages.

use super::{
    create_entity, format_date, non_blank, parse_date, parse_label, resolve_db_path,
    with_session, EntityResponse,
};
use chrono::Utc;
use grounding_core::model::records::{GoalTimeframe, LogEntry};
use grounding_core::service::journal_service::{self, NewLog};
use std::path::Path;

/// Flat log projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogView {
    pub id: String,
    pub kind: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub value: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogListResponse {
    pub ok: bool,
    /// Newest date first.
    pub logs: Vec<LogView>,
    pub message: String,
}

/// Appends a log line of `kind` (`money|home|creative|faith` or custom).
///
/// Needs a non-blank `value` or `note`.
#[flutter_rust_bridge::frb(sync)]
pub fn log_add(
    kind: String,
    date: String,
    value: Option<String>,
    note: Option<String>,
) -> EntityResponse {
    add_log_at(&resolve_db_path(), &kind, &date, value, note)
}

/// Lists logs of one kind.
#[flutter_rust_bridge::frb(sync)]
pub fn logs_list(kind: String) -> LogListResponse {
    logs_at(&resolve_db_path(), &kind)
}

/// Adds a goal; `timeframe` is `short|long|someday` or blank.
#[flutter_rust_bridge::frb(sync)]
pub fn goal_add(title: String, timeframe: Option<String>) -> EntityResponse {
    add_goal_at(&resolve_db_path(), &title, timeframe)
}

#[flutter_rust_bridge::frb(sync)]
pub fn goal_add_reflection(goal_id: String, text: String) -> EntityResponse {
    add_reflection_at(&resolve_db_path(), &goal_id, &text)
}

pub(crate) fn add_log_at(
    db_path: &Path,
    kind: &str,
    date: &str,
    value: Option<String>,
    note: Option<String>,
) -> EntityResponse {
    let date = match parse_date(date) {
        Ok(date) => date,
        Err(err) => return EntityResponse::failure(err),
    };
    let request = NewLog {
        kind: kind.to_string(),
        date,
        value,
        note,
        goal_ids: None,
    };
    create_entity(db_path, "log_add", "Logged.", |state| {
        journal_service::add_log(state, request, Utc::now())
    })
}

pub(crate) fn logs_at(db_path: &Path, kind: &str) -> LogListResponse {
    match with_session(db_path, |session| {
        Ok(journal_service::logs_of_kind(session.state(), kind.trim())
            .into_iter()
            .map(to_log_view)
            .collect::<Vec<_>>())
    }) {
        Ok(logs) => LogListResponse {
            ok: true,
            message: format!("{} log(s).", logs.len()),
            logs,
        },
        Err(err) => LogListResponse {
            ok: false,
            logs: Vec::new(),
            message: format!("logs_list failed: {err}"),
        },
    }
}

pub(crate) fn add_goal_at(db_path: &Path, title: &str, timeframe: Option<String>) -> EntityResponse {
    let timeframe = match non_blank(timeframe) {
        Some(raw) => match parse_label::<GoalTimeframe>(&raw) {
            Some(timeframe) => Some(timeframe),
            None => return EntityResponse::failure(format!("unsupported goal timeframe: {raw}")),
        },
        None => None,
    };
    create_entity(db_path, "goal_add", "Goal added.", |state| {
        journal_service::add_goal(state, title, timeframe, Utc::now())
    })
}

pub(crate) fn add_reflection_at(db_path: &Path, goal_id: &str, text: &str) -> EntityResponse {
    create_entity(db_path, "goal_add_reflection", "Reflection saved.", |state| {
        journal_service::add_reflection(state, goal_id.trim(), text, Utc::now())
    })
}

fn to_log_view(entry: &LogEntry) -> LogView {
    LogView {
        id: entry.id.clone(),
        kind: entry.kind.clone(),
        date: format_date(entry.date),
        value: entry.value.clone(),
        note: entry.note.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::{add_goal_at, add_log_at, add_reflection_at, logs_at};
    use crate::api::document::export_at;
    use crate::api::test_support::temp_db;

    #[test]
    fn logs_are_listed_per_kind_newest_first() {
        let (_dir, db) = temp_db();
        assert!(add_log_at(&db, "Money", "2026-03-01", Some("12.50".into()), None).ok);
        assert!(add_log_at(&db, "money", "2026-03-03", None, Some("rent".into())).ok);
        assert!(add_log_at(&db, "faith", "2026-03-02", None, Some("psalm 23".into())).ok);

        let money = logs_at(&db, "money");
        assert!(money.ok, "{}", money.message);
        let dates: Vec<&str> = money.logs.iter().map(|log| log.date.as_str()).collect();
        assert_eq!(dates, vec!["2026-03-03", "2026-03-01"]);
        assert_eq!(money.logs[1].value.as_deref(), Some("12.50"));
    }

    #[test]
    fn empty_log_and_bad_date_are_refused() {
        let (_dir, db) = temp_db();
        let empty = add_log_at(&db, "home", "2026-03-01", Some("  ".into()), None);
        assert!(!empty.ok);
        assert!(empty.message.contains("log_add failed"));
        assert!(!add_log_at(&db, "home", "yesterday", None, Some("x".into())).ok);
        assert!(logs_at(&db, "home").logs.is_empty());
    }

    #[test]
    fn goals_take_timeframes_and_reflections() {
        let (_dir, db) = temp_db();
        assert!(!add_goal_at(&db, "run 5k", Some("eventually".into())).ok);

        let goal = add_goal_at(&db, "run 5k", Some("Short".into()));
        assert!(goal.ok, "{}", goal.message);
        let goal_id = goal.id.expect("goal id");

        let reflection = add_reflection_at(&db, &goal_id, "first mile done");
        assert!(reflection.ok, "{}", reflection.message);
        assert!(!add_reflection_at(&db, "ghost", "lost").ok);

        let value: serde_json::Value =
            serde_json::from_str(&export_at(&db).json).expect("valid json");
        assert_eq!(value["goals"][0]["timeframe"], "short");
        assert_eq!(value["goals"][0]["reflections"][0]["text"], "first mile done");
    }
}
