//! Log and goal use-cases (money, home, creative, faith journaling).

use super::{normalize_title, not_found, ServiceError, ServiceResult};
use crate::model::records::{GoalItem, GoalReflection, GoalTimeframe, LogEntry};
use crate::model::state::AppState;
use crate::model::{new_entity_id, EntityId};
use chrono::{DateTime, NaiveDate, Utc};

/// Request model for one log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLog {
    /// Preset (`money`, `home`, `creative`, `faith`) or user-defined type.
    pub kind: String,
    pub date: NaiveDate,
    pub value: Option<String>,
    pub note: Option<String>,
    pub goal_ids: Option<Vec<EntityId>>,
}

/// Appends a log entry and returns its ID.
///
/// A log needs a type and at least one of `value`/`note` with content.
pub fn add_log(state: &mut AppState, request: NewLog, now: DateTime<Utc>) -> ServiceResult<EntityId> {
    let kind = normalize_title("log type", &request.kind)?.to_ascii_lowercase();
    let value = non_blank(request.value);
    let note = non_blank(request.note);
    if value.is_none() && note.is_none() {
        return Err(ServiceError::InvalidInput(
            "log needs a value or a note".to_string(),
        ));
    }

    let entry = LogEntry {
        id: new_entity_id(),
        kind,
        date: request.date,
        value,
        note,
        created_at: now,
        goal_ids: request.goal_ids,
    };
    let id = entry.id.clone();
    state.logs.push(entry);
    Ok(id)
}

/// Logs of one type, newest date first.
pub fn logs_of_kind<'a>(state: &'a AppState, kind: &str) -> Vec<&'a LogEntry> {
    let mut logs: Vec<&LogEntry> = state
        .logs
        .iter()
        .filter(|entry| entry.kind.eq_ignore_ascii_case(kind))
        .collect();
    logs.sort_by(|a, b| b.date.cmp(&a.date));
    logs
}

pub fn add_goal(
    state: &mut AppState,
    title: &str,
    timeframe: Option<GoalTimeframe>,
    now: DateTime<Utc>,
) -> ServiceResult<EntityId> {
    let goal = GoalItem {
        id: new_entity_id(),
        title: normalize_title("goal title", title)?,
        notes: None,
        timeframe,
        created_at: now,
        reflections: None,
    };
    let id = goal.id.clone();
    state.goals.push(goal);
    Ok(id)
}

/// Appends a reflection note to a goal.
pub fn add_reflection(
    state: &mut AppState,
    goal_id: &str,
    text: &str,
    now: DateTime<Utc>,
) -> ServiceResult<EntityId> {
    let text = normalize_title("reflection", text)?;
    let goal = state
        .goals
        .iter_mut()
        .find(|goal| goal.id == goal_id)
        .ok_or_else(|| not_found("goal", goal_id))?;

    let reflection = GoalReflection {
        id: new_entity_id(),
        created_at: now,
        text,
    };
    let id = reflection.id.clone();
    goal.reflections.get_or_insert_with(Vec::new).push(reflection);
    Ok(id)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
