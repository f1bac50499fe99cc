//! To-do, project and habit calls.
//!
//! # Invariants
//! - "Today" is always supplied by the caller, so bucket and due queries
//!   follow the device's local calendar.

use super::{
    apply_change, create_entity, format_date, label_of, non_blank, parse_date, parse_label,
    parse_optional_date, resolve_db_path, toggle_change, with_session, ActionResponse,
    EntityResponse, ToggleResponse,
};
use chrono::{NaiveDate, Utc};
use grounding_core::model::habit::HabitItem;
use grounding_core::model::records::ProjectStatus;
use grounding_core::model::task::{Difficulty, TaskItem};
use grounding_core::service::habit_service::{self, NewHabit};
use grounding_core::service::task_service::{self, NewTask};
use std::path::Path;

/// Flat task projection for the to-do page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    pub id: String,
    pub title: String,
    pub category: Option<String>,
    /// `easy|medium|hard`.
    pub difficulty: String,
    /// `YYYY-MM-DD` when scheduled.
    pub scheduled_for: Option<String>,
    pub project_id: Option<String>,
    /// Scheduled before the query date and still active.
    pub overdue: bool,
}

/// Active tasks grouped by time horizon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskBucketsResponse {
    pub ok: bool,
    pub today: Vec<TaskView>,
    pub tomorrow: Vec<TaskView>,
    pub week: Vec<TaskView>,
    pub future: Vec<TaskView>,
    pub message: String,
}

impl TaskBucketsResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            today: Vec::new(),
            tomorrow: Vec::new(),
            week: Vec::new(),
            future: Vec::new(),
            message: message.into(),
        }
    }
}

/// Flat habit projection with the check-in state for the queried day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitView {
    pub id: String,
    pub title: String,
    pub category: Option<String>,
    pub checked_in: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitsDueResponse {
    pub ok: bool,
    pub habits: Vec<HabitView>,
    pub message: String,
}

/// Adds an active task.
///
/// `scheduled_for` is `YYYY-MM-DD` or blank; `difficulty` is
/// `easy|medium|hard` or blank for `easy`.
#[flutter_rust_bridge::frb(sync)]
pub fn task_add(
    title: String,
    scheduled_for: Option<String>,
    category: Option<String>,
    difficulty: Option<String>,
) -> EntityResponse {
    add_task_at(&resolve_db_path(), &title, scheduled_for, category, difficulty)
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_complete(task_id: String) -> ActionResponse {
    complete_task_at(&resolve_db_path(), &task_id)
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_reopen(task_id: String) -> ActionResponse {
    reopen_task_at(&resolve_db_path(), &task_id)
}

/// Soft-deletes a task.
#[flutter_rust_bridge::frb(sync)]
pub fn task_archive(task_id: String) -> ActionResponse {
    archive_task_at(&resolve_db_path(), &task_id)
}

/// Reschedules a task; blank `scheduled_for` unschedules it.
#[flutter_rust_bridge::frb(sync)]
pub fn task_schedule(task_id: String, scheduled_for: Option<String>) -> ActionResponse {
    schedule_task_at(&resolve_db_path(), &task_id, scheduled_for)
}

/// Groups active tasks relative to `today` (`YYYY-MM-DD`).
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_by_bucket(today: String) -> TaskBucketsResponse {
    tasks_by_bucket_at(&resolve_db_path(), &today)
}

#[flutter_rust_bridge::frb(sync)]
pub fn project_add(title: String) -> EntityResponse {
    add_project_at(&resolve_db_path(), &title)
}

/// Links a task into a project, moving it out of any previous project.
#[flutter_rust_bridge::frb(sync)]
pub fn project_attach_task(project_id: String, task_id: String) -> ActionResponse {
    attach_task_at(&resolve_db_path(), &project_id, &task_id)
}

/// Moves a project to `active|set_aside|completed|deleted`.
#[flutter_rust_bridge::frb(sync)]
pub fn project_set_status(project_id: String, status: String) -> ActionResponse {
    set_project_status_at(&resolve_db_path(), &project_id, &status)
}

/// Adds a habit. `None` means daily; otherwise weekdays `0..=6` from Sunday.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_add(title: String, days_of_week: Option<Vec<u8>>) -> EntityResponse {
    add_habit_at(&resolve_db_path(), &title, days_of_week)
}

/// Flips the check-in for `date` (`YYYY-MM-DD`).
#[flutter_rust_bridge::frb(sync)]
pub fn habit_toggle_check_in(habit_id: String, date: String) -> ToggleResponse {
    toggle_check_in_at(&resolve_db_path(), &habit_id, &date)
}

#[flutter_rust_bridge::frb(sync)]
pub fn habit_archive(habit_id: String) -> ActionResponse {
    archive_habit_at(&resolve_db_path(), &habit_id)
}

/// Lists habits offered on `date` with their check-in state.
#[flutter_rust_bridge::frb(sync)]
pub fn habits_due(date: String) -> HabitsDueResponse {
    habits_due_at(&resolve_db_path(), &date)
}

pub(crate) fn add_task_at(
    db_path: &Path,
    title: &str,
    scheduled_for: Option<String>,
    category: Option<String>,
    difficulty: Option<String>,
) -> EntityResponse {
    let scheduled_for = match parse_optional_date(scheduled_for) {
        Ok(date) => date,
        Err(err) => return EntityResponse::failure(err),
    };
    let difficulty = match non_blank(difficulty) {
        Some(raw) => match parse_label::<Difficulty>(&raw) {
            Some(difficulty) => difficulty,
            None => return EntityResponse::failure(format!("unsupported difficulty: {raw}")),
        },
        None => Difficulty::default(),
    };
    let request = NewTask {
        category: non_blank(category).map(|value| value.to_ascii_lowercase()),
        difficulty,
        scheduled_for,
        ..NewTask::titled(title)
    };
    create_entity(db_path, "task_add", "Task added.", |state| {
        task_service::add_task(state, request, Utc::now())
    })
}

pub(crate) fn complete_task_at(db_path: &Path, task_id: &str) -> ActionResponse {
    apply_change(db_path, "task_complete", "Task completed.", |state| {
        task_service::complete_task(state, task_id.trim(), Utc::now())
    })
}

pub(crate) fn reopen_task_at(db_path: &Path, task_id: &str) -> ActionResponse {
    apply_change(db_path, "task_reopen", "Task reopened.", |state| {
        task_service::reopen_task(state, task_id.trim())
    })
}

pub(crate) fn archive_task_at(db_path: &Path, task_id: &str) -> ActionResponse {
    apply_change(db_path, "task_archive", "Task archived.", |state| {
        task_service::archive_task(state, task_id.trim())
    })
}

pub(crate) fn schedule_task_at(
    db_path: &Path,
    task_id: &str,
    scheduled_for: Option<String>,
) -> ActionResponse {
    let scheduled_for = match parse_optional_date(scheduled_for) {
        Ok(date) => date,
        Err(err) => return ActionResponse::failure(err),
    };
    apply_change(db_path, "task_schedule", "Task rescheduled.", |state| {
        task_service::schedule_task(state, task_id.trim(), scheduled_for)
    })
}

pub(crate) fn tasks_by_bucket_at(db_path: &Path, today: &str) -> TaskBucketsResponse {
    let today = match parse_date(today) {
        Ok(date) => date,
        Err(err) => return TaskBucketsResponse::failure(err),
    };
    match with_session(db_path, |session| {
        let grouped = task_service::group_by_bucket(&session.state().tasks, today);
        let views = |tasks: &[&TaskItem]| -> Vec<TaskView> {
            tasks.iter().map(|task| to_task_view(task, today)).collect()
        };
        Ok(TaskBucketsResponse {
            ok: true,
            today: views(grouped.today.as_slice()),
            tomorrow: views(grouped.tomorrow.as_slice()),
            week: views(grouped.week.as_slice()),
            future: views(grouped.future.as_slice()),
            message: String::new(),
        })
    }) {
        Ok(response) => response,
        Err(err) => TaskBucketsResponse::failure(format!("tasks_by_bucket failed: {err}")),
    }
}

pub(crate) fn add_project_at(db_path: &Path, title: &str) -> EntityResponse {
    create_entity(db_path, "project_add", "Project added.", |state| {
        task_service::add_project(state, title, Utc::now())
    })
}

pub(crate) fn attach_task_at(db_path: &Path, project_id: &str, task_id: &str) -> ActionResponse {
    apply_change(db_path, "project_attach_task", "Task linked.", |state| {
        task_service::attach_task(state, project_id.trim(), task_id.trim())
    })
}

pub(crate) fn set_project_status_at(
    db_path: &Path,
    project_id: &str,
    status: &str,
) -> ActionResponse {
    let status = match parse_label::<ProjectStatus>(status) {
        Some(status) => status,
        None => return ActionResponse::failure(format!("unsupported project status: {status}")),
    };
    apply_change(db_path, "project_set_status", "Project updated.", |state| {
        task_service::set_project_status(state, project_id.trim(), status)
    })
}

pub(crate) fn add_habit_at(
    db_path: &Path,
    title: &str,
    days_of_week: Option<Vec<u8>>,
) -> EntityResponse {
    let request = match days_of_week {
        Some(days) => NewHabit::weekly(title, days),
        None => NewHabit::daily(title),
    };
    create_entity(db_path, "habit_add", "Habit added.", |state| {
        habit_service::add_habit(state, request, Utc::now())
    })
}

pub(crate) fn toggle_check_in_at(db_path: &Path, habit_id: &str, date: &str) -> ToggleResponse {
    let date = match parse_date(date) {
        Ok(date) => date,
        Err(err) => return ToggleResponse::failure(err),
    };
    toggle_change(db_path, "habit_toggle_check_in", |state| {
        habit_service::toggle_check_in(state, habit_id.trim(), date, Utc::now())
    })
}

pub(crate) fn archive_habit_at(db_path: &Path, habit_id: &str) -> ActionResponse {
    apply_change(db_path, "habit_archive", "Habit archived.", |state| {
        habit_service::archive_habit(state, habit_id.trim())
    })
}

pub(crate) fn habits_due_at(db_path: &Path, date: &str) -> HabitsDueResponse {
    let date = match parse_date(date) {
        Ok(date) => date,
        Err(err) => {
            return HabitsDueResponse {
                ok: false,
                habits: Vec::new(),
                message: err,
            }
        }
    };
    match with_session(db_path, |session| {
        let state = session.state();
        Ok(habit_service::due_on(state, date)
            .into_iter()
            .map(|habit| to_habit_view(habit, habit_service::is_checked_in(state, &habit.id, date)))
            .collect::<Vec<_>>())
    }) {
        Ok(habits) => HabitsDueResponse {
            ok: true,
            message: format!("{} habit(s) due.", habits.len()),
            habits,
        },
        Err(err) => HabitsDueResponse {
            ok: false,
            habits: Vec::new(),
            message: format!("habits_due failed: {err}"),
        },
    }
}

fn to_task_view(task: &TaskItem, today: NaiveDate) -> TaskView {
    TaskView {
        id: task.id.clone(),
        title: task.title.clone(),
        category: task.category.clone(),
        difficulty: label_of(&task.difficulty),
        scheduled_for: task.scheduled_for.map(format_date),
        project_id: task.project_id.clone(),
        overdue: task_service::is_overdue(task, today),
    }
}

fn to_habit_view(habit: &HabitItem, checked_in: bool) -> HabitView {
    HabitView {
        id: habit.id.clone(),
        title: habit.title.clone(),
        category: habit.category.clone(),
        checked_in,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::document::export_at;
    use crate::api::test_support::temp_db;

    fn created_id(response: EntityResponse) -> String {
        assert!(response.ok, "{}", response.message);
        response.id.expect("created id")
    }

    #[test]
    fn tasks_land_in_buckets_relative_to_caller_today() {
        let (_dir, db) = temp_db();
        let late = created_id(add_task_at(&db, "file taxes", Some("2026-02-27".into()), None, None));
        let soon = created_id(add_task_at(&db, "call mom", Some("2026-03-02".into()), None, None));
        let someday = created_id(add_task_at(&db, "learn banjo", None, None, Some("Hard".into())));

        let buckets = tasks_by_bucket_at(&db, "2026-03-01");
        assert!(buckets.ok, "{}", buckets.message);
        assert_eq!(buckets.today.len(), 1);
        assert_eq!(buckets.today[0].id, late);
        assert!(buckets.today[0].overdue);
        assert_eq!(buckets.tomorrow[0].id, soon);
        assert!(!buckets.tomorrow[0].overdue);
        assert_eq!(buckets.future[0].id, someday);
        assert_eq!(buckets.future[0].difficulty, "hard");
        assert!(buckets.week.is_empty());
    }

    #[test]
    fn task_input_is_validated_before_any_write() {
        let (_dir, db) = temp_db();
        let bad_date = add_task_at(&db, "x", Some("tomorrow".into()), None, None);
        assert!(!bad_date.ok);
        assert!(bad_date.message.contains("YYYY-MM-DD"));

        let bad_difficulty = add_task_at(&db, "x", None, None, Some("brutal".into()));
        assert!(bad_difficulty.message.contains("unsupported difficulty"));

        let blank = add_task_at(&db, "   ", None, None, None);
        assert!(!blank.ok);
        assert!(blank.message.contains("task_add failed"));

        assert!(!tasks_by_bucket_at(&db, "2026-13-01").ok);
    }

    #[test]
    fn completed_and_archived_tasks_leave_buckets() {
        let (_dir, db) = temp_db();
        let done = created_id(add_task_at(&db, "dishes", None, None, None));
        let gone = created_id(add_task_at(&db, "old chore", None, None, None));

        assert!(complete_task_at(&db, &done).ok);
        assert!(archive_task_at(&db, &gone).ok);
        assert!(tasks_by_bucket_at(&db, "2026-03-01").future.is_empty());

        assert!(reopen_task_at(&db, &done).ok);
        assert_eq!(tasks_by_bucket_at(&db, "2026-03-01").future.len(), 1);
        assert!(!complete_task_at(&db, "ghost").ok);
    }

    #[test]
    fn schedule_moves_and_blank_unschedules() {
        let (_dir, db) = temp_db();
        let id = created_id(add_task_at(&db, "dentist", None, None, None));

        assert!(schedule_task_at(&db, &id, Some("2026-03-04".into())).ok);
        assert_eq!(tasks_by_bucket_at(&db, "2026-03-01").week[0].id, id);

        assert!(schedule_task_at(&db, &id, Some(" ".into())).ok);
        let buckets = tasks_by_bucket_at(&db, "2026-03-01");
        assert_eq!(buckets.future[0].scheduled_for, None);
    }

    #[test]
    fn attaching_to_second_project_moves_the_task() {
        let (_dir, db) = temp_db();
        let first = created_id(add_project_at(&db, "garden"));
        let second = created_id(add_project_at(&db, "kitchen"));
        let task = created_id(add_task_at(&db, "buy soil", None, None, None));

        assert!(attach_task_at(&db, &first, &task).ok);
        assert!(attach_task_at(&db, &second, &task).ok);

        let value: serde_json::Value =
            serde_json::from_str(&export_at(&db).json).expect("valid json");
        assert_eq!(value["projects"][0]["taskIds"], serde_json::json!([]));
        assert_eq!(value["projects"][1]["taskIds"], serde_json::json!([task]));
        assert_eq!(value["tasks"][0]["projectId"], serde_json::json!(second));
    }

    #[test]
    fn project_status_uses_wire_labels() {
        let (_dir, db) = temp_db();
        let project = created_id(add_project_at(&db, "garden"));

        assert!(!set_project_status_at(&db, &project, "paused").ok);
        assert!(set_project_status_at(&db, &project, "set_aside").ok);
        assert!(set_project_status_at(&db, &project, "Deleted").ok);

        let task = created_id(add_task_at(&db, "rake", None, None, None));
        let refused = attach_task_at(&db, &project, &task);
        assert!(!refused.ok);
        assert!(refused.message.contains("deleted"));
    }

    #[test]
    fn weekly_habit_is_due_on_its_days_and_toggles() {
        let (_dir, db) = temp_db();
        // 2026-03-01 is a Sunday.
        let weekly = created_id(add_habit_at(&db, "long walk", Some(vec![0])));
        let daily = created_id(add_habit_at(&db, "stretch", None));

        let sunday = habits_due_at(&db, "2026-03-01");
        assert_eq!(sunday.habits.len(), 2);
        assert_eq!(habits_due_at(&db, "2026-03-02").habits.len(), 1);

        let on = toggle_check_in_at(&db, &weekly, "2026-03-01");
        assert!(on.ok && on.on, "{}", on.message);
        let due = habits_due_at(&db, "2026-03-01");
        let walk = due.habits.iter().find(|habit| habit.id == weekly).expect("due");
        assert!(walk.checked_in);

        let off = toggle_check_in_at(&db, &weekly, "2026-03-01");
        assert!(off.ok && !off.on);

        assert!(archive_habit_at(&db, &daily).ok);
        assert_eq!(habits_due_at(&db, "2026-03-02").habits.len(), 0);
    }

    #[test]
    fn invalid_habit_input_is_refused() {
        let (_dir, db) = temp_db();
        assert!(!add_habit_at(&db, "gym", Some(vec![7])).ok);
        assert!(!add_habit_at(&db, "gym", Some(Vec::new())).ok);
        assert!(!toggle_check_in_at(&db, "ghost", "2026-03-01").ok);
        assert!(!toggle_check_in_at(&db, "ghost", "March 1").ok);
    }
}
