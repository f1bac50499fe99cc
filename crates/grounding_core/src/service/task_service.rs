//! Task, bucket and project use-cases.
//!
//! # Responsibility
//! - Create tasks and move them through `active -> completed | archived`.
//! - Partition active tasks into display buckets.
//! - Maintain project membership.
//!
//! # Invariants
//! - Buckets are a display partition only; they never change a task.
//! - Project membership is referential: a task may belong to no project.
//! - `completed_at` is set on completion and cleared on reopen.

use super::{normalize_title, not_found, ServiceError, ServiceResult};
use crate::model::records::{ProjectItem, ProjectStatus};
use crate::model::state::AppState;
use crate::model::task::{Difficulty, TaskItem, TaskStatus};
use crate::model::{new_entity_id, EntityId};
use chrono::{DateTime, NaiveDate, Utc};

const WEEK_HORIZON_DAYS: i64 = 7;

/// Request model for creating a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub notes: Option<String>,
    pub category: Option<String>,
    pub difficulty: Difficulty,
    pub scheduled_for: Option<NaiveDate>,
    pub event_at: Option<DateTime<Utc>>,
}

impl NewTask {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Adds an active task and returns its ID.
pub fn add_task(state: &mut AppState, request: NewTask, now: DateTime<Utc>) -> ServiceResult<EntityId> {
    let mut task = TaskItem::new(normalize_title("task title", &request.title)?, now);
    task.notes = request.notes;
    task.category = request.category;
    task.difficulty = request.difficulty;
    task.scheduled_for = request.scheduled_for;
    task.event_at = request.event_at;

    let id = task.id.clone();
    state.tasks.push(task);
    Ok(id)
}

/// Marks a task completed at `now`. Completing twice keeps the first stamp.
pub fn complete_task(state: &mut AppState, id: &str, now: DateTime<Utc>) -> ServiceResult<()> {
    let task = find_task(state, id)?;
    if task.status != TaskStatus::Completed {
        task.status = TaskStatus::Completed;
        task.completed_at = Some(now);
    }
    Ok(())
}

/// Returns a completed or archived task to the active list.
pub fn reopen_task(state: &mut AppState, id: &str) -> ServiceResult<()> {
    let task = find_task(state, id)?;
    task.status = TaskStatus::Active;
    task.completed_at = None;
    Ok(())
}

/// Soft-deletes a task.
pub fn archive_task(state: &mut AppState, id: &str) -> ServiceResult<()> {
    find_task(state, id)?.status = TaskStatus::Archived;
    Ok(())
}

/// Moves a task to another day, or unschedules it with `None`.
pub fn schedule_task(
    state: &mut AppState,
    id: &str,
    scheduled_for: Option<NaiveDate>,
) -> ServiceResult<()> {
    find_task(state, id)?.scheduled_for = scheduled_for;
    Ok(())
}

/// Coarse time-horizon group used to lay out the to-do page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Today,
    Tomorrow,
    Week,
    Future,
}

impl Bucket {
    /// Picks the bucket for a task relative to `today`.
    ///
    /// Unscheduled tasks sit in `Future`; past-scheduled tasks fold into
    /// `Today` instead of forming an overdue pile.
    pub fn for_task(task: &TaskItem, today: NaiveDate) -> Self {
        let Some(day) = task.scheduled_for else {
            return Self::Future;
        };
        let offset = (day - today).num_days();
        match offset {
            i64::MIN..=0 => Self::Today,
            1 => Self::Tomorrow,
            2..=WEEK_HORIZON_DAYS => Self::Week,
            _ => Self::Future,
        }
    }
}

/// Active tasks partitioned by bucket, each keeping document order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BucketedTasks<'a> {
    pub today: Vec<&'a TaskItem>,
    pub tomorrow: Vec<&'a TaskItem>,
    pub week: Vec<&'a TaskItem>,
    pub future: Vec<&'a TaskItem>,
}

impl<'a> BucketedTasks<'a> {
    pub fn get(&self, bucket: Bucket) -> &[&'a TaskItem] {
        match bucket {
            Bucket::Today => &self.today,
            Bucket::Tomorrow => &self.tomorrow,
            Bucket::Week => &self.week,
            Bucket::Future => &self.future,
        }
    }
}

pub fn group_by_bucket(tasks: &[TaskItem], today: NaiveDate) -> BucketedTasks<'_> {
    let mut grouped = BucketedTasks::default();
    for task in tasks.iter().filter(|task| task.is_active()) {
        let slot = match Bucket::for_task(task, today) {
            Bucket::Today => &mut grouped.today,
            Bucket::Tomorrow => &mut grouped.tomorrow,
            Bucket::Week => &mut grouped.week,
            Bucket::Future => &mut grouped.future,
        };
        slot.push(task);
    }
    grouped
}

/// Returns whether an active task was scheduled before `today`.
///
/// Callers only surface this when `settings.show_overdue` is on.
pub fn is_overdue(task: &TaskItem, today: NaiveDate) -> bool {
    task.is_active() && task.scheduled_for.is_some_and(|day| day < today)
}

/// Adds an active, empty project and returns its ID.
pub fn add_project(state: &mut AppState, title: &str, now: DateTime<Utc>) -> ServiceResult<EntityId> {
    let project = ProjectItem {
        id: new_entity_id(),
        title: normalize_title("project title", title)?,
        created_at: now,
        status: ProjectStatus::Active,
        task_ids: Vec::new(),
    };
    let id = project.id.clone();
    state.projects.push(project);
    Ok(id)
}

/// Links a task into a project. Linking twice is a no-op.
///
/// A task already in another project moves: it leaves that project's
/// `task_ids` so membership stays one-to-one.
pub fn attach_task(state: &mut AppState, project_id: &str, task_id: &str) -> ServiceResult<()> {
    let previous = find_task(state, task_id)?.project_id.clone();
    let project = find_project(state, project_id)?;
    if project.status == ProjectStatus::Deleted {
        return Err(ServiceError::InvalidInput(format!(
            "project {project_id} is deleted"
        )));
    }
    if !project.task_ids.iter().any(|id| id == task_id) {
        project.task_ids.push(task_id.to_string());
    }

    if let Some(previous) = previous.filter(|previous| previous != project_id) {
        if let Some(old) = state.projects.iter_mut().find(|old| old.id == previous) {
            old.task_ids.retain(|id| id != task_id);
        }
    }
    find_task(state, task_id)?.project_id = Some(project_id.to_string());
    Ok(())
}

/// Moves a project to another status; `Deleted` is the soft-delete path.
pub fn set_project_status(
    state: &mut AppState,
    project_id: &str,
    status: ProjectStatus,
) -> ServiceResult<()> {
    find_project(state, project_id)?.status = status;
    Ok(())
}

fn find_task<'a>(state: &'a mut AppState, id: &str) -> ServiceResult<&'a mut TaskItem> {
    state
        .tasks
        .iter_mut()
        .find(|task| task.id == id)
        .ok_or_else(|| not_found("task", id))
}

fn find_project<'a>(state: &'a mut AppState, id: &str) -> ServiceResult<&'a mut ProjectItem> {
    state
        .projects
        .iter_mut()
        .find(|project| project.id == id)
        .ok_or_else(|| not_found("project", id))
}
