//! Habit use-cases.
//!
//! # Invariants
//! - At most one check-in exists per `(habit_id, date)`.
//! - Check-ins carry no status, so un-checking removes the record.
//! - Archiving a habit keeps its check-in history.

use super::{normalize_title, not_found, ServiceError, ServiceResult};
use crate::model::habit::{
    FrequencyType, HabitCheckIn, HabitFrequency, HabitItem, HabitStatus, SkipBehavior,
};
use crate::model::state::AppState;
use crate::model::{new_entity_id, EntityId};
use chrono::{DateTime, NaiveDate, Utc};

/// Request model for creating a habit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHabit {
    pub title: String,
    pub frequency: HabitFrequency,
    pub skip_behavior: SkipBehavior,
    pub category: Option<String>,
    pub notes: Option<String>,
}

impl NewHabit {
    pub fn daily(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            frequency: HabitFrequency::daily(),
            skip_behavior: SkipBehavior::default(),
            category: None,
            notes: None,
        }
    }

    pub fn weekly(title: impl Into<String>, days_of_week: Vec<u8>) -> Self {
        Self {
            frequency: HabitFrequency::weekly(days_of_week),
            ..Self::daily(title)
        }
    }
}

/// Adds an active habit and returns its ID.
///
/// Weekly habits need at least one weekday in `0..=6`; days are stored
/// sorted and deduplicated.
pub fn add_habit(state: &mut AppState, request: NewHabit, now: DateTime<Utc>) -> ServiceResult<EntityId> {
    let title = normalize_title("habit title", &request.title)?;
    let frequency = normalize_frequency(request.frequency)?;

    let mut habit = HabitItem::new(title, frequency, now);
    habit.skip_behavior = request.skip_behavior;
    habit.category = request.category;
    habit.notes = request.notes;

    let id = habit.id.clone();
    state.habits.push(habit);
    Ok(id)
}

/// Returns whether an active habit is offered on `date`.
pub fn is_due_on(habit: &HabitItem, date: NaiveDate) -> bool {
    habit.status == HabitStatus::Active && habit.frequency.includes(date)
}

/// Lists habits offered on `date`, in document order.
pub fn due_on(state: &AppState, date: NaiveDate) -> Vec<&HabitItem> {
    state
        .habits
        .iter()
        .filter(|habit| is_due_on(habit, date))
        .collect()
}

pub fn is_checked_in(state: &AppState, habit_id: &str, date: NaiveDate) -> bool {
    state
        .habit_check_ins
        .iter()
        .any(|check_in| check_in.habit_id == habit_id && check_in.date == date)
}

/// Flips the check-in for `habit_id` on `date`.
///
/// Returns `true` when the habit is now checked in.
pub fn toggle_check_in(
    state: &mut AppState,
    habit_id: &str,
    date: NaiveDate,
    now: DateTime<Utc>,
) -> ServiceResult<bool> {
    if !state.habits.iter().any(|habit| habit.id == habit_id) {
        return Err(not_found("habit", habit_id));
    }

    let existing = state
        .habit_check_ins
        .iter()
        .position(|check_in| check_in.habit_id == habit_id && check_in.date == date);
    match existing {
        Some(index) => {
            state.habit_check_ins.remove(index);
            Ok(false)
        }
        None => {
            state.habit_check_ins.push(HabitCheckIn {
                id: new_entity_id(),
                habit_id: habit_id.to_string(),
                date,
                created_at: now,
            });
            Ok(true)
        }
    }
}

pub fn archive_habit(state: &mut AppState, habit_id: &str) -> ServiceResult<()> {
    let habit = state
        .habits
        .iter_mut()
        .find(|habit| habit.id == habit_id)
        .ok_or_else(|| not_found("habit", habit_id))?;
    habit.status = HabitStatus::Archived;
    Ok(())
}

fn normalize_frequency(frequency: HabitFrequency) -> ServiceResult<HabitFrequency> {
    match frequency.kind {
        FrequencyType::Daily => Ok(HabitFrequency::daily()),
        FrequencyType::Weekly => {
            let mut days = frequency.days_of_week.unwrap_or_default();
            if let Some(bad) = days.iter().find(|day| **day > 6) {
                return Err(ServiceError::InvalidInput(format!(
                    "weekday {bad} is outside 0..=6"
                )));
            }
            days.sort_unstable();
            days.dedup();
            if days.is_empty() {
                return Err(ServiceError::InvalidInput(
                    "weekly habit needs at least one weekday".to_string(),
                ));
            }
            Ok(HabitFrequency::weekly(days))
        }
    }
}
