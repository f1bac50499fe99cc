//! Habit and check-in model.

use super::{new_entity_id, EntityId};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyType {
    Daily,
    Weekly,
}

/// How often a habit is offered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitFrequency {
    /// Serialized as `type` to match the stored document.
    #[serde(rename = "type")]
    pub kind: FrequencyType,
    /// Weekday numbers `0..=6`, Sunday first. Only meaningful for weekly habits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_of_week: Option<Vec<u8>>,
}

impl HabitFrequency {
    pub fn daily() -> Self {
        Self {
            kind: FrequencyType::Daily,
            days_of_week: None,
        }
    }

    pub fn weekly(days_of_week: Vec<u8>) -> Self {
        Self {
            kind: FrequencyType::Weekly,
            days_of_week: Some(days_of_week),
        }
    }

    /// Returns whether the habit is offered on `date`.
    ///
    /// A weekly habit without days is never due.
    pub fn includes(&self, date: NaiveDate) -> bool {
        match self.kind {
            FrequencyType::Daily => true,
            FrequencyType::Weekly => {
                let weekday = date.weekday().num_days_from_sunday() as u8;
                self.days_of_week
                    .as_deref()
                    .is_some_and(|days| days.contains(&weekday))
            }
        }
    }
}

/// What happens when a scheduled occurrence is skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipBehavior {
    #[default]
    SkipAndMoveOn,
    CarryOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitStatus {
    Active,
    Archived,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitItem {
    pub id: EntityId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub frequency: HabitFrequency,
    pub skip_behavior: SkipBehavior,
    pub status: HabitStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_ids: Option<Vec<EntityId>>,
}

impl HabitItem {
    pub fn new(
        title: impl Into<String>,
        frequency: HabitFrequency,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: new_entity_id(),
            title: title.into(),
            notes: None,
            category: None,
            frequency,
            skip_behavior: SkipBehavior::default(),
            status: HabitStatus::Active,
            created_at,
            goal_ids: None,
        }
    }
}

/// One completed occurrence of a habit.
///
/// `habit_id` is a weak reference; archiving a habit keeps its check-ins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitCheckIn {
    pub id: EntityId,
    pub habit_id: EntityId,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}
