//! Aggregate application document.
//!
//! # Invariants
//! - `AppState::default()` is the empty document used before hydration,
//!   after reset, and as the load fallback.
//! - The aggregate is persisted whole; there is no partial document.

use super::draft::DraftItem;
use super::habit::{HabitCheckIn, HabitItem};
use super::records::{GoalItem, GroceryItem, LogEntry, MealPlan, ProjectItem};
use super::task::TaskItem;
use super::EntityId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Accumulated experience counters. Rendered visually, never as numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XpState {
    pub global_total: u64,
    pub by_category: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeState {
    pub unlocked: Vec<EntityId>,
}

/// User preferences stored inside the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub show_overdue: bool,
}

/// The single persisted document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub drafts: Vec<DraftItem>,
    pub tasks: Vec<TaskItem>,
    pub habits: Vec<HabitItem>,
    pub habit_check_ins: Vec<HabitCheckIn>,
    pub logs: Vec<LogEntry>,
    pub goals: Vec<GoalItem>,
    pub projects: Vec<ProjectItem>,
    pub meals: Vec<MealPlan>,
    pub groceries: Vec<GroceryItem>,
    pub xp: XpState,
    pub badges: BadgeState,
    pub settings: Settings,
}

impl AppState {
    /// Returns whether every collection is empty and counters are zero.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
