//! Meal planning and grocery list use-cases.
//!
//! # Invariants
//! - One `MealPlan` per date; planning a meal on a planned date appends to it.
//! - Grocery items carry no status, so removal is physical.
//! - `checked_at` is set exactly while `checked` is true.

use super::{normalize_title, not_found, ServiceResult};
use crate::model::records::{GroceryItem, MealItem, MealPlan};
use crate::model::state::AppState;
use crate::model::task::TaskItem;
use crate::model::{new_entity_id, EntityId};
use chrono::{DateTime, NaiveDate, Utc};

/// IDs produced by planning one meal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMeal {
    pub plan_id: EntityId,
    pub meal_id: EntityId,
    /// Present when a cooking task was requested.
    pub task_id: Option<EntityId>,
}

/// Adds a meal to the plan for `date`, creating the plan when missing.
///
/// With `create_cooking_task`, an active task scheduled on `date` is added.
pub fn plan_meal(
    state: &mut AppState,
    date: NaiveDate,
    name: &str,
    create_cooking_task: bool,
    now: DateTime<Utc>,
) -> ServiceResult<PlannedMeal> {
    let name = normalize_title("meal name", name)?;
    let meal = MealItem {
        id: new_entity_id(),
        name: name.clone(),
        create_cooking_task: create_cooking_task.then_some(true),
    };
    let meal_id = meal.id.clone();

    let plan_id = match state.meals.iter_mut().find(|plan| plan.date == date) {
        Some(plan) => {
            plan.items.push(meal);
            plan.id.clone()
        }
        None => {
            let plan = MealPlan {
                id: new_entity_id(),
                date,
                items: vec![meal],
                created_at: now,
            };
            let id = plan.id.clone();
            state.meals.push(plan);
            id
        }
    };

    let task_id = if create_cooking_task {
        let mut task = TaskItem::new(format!("Cook {name}"), now);
        task.category = Some("home".to_string());
        task.scheduled_for = Some(date);
        let id = task.id.clone();
        state.tasks.push(task);
        Some(id)
    } else {
        None
    };

    Ok(PlannedMeal {
        plan_id,
        meal_id,
        task_id,
    })
}

pub fn meal_plan_for(state: &AppState, date: NaiveDate) -> Option<&MealPlan> {
    state.meals.iter().find(|plan| plan.date == date)
}

pub fn add_grocery(state: &mut AppState, text: &str, now: DateTime<Utc>) -> ServiceResult<EntityId> {
    let item = GroceryItem {
        id: new_entity_id(),
        text: normalize_title("grocery item", text)?,
        checked: false,
        created_at: now,
        checked_at: None,
    };
    let id = item.id.clone();
    state.groceries.push(item);
    Ok(id)
}

/// Flips a grocery item's checked state. Returns the new state.
pub fn toggle_grocery(state: &mut AppState, id: &str, now: DateTime<Utc>) -> ServiceResult<bool> {
    let item = state
        .groceries
        .iter_mut()
        .find(|item| item.id == id)
        .ok_or_else(|| not_found("grocery item", id))?;
    item.checked = !item.checked;
    item.checked_at = item.checked.then_some(now);
    Ok(item.checked)
}

pub fn remove_grocery(state: &mut AppState, id: &str) -> ServiceResult<()> {
    let index = state
        .groceries
        .iter()
        .position(|item| item.id == id)
        .ok_or_else(|| not_found("grocery item", id))?;
    state.groceries.remove(index);
    Ok(())
}

/// Drops every checked item. Returns how many were removed.
pub fn clear_checked(state: &mut AppState) -> usize {
    let before = state.groceries.len();
    state.groceries.retain(|item| !item.checked);
    before - state.groceries.len()
}
