//! Meal planning and grocery list calls.

use super::{
    apply_change, create_entity, parse_date, resolve_db_path, run_change, toggle_change,
    with_session, ActionResponse, EntityResponse, ToggleResponse,
};
use chrono::Utc;
use grounding_core::model::records::GroceryItem;
use grounding_core::service::household_service;
use std::path::Path;

/// IDs produced by planning one meal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealPlanResponse {
    pub ok: bool,
    pub plan_id: Option<String>,
    pub meal_id: Option<String>,
    /// Cooking task, when one was requested.
    pub task_id: Option<String>,
    pub persisted: bool,
    pub message: String,
}

impl MealPlanResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            plan_id: None,
            meal_id: None,
            task_id: None,
            persisted: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroceryView {
    pub id: String,
    pub text: String,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroceryListResponse {
    pub ok: bool,
    /// Insertion order.
    pub items: Vec<GroceryView>,
    pub message: String,
}

/// Adds a meal on `date` (`YYYY-MM-DD`), optionally with a cooking task.
#[flutter_rust_bridge::frb(sync)]
pub fn meal_plan(date: String, name: String, create_cooking_task: bool) -> MealPlanResponse {
    plan_meal_at(&resolve_db_path(), &date, &name, create_cooking_task)
}

#[flutter_rust_bridge::frb(sync)]
pub fn grocery_add(text: String) -> EntityResponse {
    add_grocery_at(&resolve_db_path(), &text)
}

#[flutter_rust_bridge::frb(sync)]
pub fn grocery_toggle(item_id: String) -> ToggleResponse {
    toggle_grocery_at(&resolve_db_path(), &item_id)
}

#[flutter_rust_bridge::frb(sync)]
pub fn grocery_remove(item_id: String) -> ActionResponse {
    remove_grocery_at(&resolve_db_path(), &item_id)
}

/// Drops every checked item.
#[flutter_rust_bridge::frb(sync)]
pub fn grocery_clear_checked() -> ActionResponse {
    clear_checked_at(&resolve_db_path())
}

#[flutter_rust_bridge::frb(sync)]
pub fn groceries_list() -> GroceryListResponse {
    groceries_at(&resolve_db_path())
}

pub(crate) fn plan_meal_at(
    db_path: &Path,
    date: &str,
    name: &str,
    create_cooking_task: bool,
) -> MealPlanResponse {
    let date = match parse_date(date) {
        Ok(date) => date,
        Err(err) => return MealPlanResponse::failure(err),
    };
    match run_change(db_path, |state| {
        household_service::plan_meal(state, date, name, create_cooking_task, Utc::now())
    }) {
        Ok((planned, persisted)) => MealPlanResponse {
            ok: true,
            plan_id: Some(planned.plan_id),
            meal_id: Some(planned.meal_id),
            task_id: planned.task_id,
            persisted,
            message: "Meal planned.".to_string(),
        },
        Err(err) => MealPlanResponse::failure(format!("meal_plan failed: {err}")),
    }
}

pub(crate) fn add_grocery_at(db_path: &Path, text: &str) -> EntityResponse {
    create_entity(db_path, "grocery_add", "Added to list.", |state| {
        household_service::add_grocery(state, text, Utc::now())
    })
}

pub(crate) fn toggle_grocery_at(db_path: &Path, item_id: &str) -> ToggleResponse {
    toggle_change(db_path, "grocery_toggle", |state| {
        household_service::toggle_grocery(state, item_id.trim(), Utc::now())
    })
}

pub(crate) fn remove_grocery_at(db_path: &Path, item_id: &str) -> ActionResponse {
    apply_change(db_path, "grocery_remove", "Removed from list.", |state| {
        household_service::remove_grocery(state, item_id.trim())
    })
}

pub(crate) fn clear_checked_at(db_path: &Path) -> ActionResponse {
    match run_change(db_path, |state| Ok(household_service::clear_checked(state))) {
        Ok((removed, persisted)) => {
            ActionResponse::success(format!("Cleared {removed} item(s)."), persisted)
        }
        Err(err) => ActionResponse::failure(format!("grocery_clear_checked failed: {err}")),
    }
}

pub(crate) fn groceries_at(db_path: &Path) -> GroceryListResponse {
    match with_session(db_path, |session| {
        Ok(session
            .state()
            .groceries
            .iter()
            .map(to_grocery_view)
            .collect::<Vec<_>>())
    }) {
        Ok(items) => GroceryListResponse {
            ok: true,
            message: format!("{} item(s).", items.len()),
            items,
        },
        Err(err) => GroceryListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("groceries_list failed: {err}"),
        },
    }
}

fn to_grocery_view(item: &GroceryItem) -> GroceryView {
    GroceryView {
        id: item.id.clone(),
        text: item.text.clone(),
        checked: item.checked,
    }
}
