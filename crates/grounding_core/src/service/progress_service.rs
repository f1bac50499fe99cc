//! Experience, badge and in-document settings use-cases.

use super::{normalize_title, ServiceResult};
use crate::model::state::AppState;

/// Adds experience to the global total and to one category.
///
/// Counters saturate instead of wrapping.
pub fn award_xp(state: &mut AppState, category: &str, amount: u64) -> ServiceResult<()> {
    let category = normalize_title("xp category", category)?.to_ascii_lowercase();
    let xp = &mut state.xp;
    xp.global_total = xp.global_total.saturating_add(amount);
    let slot = xp.by_category.entry(category).or_insert(0);
    *slot = slot.saturating_add(amount);
    Ok(())
}

/// Unlocks a badge. Returns `false` when it was already unlocked.
pub fn unlock_badge(state: &mut AppState, badge_id: &str) -> ServiceResult<bool> {
    let badge_id = normalize_title("badge id", badge_id)?;
    if state.badges.unlocked.contains(&badge_id) {
        return Ok(false);
    }
    state.badges.unlocked.push(badge_id);
    Ok(true)
}

pub fn set_show_overdue(state: &mut AppState, show_overdue: bool) {
    state.settings.show_overdue = show_overdue;
}

#[cfg(test)]
mod tests {
    use super::{award_xp, set_show_overdue, unlock_badge};
    use crate::model::state::AppState;

    #[test]
    fn award_xp_tracks_global_and_category_totals() {
        let mut state = AppState::default();
        award_xp(&mut state, "Home", 5).unwrap();
        award_xp(&mut state, "home", 3).unwrap();
        award_xp(&mut state, "faith", 2).unwrap();

        assert_eq!(state.xp.global_total, 10);
        assert_eq!(state.xp.by_category.get("home"), Some(&8));
        assert_eq!(state.xp.by_category.get("faith"), Some(&2));
    }

    #[test]
    fn award_xp_saturates() {
        let mut state = AppState::default();
        award_xp(&mut state, "home", u64::MAX).unwrap();
        award_xp(&mut state, "home", 1).unwrap();
        assert_eq!(state.xp.global_total, u64::MAX);
    }

    #[test]
    fn unlock_badge_is_idempotent() {
        let mut state = AppState::default();
        assert!(unlock_badge(&mut state, "first-seed").unwrap());
        assert!(!unlock_badge(&mut state, "first-seed").unwrap());
        assert_eq!(state.badges.unlocked, vec!["first-seed".to_string()]);
    }

    #[test]
    fn show_overdue_toggles() {
        let mut state = AppState::default();
        set_show_overdue(&mut state, true);
        assert!(state.settings.show_overdue);
    }
}
