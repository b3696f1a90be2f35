//! Experience thresholds and level-ups.

use bevy::prelude::*;

use crate::achievements::AchievementNotification;
use crate::config::{LEVEL_UP_BONUS_PER_LEVEL, XP_BASE, XP_GROWTH};
use crate::state::GameState;
use crate::SimulationSet;

/// Cumulative experience needed to leave `level`:
/// `floor(100 * 1.5 ^ (level - 1))`.
pub fn required_xp(level: u32) -> u64 {
    let exponent = level.saturating_sub(1) as i32;
    (XP_BASE * XP_GROWTH.powi(exponent)).floor() as u64
}

/// One level gained and the currency bonus it paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub new_level: u32,
    pub bonus: u64,
}

/// Raise the level while experience meets the threshold. The bonus for
/// leaving level `L` is `L * 1000`. Experience is never spent.
pub fn apply_level_ups(state: &mut GameState) -> Vec<LevelUp> {
    let mut level_ups = Vec::new();
    while state.experience >= required_xp(state.level) {
        let bonus = state.level as u64 * LEVEL_UP_BONUS_PER_LEVEL;
        state.currency += bonus;
        state.level += 1;
        info!("Level up! Now level {} (+${} bonus)", state.level, bonus);
        level_ups.push(LevelUp {
            new_level: state.level,
            bonus,
        });
    }
    level_ups
}

/// Fraction of the way from the previous threshold to the next, in `[0, 1]`.
pub fn xp_progress(state: &GameState) -> f64 {
    let floor = if state.level > 1 {
        required_xp(state.level - 1)
    } else {
        0
    };
    let ceiling = required_xp(state.level);
    if ceiling <= floor {
        return 1.0;
    }
    let into_level = state.experience.saturating_sub(floor) as f64;
    (into_level / (ceiling - floor) as f64).clamp(0.0, 1.0)
}

/// Level-ups can satisfy level and currency achievements, so a level-up
/// settles the whole state before returning.
pub fn check_level_up(
    mut state: ResMut<GameState>,
    mut notifications: ResMut<AchievementNotification>,
) {
    if state.experience < state.required_xp() {
        return;
    }
    apply_level_ups(&mut state);
    let report = state.settle();
    notifications.recent_unlocks.extend(report.unlocked);
}

pub struct ProgressionPlugin;

impl Plugin for ProgressionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            check_level_up
                .after(crate::achievements::check_achievements)
                .in_set(SimulationSet::PostSim),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_xp_table() {
        assert_eq!(required_xp(1), 100);
        assert_eq!(required_xp(2), 150);
        assert_eq!(required_xp(3), 225);
        // 100 * 1.5^3 = 337.5
        assert_eq!(required_xp(4), 337);
        assert_eq!(required_xp(5), 506);
    }

    #[test]
    fn test_single_level_up_pays_pre_increment_bonus() {
        let mut state = GameState::default();
        state.experience = 100;
        let ups = apply_level_ups(&mut state);
        assert_eq!(
            ups,
            vec![LevelUp {
                new_level: 2,
                bonus: 1_000
            }]
        );
        assert_eq!(state.level, 2);
        assert_eq!(state.currency, 6_000);
        assert_eq!(state.experience, 100, "experience is never spent");
    }

    #[test]
    fn test_cascade_to_level_four() {
        let mut state = GameState::default();
        state.experience = 300;
        let ups = apply_level_ups(&mut state);
        assert_eq!(ups.len(), 3);
        assert_eq!(state.level, 4);
        // 1000 + 2000 + 3000
        assert_eq!(state.currency, 5_000 + 6_000);
    }

    #[test]
    fn test_below_threshold_is_noop() {
        let mut state = GameState::default();
        state.experience = 99;
        assert!(apply_level_ups(&mut state).is_empty());
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_xp_progress_fraction() {
        let mut state = GameState::default();
        assert_eq!(xp_progress(&state), 0.0);
        state.experience = 50;
        assert!((xp_progress(&state) - 0.5).abs() < 1e-9);

        state.level = 2;
        state.experience = 125;
        // (125 - 100) / (150 - 100)
        assert!((xp_progress(&state) - 0.5).abs() < 1e-9);
    }
}
