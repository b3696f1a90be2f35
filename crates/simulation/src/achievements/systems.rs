use bevy::prelude::*;

use crate::state::GameState;

use super::types::{definition, AchievementNotification, AchievementReward, Metric};

/// Current value of `metric` for `state`.
pub(crate) fn metric_value(state: &GameState, metric: Metric) -> u64 {
    match metric {
        Metric::BuildingsOfType(kind) => state.count_of(kind),
        Metric::TotalBuildings => state.buildings.len() as u64,
        Metric::Population => state.population,
        Metric::Currency => state.currency,
        Metric::Happiness => state.happiness as u64,
        Metric::Level => state.level as u64,
    }
}

/// Apply one reward. Unlocking an already unlocked type is a no-op.
pub(crate) fn apply_reward(state: &mut GameState, reward: AchievementReward) {
    match reward {
        AchievementReward::Currency { amount } => state.currency += amount,
        AchievementReward::Experience { amount } => state.experience += amount,
        AchievementReward::Unlock { kind } => {
            state.unlock_type(kind);
        }
    }
}

/// Evaluate every locked achievement against one snapshot of `state`, then
/// grant the rewards of those that unlocked. Returns the newly unlocked ids.
///
/// Unlocked achievements are never touched again. Records whose id has no
/// definition are skipped.
pub fn evaluate(state: &mut GameState) -> Vec<String> {
    let mut progress_updates = Vec::new();
    for (index, achievement) in state.achievements.iter().enumerate() {
        if achievement.unlocked {
            continue;
        }
        let Some(def) = definition(&achievement.id) else {
            warn!("Skipping unknown achievement '{}'", achievement.id);
            continue;
        };
        let progress = metric_value(state, def.metric).min(achievement.max_progress);
        if progress != achievement.progress || progress >= achievement.max_progress {
            progress_updates.push((index, progress));
        }
    }

    let mut newly_unlocked = Vec::new();
    let mut rewards = Vec::new();
    for (index, progress) in progress_updates {
        let achievement = &mut state.achievements[index];
        achievement.progress = progress;
        if progress >= achievement.max_progress {
            achievement.unlocked = true;
            rewards.push(achievement.reward);
            newly_unlocked.push(achievement.id.clone());
        }
    }

    for reward in rewards {
        apply_reward(state, reward);
    }
    for id in &newly_unlocked {
        if let Some(def) = definition(id) {
            info!(
                "Achievement unlocked: {} ({})",
                def.name,
                def.reward.description()
            );
        }
    }
    newly_unlocked
}

/// Whether [`evaluate`] would change anything.
fn has_pending_progress(state: &GameState) -> bool {
    state.achievements.iter().any(|a| {
        !a.unlocked
            && definition(&a.id).is_some_and(|def| {
                let progress = metric_value(state, def.metric).min(a.max_progress);
                progress != a.progress || progress >= a.max_progress
            })
    })
}

/// Evaluates achievements after stats are refreshed. Only marks
/// `GameState` changed when a record actually moved.
pub fn check_achievements(
    mut state: ResMut<GameState>,
    mut notifications: ResMut<AchievementNotification>,
) {
    if !has_pending_progress(&state) {
        return;
    }
    let unlocked = evaluate(&mut state);
    notifications.recent_unlocks.extend(unlocked);
}
