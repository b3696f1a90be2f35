mod reconcile;
pub(crate) mod systems;
pub mod types;

pub use reconcile::reconcile_achievements;
pub use systems::{check_achievements, evaluate};
pub use types::{
    canonical_achievements, definition, Achievement, AchievementDef, AchievementNotification,
    AchievementReward, Metric, DEFINITIONS,
};

use bevy::prelude::*;

pub struct AchievementsPlugin;

impl Plugin for AchievementsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AchievementNotification>().add_systems(
            FixedUpdate,
            check_achievements
                .after(crate::stats::update_stats)
                .in_set(crate::SimulationSet::PostSim),
        );
    }
}
