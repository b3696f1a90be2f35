use bevy::prelude::*;

use crate::*;

/// Register all simulation feature plugins.
///
/// Order here does not affect execution order; that is fixed by
/// `SimulationSet` and the explicit `.after(..)` edges inside each plugin.
pub(crate) fn register_feature_plugins(app: &mut App) {
    // Building lifecycle and economy
    app.add_plugins(buildings::BuildingsPlugin);
    app.add_plugins(income::IncomePlugin);

    // Derived state
    app.add_plugins(stats::StatsPlugin);
    app.add_plugins(achievements::AchievementsPlugin);
    app.add_plugins(progression::ProgressionPlugin);

    // Persistence trigger
    app.add_plugins(autosave::AutosavePlugin);
}
