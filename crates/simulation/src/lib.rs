//! Skyline simulation: building lifecycle, economy and progression as Bevy
//! plugins running in `FixedUpdate`.
//!
//! All game state lives in the [`state::GameState`] resource. Commands are
//! `GameState` methods ([`economy`]); periodic processes are systems ordered
//! by [`SimulationSet`].

use bevy::prelude::*;

pub mod achievements;
pub mod autosave;
pub mod buildings;
pub mod catalog;
pub mod config;
pub mod economy;
pub mod game_params;
pub mod hud;
pub mod income;
mod plugin_registration;
pub mod progression;
pub mod simulation_sets;
pub mod state;
pub mod stats;

#[cfg(test)]
mod integration_tests;
#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use catalog::BuildingType;
pub use economy::CommandError;
pub use game_params::GameParams;
pub use simulation_sets::SimulationSet;
pub use state::GameState;

// ---------------------------------------------------------------------------
// Core resources
// ---------------------------------------------------------------------------

/// Global tick counter incremented each FixedUpdate.
#[derive(Resource, Default)]
pub struct TickCounter(pub u64);

/// Advance the simulation clock by one fixed tick.
///
/// The clock is written without change detection so that time passing on
/// its own never counts as a state change for autosave purposes.
pub fn advance_clock(
    mut tick: ResMut<TickCounter>,
    mut state: ResMut<GameState>,
    params: Res<GameParams>,
) {
    tick.0 = tick.0.wrapping_add(1);
    state.bypass_change_detection().clock_ms += params.construction_tick_ms;
}

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Callers may insert params and a loaded state before adding the plugin.
        if !app.world().contains_resource::<GameParams>() {
            app.insert_resource(GameParams::default());
        }
        if !app.world().contains_resource::<GameState>() {
            let state = GameState::new(app.world().resource::<GameParams>());
            app.insert_resource(state);
        }

        simulation_sets::configure_sets(app);

        app.init_resource::<TickCounter>()
            .add_systems(FixedUpdate, advance_clock.in_set(SimulationSet::PreSim));

        plugin_registration::register_feature_plugins(app);
    }
}
