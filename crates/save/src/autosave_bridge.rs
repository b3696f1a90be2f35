//! Bridge between the simulation-side autosave flags and the save store.
//!
//! Reads `AutosavePending` (set by `simulation::autosave` once the debounce
//! window closes) and `SaveRequest` (an explicit save), and writes the
//! current `GameState` through the [`ActiveSaveStore`]. Failures are logged
//! and counted; the tick carries on.

use bevy::prelude::*;
use simulation::autosave::{autosave_debounce, AutosavePending, SaveRequest};
use simulation::state::GameState;
use simulation::SimulationSet;

use crate::load::save_state;
use crate::save_plugin::{ActiveSaveStore, SaveStatus};

/// Runs after the debounce so a window closing this tick is written this tick.
fn write_pending_save(
    state: Res<GameState>,
    store: Res<ActiveSaveStore>,
    mut pending: ResMut<AutosavePending>,
    mut request: ResMut<SaveRequest>,
    mut status: ResMut<SaveStatus>,
) {
    if !pending.pending && !request.requested {
        return;
    }
    pending.pending = false;
    request.requested = false;

    match save_state(store.0.as_ref(), &state) {
        Ok(()) => {
            status.writes += 1;
            status.last_error = None;
            debug!("Saved city at {} ms", state.clock_ms);
        }
        Err(e) => {
            warn!("Autosave failed: {e}");
            status.failures += 1;
            status.last_error = Some(e.to_string());
        }
    }
}

pub(crate) struct AutosaveBridgePlugin;

impl Plugin for AutosaveBridgePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AutosavePending>()
            .init_resource::<SaveRequest>()
            .add_systems(
                FixedUpdate,
                write_pending_save
                    .after(autosave_debounce)
                    .in_set(SimulationSet::PostSim),
            );
    }
}
