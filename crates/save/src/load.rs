//! Load and save entry points used by the app and the autosave bridge.

use bevy::log::{info, warn};
use simulation::achievements::reconcile_achievements;
use simulation::state::GameState;
use simulation::GameParams;

use crate::save_codec::{decode_state, encode_state};
use crate::save_error::SaveError;
use crate::store::SaveStore;

/// Encode `state` and write it through `store`.
pub fn save_state(store: &dyn SaveStore, state: &GameState) -> Result<(), SaveError> {
    let bytes = encode_state(state);
    store.write(&bytes)?;
    Ok(())
}

/// Read and decode the stored city, then bring it in line with this build.
///
/// Fails with [`SaveError::NoData`] if the store is empty.
pub fn try_load(store: &dyn SaveStore) -> Result<GameState, SaveError> {
    let bytes = store.read()?.ok_or(SaveError::NoData)?;
    let mut state = decode_state(&bytes)?;
    repair(&mut state);
    Ok(state)
}

/// The stored city, or a new one if nothing usable is stored.
pub fn load_or_default(store: &dyn SaveStore, params: &GameParams) -> GameState {
    match try_load(store) {
        Ok(state) => {
            info!(
                "Loaded city: level {}, {} buildings, {} currency",
                state.level,
                state.buildings.len(),
                state.currency
            );
            state
        }
        Err(SaveError::NoData) => GameState::new(params),
        Err(e) => {
            warn!("Could not load save, starting a new city: {e}");
            GameState::new(params)
        }
    }
}

/// Reconcile achievements against the current definitions and re-derive
/// fields a save could have gotten wrong.
fn repair(state: &mut GameState) {
    let saved = std::mem::take(&mut state.achievements);
    state.achievements = reconcile_achievements(saved);

    if state.level == 0 {
        warn!("Save has level 0, resetting to 1");
        state.level = 1;
    }

    let before = state.buildings.len();
    let mut seen = std::collections::HashSet::new();
    state.buildings.retain(|b| seen.insert((b.x, b.z)));
    if state.buildings.len() != before {
        warn!(
            "Dropped {} buildings sharing a cell with an earlier one",
            before - state.buildings.len()
        );
    }

    simulation::stats::recompute(state);
}
