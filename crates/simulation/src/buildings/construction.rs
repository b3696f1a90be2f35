use bevy::prelude::*;

use crate::game_params::GameParams;
use crate::state::GameState;

use super::types::Building;

/// Advance one building by `tick_ms`. Returns true on the tick that
/// completes it.
///
/// Progress is derived from the integer elapsed time so a building with an
/// `N`-second construction time completes after exactly `N * 1000 / tick_ms`
/// ticks.
pub(crate) fn advance(building: &mut Building, now_ms: u64, tick_ms: u64) -> bool {
    if !building.under_construction {
        return false;
    }
    let total_ms = building.config().construction_time_ms();
    building.construction_elapsed_ms = building.construction_elapsed_ms.saturating_add(tick_ms);

    if total_ms == 0 || building.construction_elapsed_ms >= total_ms {
        building.construction_elapsed_ms = total_ms;
        building.construction_progress = 1.0;
        building.under_construction = false;
        building.last_income_ms = now_ms;
        return true;
    }
    building.construction_progress = building.construction_elapsed_ms as f64 / total_ms as f64;
    false
}

impl GameState {
    /// Advance every building under construction by one tick. Returns the
    /// ids of buildings that completed on this tick.
    pub fn tick_construction(&mut self, now_ms: u64, tick_ms: u64) -> Vec<String> {
        let mut completed = Vec::new();
        for building in self.buildings.iter_mut() {
            if advance(building, now_ms, tick_ms) {
                completed.push(building.id.clone());
            }
        }
        completed
    }

    pub fn has_construction(&self) -> bool {
        self.buildings.iter().any(|b| b.under_construction)
    }
}

/// Fixed-tick construction process. Leaves `GameState` untouched (and its
/// change tick unbumped) when nothing is being built.
pub fn progress_construction(mut state: ResMut<GameState>, params: Res<GameParams>) {
    if !state.has_construction() {
        return;
    }
    let now = state.clock_ms;
    let completed = state.tick_construction(now, params.construction_tick_ms);
    for id in &completed {
        debug!("Construction complete: {}", id);
    }
}
