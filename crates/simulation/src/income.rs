//! Periodic income from completed buildings.

use bevy::prelude::*;

use crate::buildings::progress_construction;
use crate::game_params::GameParams;
use crate::state::GameState;
use crate::SimulationSet;

/// Counts fixed ticks between two income collections.
#[derive(Resource, Default, Debug)]
pub struct IncomeTimer {
    pub ticks: u64,
}

impl IncomeTimer {
    /// Returns true once every `every` calls.
    pub fn tick(&mut self, every: u64) -> bool {
        self.ticks += 1;
        if self.ticks >= every {
            self.ticks = 0;
            true
        } else {
            false
        }
    }
}

impl GameState {
    /// Credit each completed building whose last credit is at least
    /// `period_ms` old. A building is credited at most once per call, so a
    /// stalled clock never produces a burst of catch-up income.
    pub fn tick_income(&mut self, now_ms: u64, period_ms: u64) -> u64 {
        let mut total = 0;
        for building in self.buildings.iter_mut() {
            if building.under_construction {
                continue;
            }
            if now_ms.saturating_sub(building.last_income_ms) < period_ms {
                continue;
            }
            total += building.income();
            building.last_income_ms = now_ms;
        }
        self.currency += total;
        self.lifetime.total_income += total;
        total
    }

    pub fn has_income_sources(&self) -> bool {
        self.buildings.iter().any(|b| b.is_complete())
    }
}

pub fn collect_income(
    mut timer: ResMut<IncomeTimer>,
    mut state: ResMut<GameState>,
    params: Res<GameParams>,
) {
    if !timer.tick(params.income_every_ticks()) {
        return;
    }
    if !state.has_income_sources() {
        return;
    }
    let now = state.clock_ms;
    let earned = state.tick_income(now, params.income_interval_ms);
    if earned > 0 {
        debug!("Collected {} income at {} ms", earned, now);
    }
}

pub struct IncomePlugin;

impl Plugin for IncomePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<IncomeTimer>().add_systems(
            FixedUpdate,
            collect_income
                .after(progress_construction)
                .in_set(SimulationSet::Simulation),
        );
    }
}
