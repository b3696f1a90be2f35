use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::Serialize;

use crate::catalog::BuildingCategory;
use crate::config::{BASE_HAPPINESS, MAX_HAPPINESS};
use crate::game_params::GameParams;
use crate::state::GameState;
use crate::SimulationSet;

/// Population and clamped happiness from completed buildings.
pub fn derive(state: &GameState) -> (u64, u32) {
    let mut population = 0u64;
    let mut raw_happiness = 0i64;
    for building in state.buildings.iter().filter(|b| b.is_complete()) {
        let cfg = building.config();
        population += cfg.population_at_level(building.level);
        raw_happiness += cfg.happiness_at_level(building.level);
    }
    let happiness = (BASE_HAPPINESS + raw_happiness).clamp(0, MAX_HAPPINESS) as u32;
    (population, happiness)
}

/// Write the derived population and happiness back into `state`.
/// Returns true if either value moved.
pub fn recompute(state: &mut GameState) -> bool {
    let (population, happiness) = derive(state);
    if state.population == population && state.happiness == happiness {
        return false;
    }
    state.population = population;
    state.happiness = happiness;
    true
}

/// Read-only city aggregates for the HUD. Rebuilt every tick, never saved.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize)]
pub struct CityStats {
    pub population: u64,
    pub happiness: u32,
    pub income_per_second: f64,
    /// Sum of accumulated costs of every building, complete or not.
    pub city_value: u64,
    pub building_count: usize,
    pub under_construction: usize,
    pub by_category: BTreeMap<String, usize>,
}

impl CityStats {
    pub fn from_state(state: &GameState, income_interval_ms: u64) -> Self {
        let (population, happiness) = derive(state);
        let income_per_period: u64 = state.buildings.iter().map(|b| b.income()).sum();
        let period_secs = income_interval_ms.max(1) as f64 / 1_000.0;

        let mut by_category: BTreeMap<String, usize> = BuildingCategory::ALL
            .iter()
            .map(|c| (category_name(*c).to_string(), 0))
            .collect();
        for building in &state.buildings {
            *by_category
                .entry(category_name(building.config().category).to_string())
                .or_insert(0) += 1;
        }

        Self {
            population,
            happiness,
            income_per_second: income_per_period as f64 / period_secs,
            city_value: state.buildings.iter().map(|b| b.accumulated_cost).sum(),
            building_count: state.buildings.len(),
            under_construction: state
                .buildings
                .iter()
                .filter(|b| b.under_construction)
                .count(),
            by_category,
        }
    }
}

fn category_name(category: BuildingCategory) -> &'static str {
    match category {
        BuildingCategory::Residential => "residential",
        BuildingCategory::Commercial => "commercial",
        BuildingCategory::Recreation => "recreation",
        BuildingCategory::Infrastructure => "infrastructure",
        BuildingCategory::Industrial => "industrial",
    }
}

pub fn update_stats(
    mut state: ResMut<GameState>,
    mut stats: ResMut<CityStats>,
    params: Res<GameParams>,
) {
    let (population, happiness) = derive(&state);
    if state.population != population || state.happiness != happiness {
        recompute(&mut state);
    }
    let next = CityStats::from_state(&state, params.income_interval_ms);
    stats.set_if_neq(next);
}

pub struct StatsPlugin;

impl Plugin for StatsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CityStats>().add_systems(
            FixedUpdate,
            update_stats.in_set(SimulationSet::PostSim),
        );
    }
}
