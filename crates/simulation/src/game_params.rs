//! Data-driven game parameters.
//!
//! Tick periods, starting money and the starter unlock list are collected in
//! a single [`GameParams`] resource so a headless run can override them from
//! a JSON file without recompilation. Formula constants that define the game
//! rules stay in [`crate::config`].

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::catalog::BuildingType;
use crate::config::{
    AUTOSAVE_DEBOUNCE_MS, CONSTRUCTION_TICK_MS, INCOME_INTERVAL_MS, STARTING_CURRENCY,
};

/// Tunables for a new city and for the simulation clocks.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameParams {
    /// Currency a new city starts with.
    pub starting_currency: u64,
    /// Building types placeable from the start regardless of level.
    pub starting_unlocked: Vec<BuildingType>,
    /// Period of the construction tick (one `FixedUpdate` run).
    pub construction_tick_ms: u64,
    /// Period of the income tick. Rounded down to a whole number of
    /// construction ticks by [`GameParams::income_every_ticks`].
    pub income_interval_ms: u64,
    /// Quiet window before an autosave is written.
    pub autosave_debounce_ms: u64,
}

impl Default for GameParams {
    fn default() -> Self {
        Self {
            starting_currency: STARTING_CURRENCY,
            starting_unlocked: vec![BuildingType::House, BuildingType::Park, BuildingType::Road],
            construction_tick_ms: CONSTRUCTION_TICK_MS,
            income_interval_ms: INCOME_INTERVAL_MS,
            autosave_debounce_ms: AUTOSAVE_DEBOUNCE_MS,
        }
    }
}

impl GameParams {
    /// Parse parameters from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let mut params: GameParams = serde_json::from_str(json)?;
        params.sanitize();
        Ok(params)
    }

    /// Number of construction ticks between two income ticks (at least 1).
    pub fn income_every_ticks(&self) -> u64 {
        (self.income_interval_ms / self.construction_tick_ms.max(1)).max(1)
    }

    fn sanitize(&mut self) {
        if self.construction_tick_ms == 0 {
            warn!(
                "GameParams: construction_tick_ms of 0 is invalid, using {}",
                CONSTRUCTION_TICK_MS
            );
            self.construction_tick_ms = CONSTRUCTION_TICK_MS;
        }
        if self.income_interval_ms == 0 {
            warn!(
                "GameParams: income_interval_ms of 0 is invalid, using {}",
                INCOME_INTERVAL_MS
            );
            self.income_interval_ms = INCOME_INTERVAL_MS;
        }
    }
}
