//! Builder methods and player commands for `TestCity`.

use bevy::prelude::*;

use crate::buildings::Building;
use crate::catalog::BuildingType;
use crate::economy::{apply_command, ClickOutcome, CommandError};
use crate::state::GameState;

use super::TestCity;

impl TestCity {
    // -----------------------------------------------------------------------
    // Builders
    // -----------------------------------------------------------------------

    /// Set the currency to the given amount.
    pub fn with_budget(mut self, currency: u64) -> Self {
        self.state_mut().currency = currency;
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.state_mut().level = level;
        self
    }

    pub fn with_experience(mut self, experience: u64) -> Self {
        self.state_mut().experience = experience;
        self
    }

    pub fn with_autosave(mut self, enabled: bool) -> Self {
        self.state_mut().settings.autosave_enabled = enabled;
        self
    }

    /// Insert an already completed building, bypassing the economy.
    pub fn with_completed_building(
        mut self,
        x: i32,
        z: i32,
        kind: BuildingType,
        level: u32,
    ) -> Self {
        let mut state = self.state_mut();
        let id = format!("{}-{}-{}-{}", kind, x, z, state.next_building_seq);
        state.next_building_seq += 1;
        let mut building = Building::new(id, kind, x, z, state.clock_ms);
        building.level = level;
        building.under_construction = false;
        building.construction_progress = 1.0;
        building.construction_elapsed_ms = kind.config().construction_time_ms();
        state.buildings.push(building);
        self
    }

    // -----------------------------------------------------------------------
    // Commands (settled like the engine facade settles them)
    // -----------------------------------------------------------------------

    pub fn place(&mut self, x: i32, z: i32, kind: BuildingType) -> Result<String, CommandError> {
        apply_command(self.app.world_mut(), |state| state.place_building(x, z, kind))
    }

    pub fn delete(&mut self, x: i32, z: i32) -> Result<u64, CommandError> {
        apply_command(self.app.world_mut(), |state| state.delete_building(x, z))
    }

    pub fn upgrade(&mut self, id: &str) -> Result<u64, CommandError> {
        apply_command(self.app.world_mut(), |state| state.upgrade_building(id))
    }

    pub fn click(&mut self, x: i32, z: i32) -> Result<ClickOutcome, CommandError> {
        apply_command(self.app.world_mut(), |state| state.click_cell(x, z))
    }

    /// Mutable access to the state. Marks it changed.
    pub fn state_mut(&mut self) -> Mut<'_, GameState> {
        self.app.world_mut().resource_mut::<GameState>()
    }
}
