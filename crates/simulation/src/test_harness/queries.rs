//! Query and simulation-tick methods for `TestCity`.

use bevy::prelude::*;

use crate::achievements::AchievementNotification;
use crate::autosave::{AutosaveDebounce, AutosavePending};
use crate::buildings::Building;
use crate::game_params::GameParams;
use crate::state::GameState;
use crate::stats::CityStats;
use crate::TickCounter;

use super::TestCity;

impl TestCity {
    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    /// Run N fixed-update ticks by directly executing the `FixedUpdate`
    /// schedule.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    /// Run enough ticks to cover `ms` of simulation time.
    pub fn advance_ms(&mut self, ms: u64) {
        let tick_ms = self.params().construction_tick_ms;
        let ticks = ms.div_ceil(tick_ms);
        self.tick(ticks as u32);
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn state(&self) -> &GameState {
        self.app.world().resource::<GameState>()
    }

    pub fn params(&self) -> &GameParams {
        self.app.world().resource::<GameParams>()
    }

    pub fn stats(&self) -> &CityStats {
        self.app.world().resource::<CityStats>()
    }

    pub fn currency(&self) -> u64 {
        self.state().currency
    }

    pub fn level(&self) -> u32 {
        self.state().level
    }

    pub fn clock_ms(&self) -> u64 {
        self.state().clock_ms
    }

    pub fn tick_count(&self) -> u64 {
        self.app.world().resource::<TickCounter>().0
    }

    pub fn building_count(&self) -> usize {
        self.state().buildings.len()
    }

    pub fn building_at(&self, x: i32, z: i32) -> Option<&Building> {
        self.state().building_at(x, z)
    }

    pub fn is_achievement_unlocked(&self, id: &str) -> bool {
        self.state()
            .achievements
            .iter()
            .any(|a| a.id == id && a.unlocked)
    }

    /// Drain achievement notifications.
    pub fn take_notifications(&mut self) -> Vec<String> {
        self.app
            .world_mut()
            .resource_mut::<AchievementNotification>()
            .take()
    }

    pub fn autosave_pending(&self) -> bool {
        self.app.world().resource::<AutosavePending>().pending
    }

    /// Consume the pending flag as the save bridge would.
    pub fn clear_autosave_pending(&mut self) {
        self.app.world_mut().resource_mut::<AutosavePending>().pending = false;
    }

    pub fn debounce(&self) -> &AutosaveDebounce {
        self.app.world().resource::<AutosaveDebounce>()
    }
}
