//! The command facade over a headless simulation `App`.
//!
//! Commands run between schedule runs and are settled immediately, so a
//! query right after a command already sees unlocked achievements and
//! level-ups. Time only moves through [`Engine::tick`] and
//! [`Engine::advance`].

use std::sync::Arc;

use bevy::prelude::*;

use save::{ActiveSaveStore, MemoryStore, SavePlugin, SaveError, SaveStatus, SaveStore};
use simulation::achievements::AchievementNotification;
use simulation::autosave::{AutosaveDebounce, AutosavePending, SaveRequest};
use simulation::buildings::BuildingView;
use simulation::catalog::BuildingType;
use simulation::economy::{apply_command, ClickOutcome};
use simulation::hud::{building_views, HudSnapshot};
use simulation::income::IncomeTimer;
use simulation::stats::CityStats;
use simulation::{CommandError, GameParams, GameState, SimulationPlugin};

/// Longest single `advance`, in simulation milliseconds (one hour).
pub const MAX_ADVANCE_MS: u64 = 3_600_000;

pub struct Engine {
    app: App,
    /// Milliseconds passed to `advance` that did not fill a whole tick yet.
    carry_ms: u64,
}

impl Engine {
    /// Load the city stored in `store` (or found a new one) and wire autosave
    /// to the same store.
    pub fn new(params: GameParams, store: Arc<dyn SaveStore>) -> Self {
        let state = save::load_or_default(store.as_ref(), &params);
        Self::with_state(params, state, store)
    }

    /// Start from an explicit state, ignoring whatever `store` holds.
    pub fn with_state(params: GameParams, state: GameState, store: Arc<dyn SaveStore>) -> Self {
        let mut app = App::new();
        app.insert_resource(params)
            .insert_resource(state)
            .add_plugins(SimulationPlugin)
            .add_plugins(SavePlugin::new(store));
        Self { app, carry_ms: 0 }
    }

    /// A new city with default parameters, saved to memory only.
    pub fn in_memory() -> Self {
        Self::new(GameParams::default(), Arc::new(MemoryStore::new()))
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    pub fn try_place(&mut self, x: i32, z: i32, kind: BuildingType) -> Result<String, CommandError> {
        apply_command(self.app.world_mut(), |state| state.place_building(x, z, kind))
    }

    pub fn try_delete(&mut self, x: i32, z: i32) -> Result<u64, CommandError> {
        apply_command(self.app.world_mut(), |state| state.delete_building(x, z))
    }

    pub fn try_upgrade(&mut self, id: &str) -> Result<u64, CommandError> {
        apply_command(self.app.world_mut(), |state| state.upgrade_building(id))
    }

    /// Click a cell with the current tool.
    pub fn try_click(&mut self, x: i32, z: i32) -> Result<ClickOutcome, CommandError> {
        apply_command(self.app.world_mut(), |state| state.click_cell(x, z))
    }

    pub fn place_building(&mut self, x: i32, z: i32, kind: BuildingType) -> bool {
        log_rejection("place", self.try_place(x, z, kind))
    }

    pub fn delete_building(&mut self, x: i32, z: i32) -> bool {
        log_rejection("delete", self.try_delete(x, z))
    }

    pub fn upgrade_building(&mut self, id: &str) -> bool {
        log_rejection("upgrade", self.try_upgrade(id))
    }

    pub fn click_cell(&mut self, x: i32, z: i32) -> bool {
        log_rejection("click", self.try_click(x, z))
    }

    pub fn select_tool(&mut self, kind: Option<BuildingType>) {
        self.state_mut().select_tool(kind);
    }

    pub fn toggle_delete_mode(&mut self) {
        self.state_mut().toggle_delete_mode();
    }

    /// Replace the city with a new one. The replacement is autosaved like
    /// any other change.
    pub fn new_game(&mut self) {
        let state = GameState::new(self.params());
        let world = self.app.world_mut();
        world.insert_resource(state);
        world.insert_resource(IncomeTimer::default());
        world.resource_mut::<AutosaveDebounce>().cancel();
        world.resource_mut::<AchievementNotification>().take();
        self.carry_ms = 0;
        info!("Started a new city");
    }

    /// Write the current state now, bypassing the debounce.
    pub fn save_now(&mut self) -> Result<(), SaveError> {
        let store = self.app.world().resource::<ActiveSaveStore>().0.clone();
        let result = save::save_state(store.as_ref(), self.state());

        let world = self.app.world_mut();
        match &result {
            Ok(()) => {
                let mut status = world.resource_mut::<SaveStatus>();
                status.writes += 1;
                status.last_error = None;
                // The snapshot is current; nothing left for the debounce to write.
                world.resource_mut::<AutosaveDebounce>().cancel();
                world.resource_mut::<AutosavePending>().pending = false;
            }
            Err(e) => {
                warn!("Save failed: {e}");
                let mut status = world.resource_mut::<SaveStatus>();
                status.failures += 1;
                status.last_error = Some(e.to_string());
            }
        }
        result
    }

    /// Ask the save bridge to write on the next tick.
    pub fn request_save(&mut self) {
        self.app.world_mut().resource_mut::<SaveRequest>().requested = true;
    }

    // -----------------------------------------------------------------------
    // Time
    // -----------------------------------------------------------------------

    /// Run one fixed tick.
    pub fn tick(&mut self) {
        self.app.world_mut().run_schedule(FixedUpdate);
    }

    /// Advance simulation time by `ms`, capped at [`MAX_ADVANCE_MS`].
    /// Returns the number of ticks run. Remainders shorter than a tick carry
    /// over to the next call.
    pub fn advance(&mut self, ms: u64) -> u64 {
        let tick_ms = self.params().construction_tick_ms.max(1);
        let total = self.carry_ms + ms.min(MAX_ADVANCE_MS);
        let ticks = total / tick_ms;
        self.carry_ms = total % tick_ms;
        for _ in 0..ticks {
            self.tick();
        }
        ticks
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn state(&self) -> &GameState {
        self.app.world().resource::<GameState>()
    }

    pub fn params(&self) -> &GameParams {
        self.app.world().resource::<GameParams>()
    }

    /// HUD values derived from the current state, fresh even between ticks.
    pub fn hud(&self) -> HudSnapshot {
        let stats = CityStats::from_state(self.state(), self.params().income_interval_ms);
        HudSnapshot::new(self.state(), &stats)
    }

    pub fn buildings(&self) -> Vec<BuildingView> {
        building_views(self.state())
    }

    pub fn save_status(&self) -> &SaveStatus {
        self.app.world().resource::<SaveStatus>()
    }

    /// Achievement ids unlocked since the last call.
    pub fn take_notifications(&mut self) -> Vec<String> {
        self.app
            .world_mut()
            .resource_mut::<AchievementNotification>()
            .take()
    }

    /// Shut down: drop any pending autosave without writing it and hand back
    /// the final state.
    pub fn stop(mut self) -> GameState {
        let world = self.app.world_mut();
        world.resource_mut::<AutosaveDebounce>().cancel();
        world.resource_mut::<AutosavePending>().pending = false;
        world.resource_mut::<SaveRequest>().requested = false;
        world.remove_resource::<GameState>().unwrap_or_default()
    }

    fn state_mut(&mut self) -> Mut<'_, GameState> {
        self.app.world_mut().resource_mut::<GameState>()
    }

}

impl Default for Engine {
    fn default() -> Self {
        Self::in_memory()
    }
}

fn log_rejection<T>(command: &str, result: Result<T, CommandError>) -> bool {
    match result {
        Ok(_) => true,
        Err(e) => {
            debug!("Rejected {command}: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_engine() -> (Engine, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let engine = Engine::new(GameParams::default(), store.clone());
        (engine, store)
    }

    #[test]
    fn test_new_engine_is_a_fresh_city() {
        let engine = Engine::in_memory();
        let hud = engine.hud();
        assert_eq!(hud.currency, 5_000);
        assert_eq!(hud.level, 1);
        assert_eq!(hud.population, 0);
        assert!(engine.buildings().is_empty());
    }

    #[test]
    fn test_commands_report_success_as_bool() {
        let mut engine = Engine::in_memory();
        assert!(engine.place_building(0, 0, BuildingType::House));
        assert!(!engine.place_building(0, 0, BuildingType::Road), "occupied");
        assert!(!engine.place_building(1, 0, BuildingType::Stadium), "locked");
        assert!(!engine.delete_building(5, 5), "empty");
        assert!(!engine.upgrade_building("nope"), "unknown id");
        assert!(engine.delete_building(0, 0));
    }

    #[test]
    fn test_place_settles_immediately() {
        let mut engine = Engine::in_memory();
        engine.place_building(0, 0, BuildingType::House);
        let hud = engine.hud();
        let first_house = hud.achievements.iter().find(|a| a.id == "first_house").unwrap();
        assert!(first_house.unlocked);
        assert_eq!(hud.level, 2);
        let unlocked = engine.take_notifications();
        assert!(unlocked.contains(&"first_house".to_string()));
        assert!(engine.take_notifications().is_empty());
    }

    #[test]
    fn test_advance_carries_partial_ticks() {
        let mut engine = Engine::in_memory();
        assert_eq!(engine.advance(50), 0);
        assert_eq!(engine.advance(50), 1);
        assert_eq!(engine.advance(1_000), 10);
        assert_eq!(engine.state().clock_ms, 1_100);
    }

    #[test]
    fn test_building_completes_through_advance() {
        let mut engine = Engine::in_memory();
        engine.place_building(0, 0, BuildingType::House);
        engine.advance(3_000);
        let views = engine.buildings();
        assert_eq!(views.len(), 1);
        assert!(!views[0].under_construction);
        assert_eq!(engine.hud().population, 4);
    }

    #[test]
    fn test_tool_selection() {
        let mut engine = Engine::in_memory();
        engine.select_tool(Some(BuildingType::Park));
        assert_eq!(engine.state().selected_type(), Some(BuildingType::Park));
        engine.toggle_delete_mode();
        assert!(engine.state().is_delete_mode());
        assert_eq!(engine.state().selected_type(), None);
    }

    #[test]
    fn test_save_now_then_reload() {
        let (mut engine, store) = memory_engine();
        engine.place_building(2, 3, BuildingType::Road);
        engine.save_now().unwrap();
        assert_eq!(store.write_count(), 1);
        let saved = engine.state().clone();

        let reopened = Engine::new(GameParams::default(), store);
        assert_eq!(reopened.state(), &saved);
    }

    #[test]
    fn test_autosave_reaches_the_store() {
        let (mut engine, store) = memory_engine();
        engine.advance(1_100);
        assert_eq!(store.write_count(), 1);
        assert_eq!(engine.save_status().writes, 1);
    }

    #[test]
    fn test_stop_cancels_pending_autosave() {
        let (mut engine, store) = memory_engine();
        engine.advance(1_100);
        engine.place_building(0, 0, BuildingType::Park);
        engine.advance(500);
        let writes_before = store.write_count();

        let final_state = engine.stop();
        assert_eq!(final_state.buildings.len(), 1);
        assert_eq!(store.write_count(), writes_before);
    }

    #[test]
    fn test_new_game_resets_city() {
        let mut engine = Engine::in_memory();
        engine.place_building(0, 0, BuildingType::House);
        engine.advance(5_000);
        engine.new_game();

        assert_eq!(engine.state(), &GameState::new(&GameParams::default()));
        assert!(engine.take_notifications().is_empty());
    }

    #[test]
    fn test_huge_advance_after_partial_tick_is_capped() {
        let mut engine = Engine::in_memory();
        assert_eq!(engine.advance(50), 0);
        assert_eq!(engine.advance(u64::MAX), (50 + MAX_ADVANCE_MS) / 100);
        assert_eq!(engine.state().clock_ms, MAX_ADVANCE_MS);
    }

    #[test]
    fn test_rejected_command_does_not_save_again() {
        let (mut engine, store) = memory_engine();
        engine.advance(1_100);
        assert_eq!(store.write_count(), 1);

        let before = engine.state().clone();
        assert!(!engine.delete_building(9, 9));
        assert!(!engine.upgrade_building("missing"));
        assert!(!engine.click_cell(0, 0));
        assert_eq!(engine.state(), &before);

        engine.advance(1_100);
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn test_click_uses_selected_tool() {
        let mut engine = Engine::in_memory();
        engine.select_tool(Some(BuildingType::Road));
        assert_eq!(
            engine.try_click(4, 4),
            Ok(ClickOutcome::Placed("road-4-4-0".into()))
        );
        engine.toggle_delete_mode();
        assert_eq!(engine.try_click(4, 4), Ok(ClickOutcome::Deleted(50)));
        assert!(engine.buildings().is_empty());
    }

    #[test]
    fn test_new_game_resets_timers() {
        let mut engine = Engine::in_memory();
        engine.place_building(0, 0, BuildingType::House);
        engine.advance(4_000);
        assert!(engine.app.world().resource::<IncomeTimer>().ticks > 0);

        engine.new_game();
        assert_eq!(engine.app.world().resource::<IncomeTimer>().ticks, 0);
        assert!(!engine.app.world().resource::<AutosaveDebounce>().is_armed());
    }
}
