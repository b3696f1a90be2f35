//! Debounced autosave.
//!
//! Every change to [`GameState`] restarts a quiet window measured in
//! simulation time. When the window elapses without another change,
//! `AutosavePending` is raised. The save crate's bridge system consumes the
//! flag and writes the snapshot; this crate never touches storage.

use bevy::prelude::*;

use crate::game_params::GameParams;
use crate::progression::check_level_up;
use crate::state::GameState;
use crate::SimulationSet;

/// Remaining quiet time before an autosave, or `None` when nothing is
/// waiting to be written.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct AutosaveDebounce {
    pub remaining_ms: Option<u64>,
}

impl AutosaveDebounce {
    /// Restart the window.
    pub fn restart(&mut self, window_ms: u64) {
        self.remaining_ms = Some(window_ms);
    }

    /// Count down by `elapsed_ms`. Returns true on the tick the window closes.
    pub fn tick(&mut self, elapsed_ms: u64) -> bool {
        let Some(remaining) = self.remaining_ms else {
            return false;
        };
        let remaining = remaining.saturating_sub(elapsed_ms);
        if remaining == 0 {
            self.remaining_ms = None;
            true
        } else {
            self.remaining_ms = Some(remaining);
            false
        }
    }

    pub fn cancel(&mut self) {
        self.remaining_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.remaining_ms.is_some()
    }
}

/// Flag resource indicating that an autosave should be performed.
///
/// Set by [`autosave_debounce`]; consumed by the save crate's bridge.
#[derive(Resource, Default, Debug)]
pub struct AutosavePending {
    pub pending: bool,
}

/// Flag resource for an explicit save, written on the next tick regardless
/// of the autosave setting.
#[derive(Resource, Default, Debug)]
pub struct SaveRequest {
    pub requested: bool,
}

/// Runs last in `PostSim`, after every system that can mutate
/// `GameState` this tick.
pub fn autosave_debounce(
    state: Res<GameState>,
    params: Res<GameParams>,
    mut debounce: ResMut<AutosaveDebounce>,
    mut pending: ResMut<AutosavePending>,
) {
    if state.is_changed() {
        debounce.restart(params.autosave_debounce_ms);
        return;
    }
    if debounce.tick(params.construction_tick_ms) && state.settings.autosave_enabled {
        pending.pending = true;
    }
}

pub struct AutosavePlugin;

impl Plugin for AutosavePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AutosaveDebounce>()
            .init_resource::<AutosavePending>()
            .init_resource::<SaveRequest>()
            .add_systems(
                FixedUpdate,
                autosave_debounce
                    .after(check_level_up)
                    .in_set(SimulationSet::PostSim),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_debounce_never_fires() {
        let mut debounce = AutosaveDebounce::default();
        for _ in 0..100 {
            assert!(!debounce.tick(100));
        }
    }

    #[test]
    fn test_fires_once_after_window() {
        let mut debounce = AutosaveDebounce::default();
        debounce.restart(1_000);
        let fired: Vec<usize> = (1..=20).filter(|_| debounce.tick(100)).collect();
        assert_eq!(fired, vec![10]);
        assert!(!debounce.is_armed());
    }

    #[test]
    fn test_restart_extends_window() {
        let mut debounce = AutosaveDebounce::default();
        debounce.restart(1_000);
        for _ in 0..9 {
            assert!(!debounce.tick(100));
        }
        debounce.restart(1_000);
        for _ in 0..9 {
            assert!(!debounce.tick(100));
        }
        assert!(debounce.tick(100));
    }

    #[test]
    fn test_cancel() {
        let mut debounce = AutosaveDebounce::default();
        debounce.restart(1_000);
        debounce.cancel();
        assert!(!debounce.tick(1_000));
    }
}
