//! # TestCity: headless integration test harness
//!
//! Wraps a `bevy::app::App` with `SimulationPlugin` and drives the
//! `FixedUpdate` schedule directly, so every run is deterministic and
//! independent of wall-clock time.

mod assertions;
mod queries;
mod setup;

use bevy::app::App;

use crate::game_params::GameParams;
use crate::SimulationPlugin;

/// A headless Bevy App wrapping `SimulationPlugin` for integration testing.
///
/// Use builder methods to set up city state, issue commands, then call
/// `tick()` to advance the simulation and assert on the resulting state.
pub struct TestCity {
    app: App,
}

impl TestCity {
    /// A fresh city with default parameters.
    pub fn new() -> Self {
        Self::with_params(GameParams::default())
    }

    /// A fresh city with custom parameters.
    pub fn with_params(params: GameParams) -> Self {
        let mut app = App::new();
        app.insert_resource(params);
        app.add_plugins(SimulationPlugin);
        Self { app }
    }
}

impl Default for TestCity {
    fn default() -> Self {
        Self::new()
    }
}
