//! Deterministic simulation ordering via `SystemSet` phases.
//!
//! Every system in `FixedUpdate` belongs to one of these sets, and the sets
//! are configured as a chain, so a tick always runs as
//!
//! ```text
//! PreSim  →  Simulation  →  PostSim
//! ```
//!
//! * **PreSim** – Tick counter and simulation clock.
//! * **Simulation** – Construction progress and income collection. These are
//!   the only periodic processes that mutate buildings or currency.
//! * **PostSim** – Derived state: stats, achievements, level-ups, then the
//!   autosave debounce, which must observe the settled state.

use bevy::prelude::*;

/// Ordered phases for systems running in the `FixedUpdate` schedule.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Clock and counters.
    PreSim,
    /// Construction and income.
    Simulation,
    /// Stats, achievements, progression, autosave.
    PostSim,
}

pub(crate) fn configure_sets(app: &mut App) {
    app.configure_sets(
        FixedUpdate,
        (
            SimulationSet::PreSim,
            SimulationSet::Simulation,
            SimulationSet::PostSim,
        )
            .chain(),
    );
}
