use bevy::prelude::*;

use super::construction::progress_construction;

pub struct BuildingsPlugin;

impl Plugin for BuildingsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            progress_construction.in_set(crate::SimulationSet::Simulation),
        );
    }
}
