use std::sync::Arc;

use bevy::prelude::*;

use crate::store::SaveStore;

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// The store every save in this app goes through.
#[derive(Resource, Clone)]
pub struct ActiveSaveStore(pub Arc<dyn SaveStore>);

/// Outcome counters for writes performed by the bridge.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct SaveStatus {
    pub writes: u64,
    pub failures: u64,
    pub last_error: Option<String>,
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

/// Wires a [`SaveStore`] into the simulation's autosave flags.
///
/// Loading is not a system: callers decode a state with
/// [`crate::load_or_default`] and insert it before `SimulationPlugin`.
pub struct SavePlugin {
    pub store: Arc<dyn SaveStore>,
}

impl SavePlugin {
    pub fn new(store: Arc<dyn SaveStore>) -> Self {
        Self { store }
    }
}

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ActiveSaveStore(self.store.clone()))
            .init_resource::<SaveStatus>();

        // Autosave bridge: turns simulation-side flags into writes.
        app.add_plugins(crate::autosave_bridge::AutosaveBridgePlugin);
    }
}
