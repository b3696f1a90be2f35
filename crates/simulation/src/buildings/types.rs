use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::catalog::{self, BuildingConfig, BuildingType};

/// A placed building. Owned by [`crate::state::GameState::buildings`].
#[derive(Debug, Clone, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct Building {
    pub id: String,
    pub kind: BuildingType,
    pub x: i32,
    pub z: i32,
    /// Base cost plus every upgrade cost paid. Drives the demolition refund.
    pub accumulated_cost: u64,
    pub level: u32,
    /// Normalized completion in `[0, 1]`, derived from `construction_elapsed_ms`.
    pub construction_progress: f64,
    pub construction_elapsed_ms: u64,
    pub under_construction: bool,
    /// Simulation time of the last income credit (or of completion).
    pub last_income_ms: u64,
}

impl Building {
    /// A freshly placed level-1 building, under construction.
    pub fn new(id: String, kind: BuildingType, x: i32, z: i32, now_ms: u64) -> Self {
        Self {
            id,
            kind,
            x,
            z,
            accumulated_cost: catalog::config(kind).base_cost,
            level: 1,
            construction_progress: 0.0,
            construction_elapsed_ms: 0,
            under_construction: true,
            last_income_ms: now_ms,
        }
    }

    pub fn config(&self) -> &'static BuildingConfig {
        catalog::config(self.kind)
    }

    pub fn is_at(&self, x: i32, z: i32) -> bool {
        self.x == x && self.z == z
    }

    pub fn is_complete(&self) -> bool {
        !self.under_construction
    }

    pub fn is_max_level(&self) -> bool {
        self.level >= self.config().max_level
    }

    /// Income per period; zero while under construction.
    pub fn income(&self) -> u64 {
        if self.under_construction {
            return 0;
        }
        self.config().income_at_level(self.level)
    }
}

/// Read-only projection of a building for draw calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildingView {
    pub id: String,
    pub kind: BuildingType,
    pub x: i32,
    pub z: i32,
    pub level: u32,
    pub construction_progress: f64,
    pub under_construction: bool,
}

impl From<&Building> for BuildingView {
    fn from(b: &Building) -> Self {
        Self {
            id: b.id.clone(),
            kind: b.kind,
            x: b.x,
            z: b.z,
            level: b.level,
            construction_progress: b.construction_progress,
            under_construction: b.under_construction,
        }
    }
}
