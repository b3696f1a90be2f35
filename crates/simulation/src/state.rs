//! The aggregate root owned by the engine.
//!
//! External collaborators never mutate [`GameState`] directly: they send
//! commands through the economy methods and read views from [`crate::hud`].

use std::collections::BTreeMap;

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::achievements::{self, Achievement, AchievementNotification};
use crate::buildings::Building;
use crate::catalog::{self, BuildingType};
use crate::config::BASE_HAPPINESS;
use crate::game_params::GameParams;
use crate::progression::{self, LevelUp};

/// What the player's next grid click does. Placing and deleting are
/// mutually exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
#[serde(tag = "mode", content = "kind", rename_all = "snake_case")]
pub enum ToolSelection {
    #[default]
    None,
    Place(BuildingType),
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct Settings {
    pub autosave_enabled: bool,
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            autosave_enabled: true,
            sound_enabled: true,
        }
    }
}

/// Counters that only ever grow over the life of a city.
#[derive(Debug, Clone, Default, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct LifetimeStats {
    pub buildings_built: BTreeMap<BuildingType, u32>,
    pub total_income: u64,
}

impl LifetimeStats {
    pub fn total_built(&self) -> u32 {
        self.buildings_built.values().sum()
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct GameState {
    pub currency: u64,
    /// Derived by [`crate::stats`].
    pub population: u64,
    /// Derived by [`crate::stats`], clamped to `[0, 100]`.
    pub happiness: u32,
    /// Cumulative; never reset on level-up.
    pub experience: u64,
    pub level: u32,
    pub buildings: Vec<Building>,
    pub achievements: Vec<Achievement>,
    /// Types unlocked by achievements or the starter list, in unlock order.
    pub unlocked_types: Vec<BuildingType>,
    pub tool: ToolSelection,
    /// Simulation milliseconds since the city was founded.
    pub clock_ms: u64,
    pub next_building_seq: u64,
    pub settings: Settings,
    pub lifetime: LifetimeStats,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&GameParams::default())
    }
}

/// What one settle pass changed, for logging and notifications.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SettleReport {
    pub unlocked: Vec<String>,
    pub level_ups: Vec<LevelUp>,
}

impl SettleReport {
    pub fn is_empty(&self) -> bool {
        self.unlocked.is_empty() && self.level_ups.is_empty()
    }
}

impl GameState {
    pub fn new(params: &GameParams) -> Self {
        let mut unlocked_types = Vec::with_capacity(params.starting_unlocked.len());
        for &kind in &params.starting_unlocked {
            if !unlocked_types.contains(&kind) {
                unlocked_types.push(kind);
            }
        }
        Self {
            currency: params.starting_currency,
            population: 0,
            happiness: BASE_HAPPINESS as u32,
            experience: 0,
            level: 1,
            buildings: Vec::new(),
            achievements: achievements::canonical_achievements(),
            unlocked_types,
            tool: ToolSelection::None,
            clock_ms: 0,
            next_building_seq: 0,
            settings: Settings::default(),
            lifetime: LifetimeStats::default(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn building_at(&self, x: i32, z: i32) -> Option<&Building> {
        self.buildings.iter().find(|b| b.is_at(x, z))
    }

    pub fn building(&self, id: &str) -> Option<&Building> {
        self.buildings.iter().find(|b| b.id == id)
    }

    pub fn is_type_unlocked(&self, kind: BuildingType) -> bool {
        self.unlocked_types.contains(&kind)
    }

    /// A type is placeable once the player reaches its unlock level, or
    /// earlier if an achievement (or the starter list) unlocked it.
    pub fn can_place(&self, kind: BuildingType) -> bool {
        catalog::is_unlocked(kind, self.level) || self.is_type_unlocked(kind)
    }

    /// Inserts into the unlocked set; returns false if already present.
    pub fn unlock_type(&mut self, kind: BuildingType) -> bool {
        if self.is_type_unlocked(kind) {
            return false;
        }
        self.unlocked_types.push(kind);
        true
    }

    pub fn required_xp(&self) -> u64 {
        progression::required_xp(self.level)
    }

    pub fn count_of(&self, kind: BuildingType) -> u64 {
        self.buildings.iter().filter(|b| b.kind == kind).count() as u64
    }

    /// Re-derive stats, achievements and level until nothing changes.
    ///
    /// Each pass can only unlock achievements or raise the level, both of
    /// which are bounded, so the loop terminates.
    pub fn settle(&mut self) -> SettleReport {
        let mut report = SettleReport::default();
        loop {
            crate::stats::recompute(self);
            let unlocked = achievements::evaluate(self);
            let level_ups = progression::apply_level_ups(self);
            if unlocked.is_empty() && level_ups.is_empty() {
                break;
            }
            report.unlocked.extend(unlocked);
            report.level_ups.extend(level_ups);
        }
        report
    }

    /// [`GameState::settle`] on the world's state, queuing unlocks for the UI.
    /// Used after commands applied between schedule runs.
    pub fn settle_world(world: &mut World) -> SettleReport {
        let report = world.resource_mut::<GameState>().settle();
        if !report.unlocked.is_empty() {
            if let Some(mut notifications) = world.get_resource_mut::<AchievementNotification>() {
                notifications.recent_unlocks.extend(report.unlocked.iter().cloned());
            }
        }
        report
    }

    // -------------------------------------------------------------------------
    // Selection state (no economic effect)
    // -------------------------------------------------------------------------

    /// `Some(kind)` arms placement and leaves delete mode; `None` clears the tool.
    pub fn select_tool(&mut self, kind: Option<BuildingType>) {
        self.tool = match kind {
            Some(kind) => ToolSelection::Place(kind),
            None => ToolSelection::None,
        };
    }

    pub fn toggle_delete_mode(&mut self) {
        self.tool = match self.tool {
            ToolSelection::Delete => ToolSelection::None,
            _ => ToolSelection::Delete,
        };
    }

    pub fn is_delete_mode(&self) -> bool {
        self.tool == ToolSelection::Delete
    }

    pub fn selected_type(&self) -> Option<BuildingType> {
        match self.tool {
            ToolSelection::Place(kind) => Some(kind),
            _ => None,
        }
    }
}
