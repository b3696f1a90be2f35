//! Player commands that move money: placing, demolishing and upgrading.
//!
//! Every command validates first and mutates second, so an `Err` leaves
//! [`GameState`] exactly as it was.

use std::fmt;

use bevy::prelude::*;

use crate::buildings::Building;
use crate::catalog::{self, BuildingType};
use crate::config::{PLACE_XP_DIVISOR, REFUND_RATE, UPGRADE_XP_DIVISOR};
use crate::state::{GameState, ToolSelection};

/// Why a command was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The type is neither level-unlocked nor in the unlocked set.
    Locked(BuildingType),
    InsufficientFunds { needed: u64, available: u64 },
    Occupied { x: i32, z: i32 },
    EmptyCell { x: i32, z: i32 },
    UnknownBuilding(String),
    MaxLevel(String),
    /// A cell was clicked with no building type armed and delete mode off.
    NoToolSelected,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Locked(kind) => write!(f, "{kind} is not unlocked yet"),
            CommandError::InsufficientFunds { needed, available } => {
                write!(f, "insufficient funds: need {needed}, have {available}")
            }
            CommandError::Occupied { x, z } => write!(f, "cell ({x}, {z}) is occupied"),
            CommandError::EmptyCell { x, z } => write!(f, "no building at ({x}, {z})"),
            CommandError::UnknownBuilding(id) => write!(f, "no building with id '{id}'"),
            CommandError::MaxLevel(id) => write!(f, "building '{id}' is already at max level"),
            CommandError::NoToolSelected => write!(f, "no tool selected"),
        }
    }
}

impl std::error::Error for CommandError {}

/// `floor(accumulated_cost * 0.5)`.
pub fn refund_for(building: &Building) -> u64 {
    (building.accumulated_cost as f64 * REFUND_RATE).floor() as u64
}

/// What a grid click did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Placed(String),
    Deleted(u64),
}

/// Run a command against the world's [`GameState`] and settle it.
///
/// The state is only flagged as changed when the command succeeds, so a
/// rejected command does not restart the autosave window.
pub fn apply_command<T>(
    world: &mut World,
    command: impl FnOnce(&mut GameState) -> Result<T, CommandError>,
) -> Result<T, CommandError> {
    let result = {
        let mut state = world.resource_mut::<GameState>();
        let result = command(state.bypass_change_detection());
        if result.is_ok() {
            state.set_changed();
        }
        result
    };
    if result.is_ok() {
        GameState::settle_world(world);
    }
    result
}

fn ensure_funds(needed: u64, available: u64) -> Result<(), CommandError> {
    if available < needed {
        return Err(CommandError::InsufficientFunds { needed, available });
    }
    Ok(())
}

impl GameState {
    /// Place a new level-1 building at `(x, z)`. Returns the new id.
    pub fn place_building(
        &mut self,
        x: i32,
        z: i32,
        kind: BuildingType,
    ) -> Result<String, CommandError> {
        if !self.can_place(kind) {
            return Err(CommandError::Locked(kind));
        }
        let cost = catalog::config(kind).base_cost;
        ensure_funds(cost, self.currency)?;
        if self.building_at(x, z).is_some() {
            return Err(CommandError::Occupied { x, z });
        }

        let id = format!("{}-{}-{}-{}", kind, x, z, self.next_building_seq);
        self.next_building_seq += 1;
        self.currency -= cost;
        self.experience += cost / PLACE_XP_DIVISOR;
        *self.lifetime.buildings_built.entry(kind).or_insert(0) += 1;
        self.buildings
            .push(Building::new(id.clone(), kind, x, z, self.clock_ms));
        Ok(id)
    }

    /// Demolish the building at `(x, z)`. Returns the refund credited.
    pub fn delete_building(&mut self, x: i32, z: i32) -> Result<u64, CommandError> {
        let index = self
            .buildings
            .iter()
            .position(|b| b.is_at(x, z))
            .ok_or(CommandError::EmptyCell { x, z })?;
        let building = self.buildings.remove(index);
        let refund = refund_for(&building);
        self.currency += refund;
        Ok(refund)
    }

    /// A click on `(x, z)` with the current tool: demolish in delete mode,
    /// otherwise place the armed type.
    pub fn click_cell(&mut self, x: i32, z: i32) -> Result<ClickOutcome, CommandError> {
        match self.tool {
            ToolSelection::Delete => self.delete_building(x, z).map(ClickOutcome::Deleted),
            ToolSelection::Place(kind) => self.place_building(x, z, kind).map(ClickOutcome::Placed),
            ToolSelection::None => Err(CommandError::NoToolSelected),
        }
    }

    /// Raise a building one level. Returns the cost paid.
    ///
    /// Buildings under construction may be upgraded; construction keeps
    /// running and income starts at the new level once complete.
    pub fn upgrade_building(&mut self, id: &str) -> Result<u64, CommandError> {
        let index = self
            .buildings
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| CommandError::UnknownBuilding(id.to_string()))?;
        if self.buildings[index].is_max_level() {
            return Err(CommandError::MaxLevel(id.to_string()));
        }
        let cost = catalog::upgrade_cost(&self.buildings[index]);
        ensure_funds(cost, self.currency)?;

        self.currency -= cost;
        self.experience += cost / UPGRADE_XP_DIVISOR;
        let building = &mut self.buildings[index];
        building.level += 1;
        building.accumulated_cost += cost;
        info!("Upgraded {} to level {} for {}", building.id, building.level, cost);
        Ok(cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rich_state() -> GameState {
        let mut state = GameState::default();
        state.currency = 1_000_000;
        state
    }

    #[test]
    fn test_place_house_on_new_city() {
        let mut state = GameState::default();
        let id = state.place_building(0, 0, BuildingType::House).unwrap();
        assert_eq!(id, "house-0-0-0");
        assert_eq!(state.currency, 4_500);
        assert_eq!(state.experience, 50);
        assert_eq!(state.buildings.len(), 1);
        let b = &state.buildings[0];
        assert_eq!(b.level, 1);
        assert!(b.under_construction);
        assert_eq!(b.construction_progress, 0.0);
        assert_eq!(state.lifetime.buildings_built[&BuildingType::House], 1);
    }

    #[test]
    fn test_place_rejects_locked_type() {
        let mut state = GameState::default();
        let before = state.clone();
        assert_eq!(
            state.place_building(0, 0, BuildingType::Shop),
            Err(CommandError::Locked(BuildingType::Shop))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_place_rejects_unaffordable() {
        let mut state = GameState::default();
        state.currency = 499;
        let before = state.clone();
        assert_eq!(
            state.place_building(0, 0, BuildingType::House),
            Err(CommandError::InsufficientFunds {
                needed: 500,
                available: 499
            })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_place_exact_funds_succeeds() {
        let mut state = GameState::default();
        state.currency = 500;
        assert!(state.place_building(0, 0, BuildingType::House).is_ok());
        assert_eq!(state.currency, 0);
    }

    #[test]
    fn test_place_rejects_occupied_cell() {
        let mut state = GameState::default();
        state.place_building(3, 4, BuildingType::House).unwrap();
        let before = state.clone();
        assert_eq!(
            state.place_building(3, 4, BuildingType::Park),
            Err(CommandError::Occupied { x: 3, z: 4 })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_ids_stay_unique_after_delete_and_replace() {
        let mut state = GameState::default();
        let first = state.place_building(0, 0, BuildingType::Road).unwrap();
        state.delete_building(0, 0).unwrap();
        let second = state.place_building(0, 0, BuildingType::Road).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_delete_refunds_half_of_accumulated_cost() {
        let mut state = rich_state();
        state.place_building(0, 0, BuildingType::House).unwrap();
        let id = state.buildings[0].id.clone();
        state.upgrade_building(&id).unwrap();
        assert_eq!(state.buildings[0].accumulated_cost, 1_250);

        let before = state.currency;
        let refund = state.delete_building(0, 0).unwrap();
        assert_eq!(refund, 625);
        assert_eq!(state.currency, before + 625);
        assert!(state.buildings.is_empty());
    }

    #[test]
    fn test_delete_odd_cost_floors() {
        let mut b = Building::new("x".into(), BuildingType::House, 0, 0, 0);
        b.accumulated_cost = 1_125;
        assert_eq!(refund_for(&b), 562);
    }

    #[test]
    fn test_delete_empty_cell_is_error() {
        let mut state = GameState::default();
        let before = state.clone();
        assert_eq!(
            state.delete_building(9, 9),
            Err(CommandError::EmptyCell { x: 9, z: 9 })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_upgrade_house_charges_and_grants_xp() {
        let mut state = GameState::default();
        state.place_building(0, 0, BuildingType::House).unwrap();
        let cost = state.upgrade_building("house-0-0-0").unwrap();
        assert_eq!(cost, 750);
        assert_eq!(state.currency, 3_750);
        // 50 from placing, 150 from upgrading
        assert_eq!(state.experience, 200);
        assert_eq!(state.buildings[0].level, 2);
        assert_eq!(state.buildings[0].accumulated_cost, 1_250);
    }

    #[test]
    fn test_upgrade_unknown_id() {
        let mut state = GameState::default();
        assert_eq!(
            state.upgrade_building("nope"),
            Err(CommandError::UnknownBuilding("nope".into()))
        );
    }

    #[test]
    fn test_upgrade_at_max_level_is_rejected() {
        let mut state = rich_state();
        state.place_building(0, 0, BuildingType::Road).unwrap();
        let id = state.buildings[0].id.clone();
        state.upgrade_building(&id).unwrap();
        state.upgrade_building(&id).unwrap();
        assert_eq!(state.buildings[0].level, 3);
        let before = state.clone();
        assert_eq!(
            state.upgrade_building(&id),
            Err(CommandError::MaxLevel(id.clone()))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_upgrade_unaffordable_is_rejected() {
        let mut state = GameState::default();
        state.place_building(0, 0, BuildingType::House).unwrap();
        state.currency = 749;
        let before = state.clone();
        assert!(matches!(
            state.upgrade_building("house-0-0-0"),
            Err(CommandError::InsufficientFunds { needed: 750, .. })
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn test_error_messages() {
        let err = CommandError::InsufficientFunds {
            needed: 500,
            available: 10,
        };
        assert_eq!(err.to_string(), "insufficient funds: need 500, have 10");
        assert_eq!(
            CommandError::Locked(BuildingType::Airport).to_string(),
            "airport is not unlocked yet"
        );
    }

    #[test]
    fn test_click_follows_tool() {
        let mut state = GameState::default();
        let before = state.clone();
        assert_eq!(state.click_cell(0, 0), Err(CommandError::NoToolSelected));
        assert_eq!(state, before);

        state.select_tool(Some(BuildingType::Road));
        assert_eq!(
            state.click_cell(2, 2),
            Ok(ClickOutcome::Placed("road-2-2-0".into()))
        );
        assert_eq!(state.buildings.len(), 1);

        state.toggle_delete_mode();
        assert_eq!(state.click_cell(2, 2), Ok(ClickOutcome::Deleted(50)));
        assert!(state.buildings.is_empty());
    }

    #[test]
    fn test_rejected_command_leaves_state_unchanged_in_world() {
        let mut world = World::new();
        world.insert_resource(GameState::default());
        world.clear_trackers();

        let result = apply_command(&mut world, |state| state.delete_building(9, 9));
        assert_eq!(result, Err(CommandError::EmptyCell { x: 9, z: 9 }));
        assert!(!world.resource_ref::<GameState>().is_changed());

        let result = apply_command(&mut world, |state| {
            state.place_building(0, 0, BuildingType::Road)
        });
        assert!(result.is_ok());
        assert!(world.resource_ref::<GameState>().is_changed());
    }
}
