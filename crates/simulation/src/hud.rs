//! Read-only projections of [`GameState`] for presentation layers.

use serde::Serialize;

use crate::achievements::AchievementReward;
use crate::buildings::BuildingView;
use crate::catalog::BuildingType;
use crate::progression;
use crate::state::{GameState, ToolSelection};
use crate::stats::CityStats;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AchievementView {
    pub id: String,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub progress: u64,
    pub max_progress: u64,
    pub unlocked: bool,
    pub reward: AchievementReward,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub currency: u64,
    pub population: u64,
    pub happiness: u32,
    pub level: u32,
    pub experience: u64,
    pub required_xp: u64,
    pub xp_progress: f64,
    pub income_per_second: f64,
    pub city_value: u64,
    pub unlocked_types: Vec<BuildingType>,
    pub achievements: Vec<AchievementView>,
    pub tool: ToolSelection,
}

impl HudSnapshot {
    pub fn new(state: &GameState, stats: &CityStats) -> Self {
        let achievements = state
            .achievements
            .iter()
            .filter_map(|a| {
                let def = a.definition()?;
                Some(AchievementView {
                    id: a.id.clone(),
                    name: def.name,
                    description: def.description,
                    icon: def.icon,
                    progress: a.progress,
                    max_progress: a.max_progress,
                    unlocked: a.unlocked,
                    reward: a.reward,
                })
            })
            .collect();

        Self {
            currency: state.currency,
            population: state.population,
            happiness: state.happiness,
            level: state.level,
            experience: state.experience,
            required_xp: state.required_xp(),
            xp_progress: progression::xp_progress(state),
            income_per_second: stats.income_per_second,
            city_value: stats.city_value,
            unlocked_types: state.unlocked_types.clone(),
            achievements,
            tool: state.tool,
        }
    }
}

pub fn building_views(state: &GameState) -> Vec<BuildingView> {
    state.buildings.iter().map(BuildingView::from).collect()
}
