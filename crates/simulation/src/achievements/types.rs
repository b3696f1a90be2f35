use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::catalog::BuildingType;

// =============================================================================
// Achievement Reward
// =============================================================================

/// One-shot reward granted when an achievement unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AchievementReward {
    Currency { amount: u64 },
    Experience { amount: u64 },
    /// Make a building type placeable regardless of level.
    Unlock { kind: BuildingType },
}

impl AchievementReward {
    pub fn description(&self) -> String {
        match self {
            AchievementReward::Currency { amount } => format!("+${amount}"),
            AchievementReward::Experience { amount } => format!("+{amount} XP"),
            AchievementReward::Unlock { kind } => format!("Unlocks {}", kind.config().name),
        }
    }
}

// =============================================================================
// Definitions
// =============================================================================

/// The quantity an achievement's progress tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Buildings of one type, including those still under construction.
    BuildingsOfType(BuildingType),
    TotalBuildings,
    Population,
    Currency,
    Happiness,
    Level,
}

/// Canonical, compile-time description of an achievement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub metric: Metric,
    pub max_progress: u64,
    pub reward: AchievementReward,
}

impl AchievementDef {
    /// A fresh, locked instance of this definition.
    pub fn instantiate(&self) -> Achievement {
        Achievement {
            id: self.id.to_string(),
            progress: 0,
            max_progress: self.max_progress,
            unlocked: false,
            reward: self.reward,
        }
    }
}

const fn def(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    icon: &'static str,
    metric: Metric,
    max_progress: u64,
    reward: AchievementReward,
) -> AchievementDef {
    AchievementDef {
        id,
        name,
        description,
        icon,
        metric,
        max_progress,
        reward,
    }
}

const fn money(amount: u64) -> AchievementReward {
    AchievementReward::Currency { amount }
}

const fn xp(amount: u64) -> AchievementReward {
    AchievementReward::Experience { amount }
}

const fn unlock(kind: BuildingType) -> AchievementReward {
    AchievementReward::Unlock { kind }
}

pub static DEFINITIONS: [AchievementDef; 18] = [
    // Building
    def("first_house", "First Home", "Build your first house", "🏠",
        Metric::BuildingsOfType(BuildingType::House), 1, money(500)),
    def("builder_novice", "Builder Novice", "Build 10 buildings", "🔨",
        Metric::TotalBuildings, 10, xp(100)),
    def("builder_expert", "Builder Expert", "Build 50 buildings", "🏗️",
        Metric::TotalBuildings, 50, money(5_000)),
    def("master_builder", "Master Builder", "Build 100 buildings", "👷",
        Metric::TotalBuildings, 100, unlock(BuildingType::Mansion)),
    // Population
    def("small_town", "Small Town", "Reach 100 population", "👥",
        Metric::Population, 100, xp(150)),
    def("growing_city", "Growing City", "Reach 500 population", "🏙️",
        Metric::Population, 500, money(3_000)),
    def("metropolis", "Metropolis", "Reach 1000 population", "🌆",
        Metric::Population, 1_000, unlock(BuildingType::Skyscraper)),
    // Money
    def("first_thousand", "First Thousand", "Earn $1,000", "💰",
        Metric::Currency, 1_000, xp(50)),
    def("wealthy_mayor", "Wealthy Mayor", "Have $50,000 in the bank", "💎",
        Metric::Currency, 50_000, money(10_000)),
    def("millionaire", "Millionaire", "Have $1,000,000 in the bank", "🏆",
        Metric::Currency, 1_000_000, unlock(BuildingType::Airport)),
    // Happiness
    def("happy_citizens", "Happy Citizens", "Reach 80% happiness", "😊",
        Metric::Happiness, 80, xp(200)),
    def("paradise_city", "Paradise City", "Reach 95% happiness", "🌈",
        Metric::Happiness, 95, money(15_000)),
    // Special
    def("green_city", "Green City", "Build 20 parks", "🌱",
        Metric::BuildingsOfType(BuildingType::Park), 20, unlock(BuildingType::Stadium)),
    def("industrial_tycoon", "Industrial Tycoon", "Build 10 factories", "🏭",
        Metric::BuildingsOfType(BuildingType::Factory), 10, unlock(BuildingType::Powerplant)),
    def("infrastructure_master", "Infrastructure Master", "Build 50 roads", "🛣️",
        Metric::BuildingsOfType(BuildingType::Road), 50, unlock(BuildingType::Highway)),
    // Level
    def("level_5", "Rising Star", "Reach level 5", "⭐",
        Metric::Level, 5, money(2_000)),
    def("level_10", "Experienced Mayor", "Reach level 10", "🎖️",
        Metric::Level, 10, money(5_000)),
    def("level_20", "Master Mayor", "Reach level 20", "👑",
        Metric::Level, 20, money(20_000)),
];

pub fn definition(id: &str) -> Option<&'static AchievementDef> {
    DEFINITIONS.iter().find(|d| d.id == id)
}

/// Every definition as a locked instance, in table order.
pub fn canonical_achievements() -> Vec<Achievement> {
    DEFINITIONS.iter().map(AchievementDef::instantiate).collect()
}

// =============================================================================
// Persisted achievement
// =============================================================================

/// Mutable per-city achievement record. Display metadata and the metric are
/// looked up from [`DEFINITIONS`] by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub progress: u64,
    pub max_progress: u64,
    /// One-way latch.
    pub unlocked: bool,
    pub reward: AchievementReward,
}

impl Achievement {
    pub fn definition(&self) -> Option<&'static AchievementDef> {
        definition(&self.id)
    }
}

// =============================================================================
// Achievement Notification Resource
// =============================================================================

/// Achievement ids unlocked since the UI last read them.
#[derive(Resource, Default, Debug, Clone)]
pub struct AchievementNotification {
    pub recent_unlocks: Vec<String>,
}

impl AchievementNotification {
    /// Take all pending notifications, clearing the internal list.
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.recent_unlocks)
    }
}
