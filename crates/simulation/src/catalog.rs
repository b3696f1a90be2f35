//! Building catalog: static per-type economic and progression parameters.
//!
//! The type space is closed. Lookups by [`BuildingType`] are total; the only
//! place an unknown type can appear is when parsing a type name, which
//! returns [`UnknownBuildingType`].

use std::fmt;
use std::str::FromStr;

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::buildings::Building;
use crate::config::{INCOME_PER_LEVEL, STATS_PER_LEVEL, UPGRADE_COST_GROWTH};

// =============================================================================
// Building types
// =============================================================================

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BuildingType {
    // Residential
    House,
    Apartment,
    Mansion,
    // Commercial
    Shop,
    Office,
    Skyscraper,
    // Recreation
    Park,
    Fountain,
    Stadium,
    // Infrastructure
    Road,
    Bridge,
    Highway,
    // Industrial
    Factory,
    Powerplant,
    Airport,
}

impl BuildingType {
    /// All building types, in catalog order.
    pub const ALL: &'static [BuildingType] = &[
        BuildingType::House,
        BuildingType::Apartment,
        BuildingType::Mansion,
        BuildingType::Shop,
        BuildingType::Office,
        BuildingType::Skyscraper,
        BuildingType::Park,
        BuildingType::Fountain,
        BuildingType::Stadium,
        BuildingType::Road,
        BuildingType::Bridge,
        BuildingType::Highway,
        BuildingType::Factory,
        BuildingType::Powerplant,
        BuildingType::Airport,
    ];

    /// Stable identifier used in building ids, save data and the command
    /// protocol.
    pub fn id(self) -> &'static str {
        match self {
            BuildingType::House => "house",
            BuildingType::Apartment => "apartment",
            BuildingType::Mansion => "mansion",
            BuildingType::Shop => "shop",
            BuildingType::Office => "office",
            BuildingType::Skyscraper => "skyscraper",
            BuildingType::Park => "park",
            BuildingType::Fountain => "fountain",
            BuildingType::Stadium => "stadium",
            BuildingType::Road => "road",
            BuildingType::Bridge => "bridge",
            BuildingType::Highway => "highway",
            BuildingType::Factory => "factory",
            BuildingType::Powerplant => "powerplant",
            BuildingType::Airport => "airport",
        }
    }

    pub fn config(self) -> &'static BuildingConfig {
        config(self)
    }
}

impl fmt::Display for BuildingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A building type name that is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBuildingType(pub String);

impl fmt::Display for UnknownBuildingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown building type '{}'", self.0)
    }
}

impl std::error::Error for UnknownBuildingType {}

impl FromStr for BuildingType {
    type Err = UnknownBuildingType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuildingType::ALL
            .iter()
            .copied()
            .find(|t| t.id() == s)
            .ok_or_else(|| UnknownBuildingType(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildingCategory {
    Residential,
    Commercial,
    Recreation,
    Infrastructure,
    Industrial,
}

impl BuildingCategory {
    pub const ALL: &'static [BuildingCategory] = &[
        BuildingCategory::Residential,
        BuildingCategory::Commercial,
        BuildingCategory::Recreation,
        BuildingCategory::Infrastructure,
        BuildingCategory::Industrial,
    ];
}

// =============================================================================
// Static configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct BuildingConfig {
    pub kind: BuildingType,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub base_cost: u64,
    pub base_population: u64,
    /// May be negative (factories, power plants).
    pub base_happiness: i64,
    pub base_income: u64,
    pub category: BuildingCategory,
    pub unlock_level: u32,
    pub max_level: u32,
    /// Seconds from placement to completion.
    pub construction_time: u64,
}

impl BuildingConfig {
    pub fn construction_time_ms(&self) -> u64 {
        self.construction_time * 1_000
    }

    /// `floor(base_income * (1 + 0.5 * (level - 1)))`.
    pub fn income_at_level(&self, level: u32) -> u64 {
        let multiplier = 1.0 + (level.saturating_sub(1)) as f64 * INCOME_PER_LEVEL;
        (self.base_income as f64 * multiplier).floor() as u64
    }

    /// `floor(base_population * (1 + 0.3 * (level - 1)))`.
    pub fn population_at_level(&self, level: u32) -> u64 {
        (self.base_population as f64 * stats_multiplier(level)).floor() as u64
    }

    /// `floor(base_happiness * (1 + 0.3 * (level - 1)))`, rounding toward
    /// negative infinity for negative deltas.
    pub fn happiness_at_level(&self, level: u32) -> i64 {
        (self.base_happiness as f64 * stats_multiplier(level)).floor() as i64
    }
}

fn stats_multiplier(level: u32) -> f64 {
    1.0 + (level.saturating_sub(1)) as f64 * STATS_PER_LEVEL
}

macro_rules! building {
    (
        $kind:ident, $name:expr, $desc:expr, $icon:expr, $color:expr,
        cost: $cost:expr, pop: $pop:expr, happy: $happy:expr, income: $income:expr,
        $category:ident, unlock: $unlock:expr, max: $max:expr, build: $build:expr
    ) => {
        BuildingConfig {
            kind: BuildingType::$kind,
            name: $name,
            description: $desc,
            icon: $icon,
            color: $color,
            base_cost: $cost,
            base_population: $pop,
            base_happiness: $happy,
            base_income: $income,
            category: BuildingCategory::$category,
            unlock_level: $unlock,
            max_level: $max,
            construction_time: $build,
        }
    };
}

/// Indexed by `BuildingType as usize`; order must match the enum.
static CONFIGS: [BuildingConfig; 15] = [
    building!(House, "House", "A cozy family home that houses 4 people", "🏠", "#3B82F6",
        cost: 500, pop: 4, happy: 2, income: 50, Residential, unlock: 1, max: 5, build: 3),
    building!(Apartment, "Apartment", "Multi-story housing for more families", "🏢", "#6366F1",
        cost: 1_200, pop: 12, happy: 1, income: 120, Residential, unlock: 3, max: 8, build: 5),
    building!(Mansion, "Mansion", "Luxury housing for wealthy citizens", "🏰", "#8B5CF6",
        cost: 5_000, pop: 2, happy: 8, income: 300, Residential, unlock: 10, max: 3, build: 10),
    building!(Shop, "Shop", "Small retail store providing goods", "🏪", "#10B981",
        cost: 800, pop: 0, happy: 3, income: 100, Commercial, unlock: 2, max: 5, build: 4),
    building!(Office, "Office", "Business building providing jobs", "🏢", "#8B5CF6",
        cost: 1_500, pop: 0, happy: 1, income: 200, Commercial, unlock: 4, max: 6, build: 6),
    building!(Skyscraper, "Skyscraper", "Massive commercial tower", "🏙️", "#1E40AF",
        cost: 10_000, pop: 0, happy: 5, income: 800, Commercial, unlock: 15, max: 10, build: 20),
    building!(Park, "Park", "Green space that makes citizens happy", "🌳", "#10B981",
        cost: 300, pop: 0, happy: 8, income: 0, Recreation, unlock: 1, max: 3, build: 2),
    building!(Fountain, "Fountain", "Beautiful water feature", "⛲", "#06B6D4",
        cost: 800, pop: 0, happy: 12, income: 0, Recreation, unlock: 5, max: 3, build: 4),
    building!(Stadium, "Stadium", "Sports venue for entertainment", "🏟️", "#DC2626",
        cost: 8_000, pop: 0, happy: 25, income: 400, Recreation, unlock: 12, max: 3, build: 15),
    building!(Road, "Road", "Basic transportation infrastructure", "🛣️", "#6B7280",
        cost: 100, pop: 0, happy: 1, income: 0, Infrastructure, unlock: 1, max: 3, build: 1),
    building!(Bridge, "Bridge", "Connects areas across water", "🌉", "#78716C",
        cost: 2_000, pop: 0, happy: 3, income: 0, Infrastructure, unlock: 8, max: 2, build: 8),
    building!(Highway, "Highway", "High-speed transportation route", "🛤️", "#374151",
        cost: 5_000, pop: 0, happy: 5, income: 100, Infrastructure, unlock: 18, max: 2, build: 12),
    building!(Factory, "Factory", "Industrial production facility", "🏭", "#F59E0B",
        cost: 3_000, pop: 0, happy: -5, income: 400, Industrial, unlock: 6, max: 5, build: 8),
    building!(Powerplant, "Power Plant", "Generates electricity for the city", "⚡", "#EF4444",
        cost: 15_000, pop: 0, happy: -10, income: 600, Industrial, unlock: 20, max: 3, build: 25),
    building!(Airport, "Airport", "International transportation hub", "✈️", "#6366F1",
        cost: 50_000, pop: 0, happy: 15, income: 1_500, Industrial, unlock: 25, max: 2, build: 30),
];

// =============================================================================
// Queries
// =============================================================================

pub fn config(kind: BuildingType) -> &'static BuildingConfig {
    &CONFIGS[kind as usize]
}

/// Level gate only; the unlocked-types set is checked by
/// [`crate::state::GameState::can_place`].
pub fn is_unlocked(kind: BuildingType, level: u32) -> bool {
    level >= config(kind).unlock_level
}

/// `floor(base_cost * 1.5 ^ level)`, or 0 when the building is at max level.
pub fn upgrade_cost(building: &Building) -> u64 {
    let cfg = config(building.kind);
    if building.level >= cfg.max_level {
        return 0;
    }
    (cfg.base_cost as f64 * UPGRADE_COST_GROWTH.powi(building.level as i32)).floor() as u64
}

pub fn by_category(category: BuildingCategory) -> impl Iterator<Item = &'static BuildingConfig> {
    CONFIGS.iter().filter(move |c| c.category == category)
}
