//! Fixed formula constants. Tunable values (tick periods, starting money)
//! live in [`crate::game_params::GameParams`] instead.

/// Starting currency for a new city.
pub const STARTING_CURRENCY: u64 = 5_000;

/// Happiness of a city with no completed buildings.
pub const BASE_HAPPINESS: i64 = 50;
pub const MAX_HAPPINESS: i64 = 100;

/// Reference period of the construction tick, in milliseconds.
pub const CONSTRUCTION_TICK_MS: u64 = 100;
/// Reference period of the income tick, in milliseconds.
pub const INCOME_INTERVAL_MS: u64 = 5_000;
/// Quiet window after the last state change before a snapshot is written.
pub const AUTOSAVE_DEBOUNCE_MS: u64 = 1_000;

/// Upgrade pricing: `base_cost * UPGRADE_COST_GROWTH ^ level`.
pub const UPGRADE_COST_GROWTH: f64 = 1.5;
/// Fraction of the accumulated cost returned on demolition.
pub const REFUND_RATE: f64 = 0.5;
/// Income bonus per level above 1.
pub const INCOME_PER_LEVEL: f64 = 0.5;
/// Population / happiness bonus per level above 1.
pub const STATS_PER_LEVEL: f64 = 0.3;

/// Experience granted on placement: `base_cost / PLACE_XP_DIVISOR`.
pub const PLACE_XP_DIVISOR: u64 = 10;
/// Experience granted on upgrade: `upgrade_cost / UPGRADE_XP_DIVISOR`.
pub const UPGRADE_XP_DIVISOR: u64 = 5;

/// Required XP for level L: `floor(XP_BASE * XP_GROWTH ^ (L - 1))`.
pub const XP_BASE: f64 = 100.0;
pub const XP_GROWTH: f64 = 1.5;
/// Level-up bonus: `level_before_increment * LEVEL_UP_BONUS_PER_LEVEL`.
pub const LEVEL_UP_BONUS_PER_LEVEL: u64 = 1_000;
