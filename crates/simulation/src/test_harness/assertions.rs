//! Assertion helpers for `TestCity` integration tests.

use super::TestCity;

impl TestCity {
    // -----------------------------------------------------------------------
    // Assertions
    // -----------------------------------------------------------------------

    pub fn assert_currency(&self, expected: u64) {
        let currency = self.currency();
        assert_eq!(currency, expected, "Expected currency {expected}, got {currency}");
    }

    pub fn assert_has_building(&self, x: i32, z: i32) {
        assert!(
            self.building_at(x, z).is_some(),
            "Expected building at ({x}, {z}), found none"
        );
    }

    pub fn assert_no_building(&self, x: i32, z: i32) {
        if let Some(b) = self.building_at(x, z) {
            panic!("Expected empty cell at ({x}, {z}), found {}", b.id);
        }
    }

    /// Assert the building at `(x, z)` has finished construction.
    pub fn assert_completed(&self, x: i32, z: i32) {
        let b = self
            .building_at(x, z)
            .unwrap_or_else(|| panic!("Expected building at ({x}, {z})"));
        assert!(
            !b.under_construction,
            "Expected {} complete, progress {}",
            b.id, b.construction_progress
        );
        assert_eq!(b.construction_progress, 1.0);
    }

    pub fn assert_achievement_unlocked(&self, id: &str) {
        assert!(
            self.is_achievement_unlocked(id),
            "Expected achievement '{id}' to be unlocked"
        );
    }

    pub fn assert_achievement_locked(&self, id: &str) {
        assert!(
            !self.is_achievement_unlocked(id),
            "Expected achievement '{id}' to be locked"
        );
    }
}
