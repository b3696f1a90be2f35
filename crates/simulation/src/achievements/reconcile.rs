use bevy::prelude::*;

use super::types::{Achievement, DEFINITIONS};

/// Merge a loaded achievement list with the canonical table.
///
/// The result has exactly one entry per definition, in table order: the
/// saved record when one with that id exists, otherwise a fresh locked
/// record. Saved records with ids that no longer exist are dropped.
pub fn reconcile_achievements(saved: Vec<Achievement>) -> Vec<Achievement> {
    let mut saved = saved;
    let mut merged = Vec::with_capacity(DEFINITIONS.len());
    for def in DEFINITIONS.iter() {
        match saved.iter().position(|a| a.id == def.id) {
            Some(index) => merged.push(saved.swap_remove(index)),
            None => merged.push(def.instantiate()),
        }
    }
    for dropped in &saved {
        warn!("Dropping saved achievement with unknown id '{}'", dropped.id);
    }
    merged
}
