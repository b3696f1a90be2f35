//! Integration tests using the `TestCity` harness.
//!
//! These tests run the full `FixedUpdate` schedule and verify the building
//! lifecycle, economy and progression working together.

mod autosave_tests;
mod progression_tests;
