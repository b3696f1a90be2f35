use crate::catalog::BuildingType;
use crate::test_harness::TestCity;

/// Tick until the startup burst of state changes has been saved.
fn quiet_city() -> TestCity {
    let mut city = TestCity::new();
    city.tick(11);
    assert!(city.autosave_pending(), "fresh city is saved once");
    city.clear_autosave_pending();
    city
}

#[test]
fn idle_city_does_not_autosave_again() {
    let mut city = quiet_city();
    city.tick(100);
    assert!(!city.autosave_pending());
    assert!(!city.debounce().is_armed());
}

#[test]
fn autosave_fires_a_second_after_the_last_change() {
    let mut city = quiet_city();
    city.state_mut().select_tool(Some(BuildingType::House));

    city.tick(10);
    assert!(!city.autosave_pending());
    city.tick(1);
    assert!(city.autosave_pending());
}

#[test]
fn each_change_restarts_the_window() {
    let mut city = quiet_city();
    city.state_mut().toggle_delete_mode();
    city.tick(6);
    city.state_mut().toggle_delete_mode();
    city.tick(10);
    assert!(!city.autosave_pending());
    city.tick(1);
    assert!(city.autosave_pending());
}

#[test]
fn construction_keeps_the_window_open() {
    let mut city = quiet_city();
    city.place(0, 0, BuildingType::Road).unwrap();
    // The road changes state every tick until it completes at tick 10.
    city.tick(15);
    assert!(!city.autosave_pending());
    city.tick(6);
    assert!(city.autosave_pending());
}

#[test]
fn disabled_autosave_never_raises_the_flag() {
    let mut city = TestCity::new().with_autosave(false);
    city.tick(50);
    assert!(!city.autosave_pending());
}

#[test]
fn rejected_commands_do_not_reopen_the_window() {
    let mut city = quiet_city();
    assert!(city.delete(9, 9).is_err());
    assert!(city.upgrade("missing").is_err());
    assert!(city.place(0, 0, BuildingType::Airport).is_err());
    assert!(city.click(0, 0).is_err());
    city.tick(20);
    assert!(!city.autosave_pending());
    assert!(!city.debounce().is_armed());
}
