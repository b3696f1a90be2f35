use crate::catalog::BuildingType;
use crate::test_harness::TestCity;

#[test]
fn currency_milestone_unlocks_on_first_tick() {
    let mut city = TestCity::new();
    city.tick(1);
    city.assert_achievement_unlocked("first_thousand");
    assert_eq!(city.state().experience, 50);
    assert_eq!(city.take_notifications(), vec!["first_thousand".to_string()]);
}

#[test]
fn upgrade_cascades_through_several_levels() {
    let mut city = TestCity::new().with_budget(10_000);
    let id = city.place(0, 0, BuildingType::House).unwrap();
    // place: -500, +50 xp; first_house +500; first_thousand +50 xp;
    // 100 xp reaches level 2 (+1000).
    assert_eq!(city.level(), 2);
    city.assert_currency(11_000);

    city.upgrade(&id).unwrap();
    // upgrade: -750, +150 xp -> 250 xp. Level 2 -> 3 (+2000) at 150,
    // level 3 -> 4 (+3000) at 225, level 4 needs 337.
    assert_eq!(city.state().experience, 250);
    assert_eq!(city.level(), 4);
    city.assert_currency(11_000 - 750 + 2_000 + 3_000);
}

#[test]
fn experience_is_never_spent() {
    let mut city = TestCity::new().with_experience(1_000);
    city.tick(1);
    assert_eq!(city.state().experience, 1_050);
    // 100, 150, 225, 337, 506, 759 are all below 1050; 1139 is not.
    assert_eq!(city.level(), 7);
}

#[test]
fn level_achievement_follows_level_up_in_same_tick() {
    // 400 + 50 from first_thousand lands between 337 and 506: level 5.
    let mut city = TestCity::new().with_experience(400);
    city.tick(1);
    assert_eq!(city.level(), 5);
    city.assert_achievement_unlocked("level_5");
    // Bonuses 1000 + 2000 + 3000 + 4000, level_5 reward 2000.
    city.assert_currency(5_000 + 10_000 + 2_000);
}

#[test]
fn unlock_reward_makes_type_placeable_before_its_level() {
    let mut city = TestCity::new().with_budget(1_000_000);
    city.state_mut().level = 6;
    assert!(!city.state().can_place(BuildingType::Powerplant));

    for x in 0..10 {
        city.place(x, 0, BuildingType::Factory).unwrap();
    }
    city.assert_achievement_unlocked("industrial_tycoon");
    assert!(city.state().is_type_unlocked(BuildingType::Powerplant));
    assert!(city.place(0, 1, BuildingType::Powerplant).is_ok());
}

#[test]
fn unlocked_achievement_survives_demolition() {
    let mut city = TestCity::new();
    city.place(0, 0, BuildingType::House).unwrap();
    city.delete(0, 0).unwrap();
    city.tick(5);
    city.assert_achievement_unlocked("first_house");
}
