#[cfg(test)]
mod tests {
    use crate::buildings::construction::advance;
    use crate::buildings::types::{Building, BuildingView};
    use crate::catalog::BuildingType;
    use crate::state::GameState;

    fn house() -> Building {
        Building::new("house-0-0-0".into(), BuildingType::House, 0, 0, 0)
    }

    #[test]
    fn test_new_building_is_level_one_under_construction() {
        let b = house();
        assert_eq!(b.level, 1);
        assert!(b.under_construction);
        assert_eq!(b.construction_progress, 0.0);
        assert_eq!(b.accumulated_cost, 500);
        assert_eq!(b.income(), 0, "no income while under construction");
    }

    #[test]
    fn test_house_completes_after_exactly_thirty_ticks() {
        let mut b = house();
        let mut now = 0;
        for tick in 1..30 {
            now += 100;
            assert!(!advance(&mut b, now, 100), "completed early at tick {tick}");
            assert!(b.construction_progress < 1.0);
        }
        now += 100;
        assert!(advance(&mut b, now, 100));
        assert_eq!(b.construction_progress, 1.0);
        assert!(!b.under_construction);
        assert_eq!(b.last_income_ms, 3_000);
    }

    #[test]
    fn test_progress_is_monotone_and_bounded() {
        let mut b = Building::new("p".into(), BuildingType::Park, 1, 1, 0);
        let mut last = 0.0;
        for i in 1..=40 {
            advance(&mut b, i * 100, 100);
            assert!(b.construction_progress >= last);
            assert!(b.construction_progress <= 1.0);
            last = b.construction_progress;
        }
        assert_eq!(last, 1.0);
    }

    #[test]
    fn test_completion_fires_once() {
        let mut b = Building::new("r".into(), BuildingType::Road, 0, 0, 0);
        let completions = (1..=20).filter(|i| advance(&mut b, i * 100, 100)).count();
        assert_eq!(completions, 1);
        // Completed building stays put on later ticks.
        assert_eq!(b.last_income_ms, 1_000);
    }

    #[test]
    fn test_tick_construction_skips_completed_buildings() {
        let mut state = GameState::default();
        let mut done = house();
        done.under_construction = false;
        done.construction_progress = 1.0;
        done.last_income_ms = 42;
        state.buildings.push(done.clone());
        state
            .buildings
            .push(Building::new("road-1-0-1".into(), BuildingType::Road, 1, 0, 0));

        let mut completed = Vec::new();
        for i in 1..=10 {
            completed.extend(state.tick_construction(i * 100, 100));
        }
        assert_eq!(completed, vec!["road-1-0-1".to_string()]);
        assert_eq!(state.buildings[0], done);
        assert!(!state.has_construction());
    }

    #[test]
    fn test_view_projects_display_fields() {
        let b = house();
        let view = BuildingView::from(&b);
        assert_eq!(view.id, "house-0-0-0");
        assert_eq!(view.kind, BuildingType::House);
        assert!(view.under_construction);
    }
}
