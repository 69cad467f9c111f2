#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::action_space::{enumerate_actions, Action};
    use crate::grid_state::{GridLayers, GridState};
    use crate::params::{FireParams, GridConfig, ObservationConfig, PlannerConfig, UtilitySource};
    use crate::sim_rng::SimRng;

    fn config(depth: u32, m: u32) -> PlannerConfig {
        PlannerConfig {
            depth,
            branching_factor: m,
            ..Default::default()
        }
    }

    fn burning_grid(size: usize, seed: u64) -> GridState {
        let config = GridConfig {
            initial_fire_probability: 0.4,
            ..GridConfig::new(size, 1.0)
        };
        GridState::generate(&config, &mut SimRng::from_seed_u64(seed).0).unwrap()
    }

    /// 2x2 grid, top-left cell burning but worth nothing, the other three
    /// dry, fueled and worth 100 each. Resources are nearly free.
    fn threatened_grid() -> GridState {
        let mut layers = GridLayers::uniform(2, false, 1.0, 1.0, 0.5, 100.0);
        layers.fire.set(0, 0, true);
        layers.property_value.set(0, 0, 0.0);
        GridState::from_layers(layers, 0.01, FireParams::default()).unwrap()
    }

    #[test]
    fn test_terminal_utility_is_negated_exposure() {
        let mut layers = GridLayers::uniform(2, false, 1.0, 0.5, 0.5, 10.0);
        layers.fire.set(1, 0, true);
        layers.fire.set(1, 1, true);
        layers.property_value.set(1, 1, 30.0);
        let state = GridState::from_layers(layers, 1.0, FireParams::default()).unwrap();
        assert_eq!(terminal_utility(&state), -40.0);

        let calm = GridState::from_layers(
            GridLayers::uniform(2, false, 1.0, 0.5, 0.5, 10.0),
            1.0,
            FireParams::default(),
        )
        .unwrap();
        assert_eq!(terminal_utility(&calm), 0.0);
    }

    #[test]
    fn test_sparse_sampling_depth_zero_never_transitions() {
        let state = burning_grid(2, 1);
        let snapshot = state.clone();
        let actions = enumerate_actions(2).unwrap();
        let planner = SparseSampling::new(config(0, 3)).unwrap();
        let mut rng = SimRng::from_seed_u64(7);
        let word_pos = rng.0.get_word_pos();

        let result = planner.select_action(&state, &actions, &mut rng).unwrap();

        assert_eq!(rng.0.get_word_pos(), word_pos);
        assert_eq!(state, snapshot);
        assert_eq!(result.chosen_action, Action::none(2));
        assert_eq!(result.estimated_value, terminal_utility(&state));
    }

    #[test]
    fn test_lookahead_depth_zero_is_reproducible() {
        let state = burning_grid(2, 2);
        let actions = enumerate_actions(2).unwrap();
        let planner = LookaheadRollout::new(config(0, 1)).unwrap();
        let a = planner
            .select_action(&state, &actions, &mut SimRng::from_seed_u64(5))
            .unwrap();
        let b = planner
            .select_action(&state, &actions, &mut SimRng::from_seed_u64(5))
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.estimated_value, terminal_utility(&state));
    }

    #[test]
    fn test_observed_utility_samples_noise_at_leaves() {
        let state = burning_grid(2, 3);
        let actions = enumerate_actions(2).unwrap();
        let planner = SparseSampling::new(PlannerConfig {
            utility: UtilitySource::Observed(ObservationConfig {
                sensor_noise: 0.05,
                property_noise: Some(5.0),
            }),
            ..config(0, 1)
        })
        .unwrap();
        let mut rng = SimRng::from_seed_u64(9);
        let word_pos = rng.0.get_word_pos();
        planner.select_action(&state, &actions, &mut rng).unwrap();
        assert_ne!(rng.0.get_word_pos(), word_pos);
    }

    #[test]
    fn test_planners_are_seed_deterministic() {
        let state = burning_grid(2, 4);
        let actions = enumerate_actions(2).unwrap();
        let sparse = SparseSampling::new(config(1, 3)).unwrap();
        let lookahead = LookaheadRollout::new(config(3, 3)).unwrap();
        for planner in [&sparse as &dyn Planner, &lookahead as &dyn Planner] {
            let a = planner
                .select_action(&state, &actions, &mut SimRng::from_seed_u64(11))
                .unwrap();
            let b = planner
                .select_action(&state, &actions, &mut SimRng::from_seed_u64(11))
                .unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_planning_leaves_state_untouched() {
        let state = burning_grid(2, 5);
        let snapshot = state.clone();
        let actions = enumerate_actions(2).unwrap();
        let mut rng = SimRng::from_seed_u64(12);
        SparseSampling::new(config(2, 2))
            .unwrap()
            .select_action(&state, &actions, &mut rng)
            .unwrap();
        LookaheadRollout::new(config(4, 4))
            .unwrap()
            .select_action(&state, &actions, &mut rng)
            .unwrap();
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let state = burning_grid(2, 6);
        let actions = enumerate_actions(2).unwrap();
        let sequential = config(2, 2);
        let parallel = PlannerConfig {
            parallel: true,
            ..sequential
        };

        let a = SparseSampling::new(sequential)
            .unwrap()
            .select_action(&state, &actions, &mut SimRng::from_seed_u64(13))
            .unwrap();
        let b = SparseSampling::new(parallel)
            .unwrap()
            .select_action(&state, &actions, &mut SimRng::from_seed_u64(13))
            .unwrap();
        assert_eq!(a, b);

        let a = LookaheadRollout::new(config(4, 8))
            .unwrap()
            .select_action(&state, &actions, &mut SimRng::from_seed_u64(14))
            .unwrap();
        let b = LookaheadRollout::new(PlannerConfig {
            parallel: true,
            ..config(4, 8)
        })
        .unwrap()
        .select_action(&state, &actions, &mut SimRng::from_seed_u64(14))
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_ties_go_to_first_action() {
        // No fire, no dryness, no wind, free resources: every action is
        // worth exactly zero.
        let layers = GridLayers::uniform(2, false, 1.0, 0.0, 0.0, 50.0);
        let state = GridState::from_layers(layers, 0.0, FireParams::default()).unwrap();
        let actions = enumerate_actions(2).unwrap();
        let mut rng = SimRng::from_seed_u64(15);
        let result = SparseSampling::new(config(1, 2))
            .unwrap()
            .select_action(&state, &actions, &mut rng)
            .unwrap();
        assert_eq!(result.chosen_action, actions.first());
        assert_eq!(result.estimated_value, 0.0);
    }

    #[test]
    fn test_sparse_sampling_protects_threatened_cells() {
        // Protected cells cannot ignite; an unprotected neighbor of the fire
        // ignites with probability near one half, the diagonal cell near one
        // quarter. Covering exactly the three valuable cells is optimal.
        let state = threatened_grid();
        let actions = enumerate_actions(2).unwrap();
        let result = SparseSampling::new(config(1, 40))
            .unwrap()
            .select_action(&state, &actions, &mut SimRng::from_seed_u64(16))
            .unwrap();
        assert_eq!(result.chosen_action.cells(), &[false, true, true, true]);
        assert!((result.estimated_value + 0.03).abs() < 1e-9);
    }

    #[test]
    fn test_lookahead_protects_fire_neighbors() {
        let state = threatened_grid();
        let actions = enumerate_actions(2).unwrap();
        let result = LookaheadRollout::new(config(3, 200))
            .unwrap()
            .select_action(&state, &actions, &mut SimRng::from_seed_u64(17))
            .unwrap();
        assert!(result.chosen_action.get(1, 0));
        assert!(result.chosen_action.get(0, 1));
    }

    #[test]
    fn test_rejects_mismatched_action_space() {
        let state = burning_grid(3, 7);
        let actions = enumerate_actions(2).unwrap();
        let err = SparseSampling::new(config(1, 1))
            .unwrap()
            .select_action(&state, &actions, &mut SimRng::default())
            .unwrap_err();
        assert_eq!(
            err,
            WildfireError::ShapeMismatch {
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(SparseSampling::new(config(9, 1)).is_err());
        assert!(LookaheadRollout::new(config(1, 0)).is_err());
        assert!(LookaheadRollout::new(PlannerConfig {
            rollout_placement_probability: 2.0,
            ..Default::default()
        })
        .is_err());
        assert!(SparseSampling::new(PlannerConfig {
            discount: -0.5,
            ..Default::default()
        })
        .is_err());
    }

    #[test]
    fn test_config_accessor() {
        let planner = LookaheadRollout::new(config(3, 4)).unwrap();
        assert_eq!(planner.config().depth, 3);
        assert_eq!(planner.config().branching_factor, 4);
    }
}
