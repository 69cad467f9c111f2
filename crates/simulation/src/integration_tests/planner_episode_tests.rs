//! Planners driving whole episodes.

use crate::episode::{evaluate_policy, run_episode};
use crate::grid_state::{GridLayers, GridState};
use crate::params::{FireParams, GridConfig, PlannerConfig};
use crate::policy::Policy;
use crate::sim_rng::SimRng;

fn planner_config(depth: u32, m: u32) -> PlannerConfig {
    PlannerConfig {
        depth,
        branching_factor: m,
        ..Default::default()
    }
}

/// Fire in one corner of a 2x2 grid, everything else dry and valuable,
/// resources cheap.
fn corner_fire() -> GridState {
    let mut layers = GridLayers::uniform(2, false, 1.0, 1.0, 0.5, 100.0);
    layers.fire.set(0, 0, true);
    layers.property_value.set(0, 0, 0.0);
    GridState::from_layers(layers, 0.01, FireParams::default()).unwrap()
}

#[test]
fn sparse_sampling_contains_corner_fire() {
    let policy = Policy::sparse_sampling(planner_config(1, 30), 2).unwrap();
    let mut state = corner_fire();
    let mut rng = SimRng::from_seed_u64(1);
    let outcome = run_episode(&mut state, &policy, 3, &mut rng).unwrap();
    // Protected cells cannot ignite, so the fire never leaves its corner and
    // the only cost is three resources per step.
    assert_eq!(state.burning_count(), 1);
    for reward in outcome.step_rewards {
        assert!((reward + 0.03).abs() < 1e-9);
    }
}

#[test]
fn idle_policy_lets_corner_fire_spread() {
    let mut spread = 0;
    for seed in 0..20 {
        let mut state = corner_fire();
        let mut rng = SimRng::from_seed_u64(seed);
        run_episode(&mut state, &Policy::Idle, 3, &mut rng).unwrap();
        if state.burning_count() > 1 {
            spread += 1;
        }
    }
    assert!(spread > 10, "fire spread in only {spread} of 20 runs");
}

#[test]
fn planners_beat_idle_on_average() {
    let grid = GridConfig {
        initial_fire_probability: 0.3,
        ..GridConfig::new(2, 0.1)
    };
    let idle = evaluate_policy(&grid, &Policy::Idle, 6, 20, 5).unwrap();
    let lookahead = evaluate_policy(
        &grid,
        &Policy::lookahead(planner_config(2, 20), 2).unwrap(),
        6,
        20,
        5,
    )
    .unwrap();
    assert!(
        lookahead.mean >= idle.mean,
        "lookahead {} vs idle {}",
        lookahead.mean,
        idle.mean
    );
}

#[test]
fn depth_zero_planners_deploy_nothing() {
    let state = corner_fire();
    let mut rng = SimRng::from_seed_u64(9);
    for policy in [
        Policy::sparse_sampling(planner_config(0, 1), 2).unwrap(),
        Policy::lookahead(planner_config(0, 1), 2).unwrap(),
    ] {
        let action = policy.decide(&state, &mut rng).unwrap();
        assert_eq!(action.deployed_count(), 0);
    }
}
