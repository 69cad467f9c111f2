//! Top-level action search shared by both planners.

use bevy::log::debug;
use bevy::tasks::{ComputeTaskPool, TaskPool};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::action_space::{Action, ActionSpace};
use crate::error::WildfireError;
use crate::grid_state::GridState;
use crate::params::PlannerConfig;
use crate::sim_rng::SimRng;

use super::utility::UtilityEstimator;
use super::PlanResult;

/// Scores one candidate action at the top of the search tree.
pub(super) trait ActionValue: Sync {
    /// Expected discounted value of applying `action` to `state` with `depth`
    /// transitions left (`depth >= 1`). `actions` is the full space, for
    /// searches that branch below the top level.
    fn action_value(
        &self,
        state: &GridState,
        action: &Action,
        actions: &ActionSpace,
        depth: u32,
        rng: &mut ChaCha8Rng,
    ) -> f64;
}

/// Evaluate every action in `actions` and return the arg-max.
///
/// At depth 0 no transition runs: the first action is returned with the
/// terminal utility of `state`. Otherwise one seed per action is drawn from
/// `rng` up front and each action gets its own stream, so the result does not
/// depend on whether evaluation runs on the task pool.
pub(super) fn search(
    name: &str,
    config: &PlannerConfig,
    utility: &UtilityEstimator,
    evaluator: &impl ActionValue,
    state: &GridState,
    actions: &ActionSpace,
    rng: &mut SimRng,
) -> Result<PlanResult, WildfireError> {
    if actions.size() != state.size() {
        return Err(WildfireError::ShapeMismatch {
            expected: state.size(),
            found: actions.size(),
        });
    }

    if config.depth == 0 {
        return Ok(PlanResult {
            chosen_action: actions.first(),
            estimated_value: utility.estimate(state, &mut rng.0),
        });
    }

    let seeds: Vec<u64> = (0..actions.len()).map(|_| rng.0.gen()).collect();
    let values = if config.parallel {
        evaluate_parallel(evaluator, state, actions, config.depth, &seeds)
    } else {
        evaluate_range(evaluator, state, actions, config.depth, 0, &seeds)
    };

    let mut best_index = 0;
    let mut best_value = f64::NEG_INFINITY;
    for (index, &value) in values.iter().enumerate() {
        if value > best_value {
            best_index = index;
            best_value = value;
        }
    }

    debug!(
        "{}: picked action {} of {} (value {:.3}, depth {}, m {})",
        name,
        best_index,
        actions.len(),
        best_value,
        config.depth,
        config.branching_factor
    );

    Ok(PlanResult {
        chosen_action: actions.get(best_index).unwrap_or_else(|| actions.first()),
        estimated_value: best_value,
    })
}

/// Values of the actions starting at `offset`, one per seed.
fn evaluate_range(
    evaluator: &impl ActionValue,
    state: &GridState,
    actions: &ActionSpace,
    depth: u32,
    offset: usize,
    seeds: &[u64],
) -> Vec<f64> {
    actions
        .iter()
        .skip(offset)
        .zip(seeds)
        .map(|(action, &seed)| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            evaluator.action_value(state, &action, actions, depth, &mut rng)
        })
        .collect()
}

/// Split the action space into one contiguous chunk per compute thread.
fn evaluate_parallel(
    evaluator: &impl ActionValue,
    state: &GridState,
    actions: &ActionSpace,
    depth: u32,
    seeds: &[u64],
) -> Vec<f64> {
    let pool = ComputeTaskPool::get_or_init(TaskPool::default);
    let chunk_size = seeds.len().div_ceil(pool.thread_num().max(1)).max(1);

    // Scope results come back in spawn order, which keeps chunk order.
    let chunks: Vec<Vec<f64>> = pool.scope(|scope| {
        for (chunk_index, chunk) in seeds.chunks(chunk_size).enumerate() {
            scope.spawn(async move {
                evaluate_range(
                    evaluator,
                    state,
                    actions,
                    depth,
                    chunk_index * chunk_size,
                    chunk,
                )
            });
        }
    });
    chunks.into_iter().flatten().collect()
}
