use rand_chacha::ChaCha8Rng;

use crate::action_space::{Action, ActionSpace};
use crate::error::WildfireError;
use crate::grid_state::GridState;
use crate::params::PlannerConfig;
use crate::policy::RandomPolicy;
use crate::sim_rng::SimRng;

use super::search::{search, ActionValue};
use super::utility::UtilityEstimator;
use super::{PlanResult, Planner};

/// One exhaustive ply followed by random-placement rollouts.
///
/// Each of the `m` samples per action applies the action once, then plays
/// `depth - 1` more steps with a [`RandomPolicy`] and scores the final state
/// with the terminal utility. Cost is linear in depth.
#[derive(Debug, Clone)]
pub struct LookaheadRollout {
    config: PlannerConfig,
    utility: UtilityEstimator,
    rollout_policy: RandomPolicy,
}

impl LookaheadRollout {
    pub fn new(config: PlannerConfig) -> Result<Self, WildfireError> {
        config.validate()?;
        let utility = UtilityEstimator::new(&config.utility)?;
        let rollout_policy = RandomPolicy::new(config.rollout_placement_probability)?;
        Ok(Self {
            config,
            utility,
            rollout_policy,
        })
    }

    /// Discounted return of `depth` random-policy steps from `state`, plus
    /// the discounted terminal utility of where the rollout ends.
    fn rollout(&self, mut state: GridState, depth: u32, rng: &mut ChaCha8Rng) -> f64 {
        let mut value = 0.0;
        let mut weight = 1.0;
        for _ in 0..depth {
            let action = self.rollout_policy.sample(state.size(), rng);
            state.deploy(&action);
            value += weight * state.transition(rng);
            weight *= self.config.discount;
        }
        value + weight * self.utility.estimate(&state, rng)
    }
}

impl ActionValue for LookaheadRollout {
    fn action_value(
        &self,
        state: &GridState,
        action: &Action,
        _actions: &ActionSpace,
        depth: u32,
        rng: &mut ChaCha8Rng,
    ) -> f64 {
        let m = self.config.branching_factor;
        let mut total = 0.0;
        for _ in 0..m {
            let mut next = state.clone();
            next.deploy(action);
            let reward = next.transition(rng);
            total += reward + self.config.discount * self.rollout(next, depth - 1, rng);
        }
        total / f64::from(m)
    }
}

impl Planner for LookaheadRollout {
    fn config(&self) -> &PlannerConfig {
        &self.config
    }

    fn select_action(
        &self,
        state: &GridState,
        actions: &ActionSpace,
        rng: &mut SimRng,
    ) -> Result<PlanResult, WildfireError> {
        search(
            "LookaheadRollout",
            &self.config,
            &self.utility,
            self,
            state,
            actions,
            rng,
        )
    }
}
