use rand_chacha::ChaCha8Rng;

use crate::action_space::{Action, ActionSpace};
use crate::error::WildfireError;
use crate::grid_state::GridState;
use crate::params::PlannerConfig;
use crate::sim_rng::SimRng;

use super::search::{search, ActionValue};
use super::utility::UtilityEstimator;
use super::{PlanResult, Planner};

/// Finite-horizon expectation search.
///
/// Every node expands the whole action space and draws `m` sampled successors
/// per action:
///
/// ```text
/// V(s, 0) = U(s)
/// Q(s, a, d) = 1/m * sum_i [ r_i + gamma * V(s'_i, d - 1) ]
/// V(s, d) = max_a Q(s, a, d)
/// ```
///
/// Each sample transitions its own clone of the parent state.
#[derive(Debug, Clone)]
pub struct SparseSampling {
    config: PlannerConfig,
    utility: UtilityEstimator,
}

impl SparseSampling {
    pub fn new(config: PlannerConfig) -> Result<Self, WildfireError> {
        config.validate()?;
        let utility = UtilityEstimator::new(&config.utility)?;
        Ok(Self { config, utility })
    }

    fn state_value(
        &self,
        state: &GridState,
        actions: &ActionSpace,
        depth: u32,
        rng: &mut ChaCha8Rng,
    ) -> f64 {
        if depth == 0 {
            return self.utility.estimate(state, rng);
        }
        actions
            .iter()
            .map(|action| self.action_value(state, &action, actions, depth, rng))
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

impl ActionValue for SparseSampling {
    fn action_value(
        &self,
        state: &GridState,
        action: &Action,
        actions: &ActionSpace,
        depth: u32,
        rng: &mut ChaCha8Rng,
    ) -> f64 {
        let m = self.config.branching_factor;
        let mut total = 0.0;
        for _ in 0..m {
            let mut next = state.clone();
            next.deploy(action);
            let reward = next.transition(rng);
            total += reward + self.config.discount * self.state_value(&next, actions, depth - 1, rng);
        }
        total / f64::from(m)
    }
}

impl Planner for SparseSampling {
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
            "SparseSampling",
            &self.config,
            &self.utility,
            self,
            state,
            actions,
            rng,
        )
    }
}
