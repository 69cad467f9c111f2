//! Decision rules the episode driver can run.
//!
//! Besides the two planners there are two baselines: [`Policy::Idle`] never
//! deploys anything and [`Policy::Random`] places resources independently per
//! cell. The baselines never enumerate actions, so they work on any grid size.

use bevy::log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::action_space::{Action, ActionSpace};
use crate::error::WildfireError;
use crate::grid_state::GridState;
use crate::params::{check_unit_interval, PlannerConfig};
use crate::planner::{LookaheadRollout, Planner, SparseSampling};
use crate::sim_rng::SimRng;

/// Bernoulli(p) placement, independent per cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomPolicy {
    placement_probability: f64,
}

impl RandomPolicy {
    pub fn new(placement_probability: f64) -> Result<Self, WildfireError> {
        check_unit_interval("placement_probability", placement_probability)?;
        Ok(Self {
            placement_probability,
        })
    }

    pub fn placement_probability(&self) -> f64 {
        self.placement_probability
    }

    /// Draw one placement for a `size x size` grid, one draw per cell in
    /// row-major order.
    pub fn sample(&self, size: usize, rng: &mut impl Rng) -> Action {
        Action::from_fn(size, |_, _| rng.gen::<f64>() < self.placement_probability)
    }
}

#[derive(Debug, Clone)]
pub enum Policy {
    Idle,
    Random(RandomPolicy),
    SparseSampling {
        planner: SparseSampling,
        actions: ActionSpace,
    },
    Lookahead {
        planner: LookaheadRollout,
        actions: ActionSpace,
    },
}

impl Policy {
    pub fn random(placement_probability: f64) -> Result<Self, WildfireError> {
        Ok(Policy::Random(RandomPolicy::new(placement_probability)?))
    }

    /// Sparse sampling over the full action space of a `size x size` grid.
    pub fn sparse_sampling(config: PlannerConfig, size: usize) -> Result<Self, WildfireError> {
        Ok(Policy::SparseSampling {
            planner: SparseSampling::new(config)?,
            actions: ActionSpace::new(size)?,
        })
    }

    /// Lookahead with random rollouts over the full action space of a
    /// `size x size` grid.
    pub fn lookahead(config: PlannerConfig, size: usize) -> Result<Self, WildfireError> {
        Ok(Policy::Lookahead {
            planner: LookaheadRollout::new(config)?,
            actions: ActionSpace::new(size)?,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Policy::Idle => "idle",
            Policy::Random(_) => "random",
            Policy::SparseSampling { .. } => "sparse_sampling",
            Policy::Lookahead { .. } => "lookahead",
        }
    }

    /// Choose the resource placement for the next transition of `state`.
    pub fn decide(&self, state: &GridState, rng: &mut SimRng) -> Result<Action, WildfireError> {
        let action = match self {
            Policy::Idle => Action::none(state.size()),
            Policy::Random(random) => random.sample(state.size(), &mut rng.0),
            Policy::SparseSampling { planner, actions } => {
                planner.select_action(state, actions, rng)?.chosen_action
            }
            Policy::Lookahead { planner, actions } => {
                planner.select_action(state, actions, rng)?.chosen_action
            }
        };
        debug!(
            "Policy {}: deploying {} resources ({} cells burning)",
            self.name(),
            action.deployed_count(),
            state.burning_count()
        );
        Ok(action)
    }
}

/// Serializable choice of policy, resolved against a [`PlannerConfig`] and a
/// grid size by [`PolicySpec::build`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolicySpec {
    Idle,
    Random {
        placement_probability: f64,
    },
    SparseSampling,
    #[default]
    Lookahead,
}

impl PolicySpec {
    pub fn build(&self, planner: &PlannerConfig, size: usize) -> Result<Policy, WildfireError> {
        match *self {
            PolicySpec::Idle => Ok(Policy::Idle),
            PolicySpec::Random {
                placement_probability,
            } => Policy::random(placement_probability),
            PolicySpec::SparseSampling => Policy::sparse_sampling(*planner, size),
            PolicySpec::Lookahead => Policy::lookahead(*planner, size),
        }
    }
}
