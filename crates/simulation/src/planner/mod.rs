//! Online planners that pick the next resource placement.
//!
//! Both planners score every action of an [`ActionSpace`] by sampling
//! futures through the transition engine and return the arg-max. They never
//! mutate the state they are given: every sample runs on its own deep copy.
//!
//! * [`SparseSampling`] branches over the full action space at every depth,
//!   costing `O((|A| * m)^depth)` transitions.
//! * [`LookaheadRollout`] branches only at the top and continues each sample
//!   with a random-placement rollout, costing `O(|A| * m * depth)`.

mod lookahead;
mod search;
mod sparse_sampling;
mod tests;
mod utility;

pub use lookahead::LookaheadRollout;
pub use sparse_sampling::SparseSampling;
pub use utility::terminal_utility;

use crate::action_space::{Action, ActionSpace};
use crate::error::WildfireError;
use crate::grid_state::GridState;
use crate::params::PlannerConfig;
use crate::sim_rng::SimRng;

/// Outcome of one planning call.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanResult {
    pub chosen_action: Action,
    /// Estimated expected discounted value of `chosen_action`.
    pub estimated_value: f64,
}

/// A search procedure that selects the next action for a grid.
pub trait Planner {
    fn config(&self) -> &PlannerConfig;

    /// Score every action in `actions` from `state` and return the best.
    ///
    /// Ties go to the action seen first in enumeration order. Fails if the
    /// action space does not match the grid size.
    fn select_action(
        &self,
        state: &GridState,
        actions: &ActionSpace,
        rng: &mut SimRng,
    ) -> Result<PlanResult, WildfireError>;
}
