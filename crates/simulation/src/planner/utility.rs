use rand::Rng;

use crate::error::WildfireError;
use crate::grid_state::GridState;
use crate::observation::ObservationModel;
use crate::params::UtilitySource;

/// Heuristic value of a state at the search horizon.
///
/// Minus the property value sitting on burning cells: higher is better, and
/// a grid with nothing burning scores 0.
pub fn terminal_utility(state: &GridState) -> f64 {
    -state.exposed_property()
}

/// Leaf evaluator built from a [`UtilitySource`].
#[derive(Debug, Clone, Copy)]
pub(crate) enum UtilityEstimator {
    Exact,
    Observed(ObservationModel),
}

impl UtilityEstimator {
    pub(crate) fn new(source: &UtilitySource) -> Result<Self, WildfireError> {
        Ok(match source {
            UtilitySource::Exact => UtilityEstimator::Exact,
            UtilitySource::Observed(config) => {
                UtilityEstimator::Observed(ObservationModel::new(config)?)
            }
        })
    }

    pub(crate) fn estimate(&self, state: &GridState, rng: &mut impl Rng) -> f64 {
        match self {
            UtilityEstimator::Exact => terminal_utility(state),
            UtilityEstimator::Observed(model) => -model.observe(state, rng).exposed_property(),
        }
    }
}
