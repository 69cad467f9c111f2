//! Data-driven simulation and planner parameters.
//!
//! Every tunable constant of the fire model and the planners lives in one of
//! the structs below rather than in module-level globals. Each struct
//! implements `Default` with the standard fire-model values, deserializes with
//! `#[serde(default)]` so partial JSON overrides work, and exposes a
//! `validate()` that rejects values which would break a simulation invariant.

use serde::{Deserialize, Serialize};

use crate::config::{
    DEFAULT_MAX_PROPERTY_VALUE, DEFAULT_SENSOR_NOISE, MAX_GRID_CELLS, MAX_SEARCH_DEPTH,
};
use crate::error::WildfireError;
use crate::grid::checked_cell_count;

pub(crate) fn check_unit_interval(name: &'static str, value: f64) -> Result<(), WildfireError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(WildfireError::invalid(
            name,
            format!("must be in [0, 1], got {value}"),
        ));
    }
    Ok(())
}

fn check_non_negative(name: &'static str, value: f64) -> Result<(), WildfireError> {
    if !value.is_finite() || value < 0.0 {
        return Err(WildfireError::invalid(
            name,
            format!("must be a finite non-negative number, got {value}"),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Fire model
// ---------------------------------------------------------------------------

/// Shape of the per-step wind perturbation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WindNoise {
    /// Uniform increment in `[-wind_step, +wind_step]`.
    #[default]
    Uniform,
    /// Zero-mean Gaussian increment with standard deviation `wind_step`.
    Gaussian,
}

/// Constants of the ignition and burn-down rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireParams {
    /// Weight of `(neighbors_on_fire + 1)` in the ignition threshold.
    pub neighbor_weight: f64,
    /// Weight of `sqrt(wind)` in the ignition threshold.
    pub wind_weight: f64,
    /// Threshold reduction on cells with a resource deployed.
    pub resource_effect: f64,
    /// Upper bound of the uniform per-step burn fraction.
    pub max_burn_fraction: f64,
    /// Scale of the wind random walk.
    pub wind_step: f64,
    pub wind_noise: WindNoise,
}

impl Default for FireParams {
    fn default() -> Self {
        Self {
            neighbor_weight: 0.2,
            wind_weight: 0.1,
            resource_effect: 0.5,
            max_burn_fraction: 0.2,
            wind_step: 0.05,
            wind_noise: WindNoise::Uniform,
        }
    }
}

impl FireParams {
    pub fn validate(&self) -> Result<(), WildfireError> {
        check_non_negative("neighbor_weight", self.neighbor_weight)?;
        check_non_negative("wind_weight", self.wind_weight)?;
        check_non_negative("resource_effect", self.resource_effect)?;
        // A burn fraction of 1 or more would let property go negative.
        if !(0.0..1.0).contains(&self.max_burn_fraction) {
            return Err(WildfireError::invalid(
                "max_burn_fraction",
                format!("must be in [0, 1), got {}", self.max_burn_fraction),
            ));
        }
        check_non_negative("wind_step", self.wind_step)
    }
}

// ---------------------------------------------------------------------------
// Grid generation
// ---------------------------------------------------------------------------

/// How a fresh episode grid is generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Side length `n` of the `n x n` grid.
    pub size: usize,
    pub cost_per_resource: f64,
    /// Per-cell probability that a cell starts burning. Zero starts every
    /// episode fire-free.
    pub initial_fire_probability: f64,
    /// Property values are drawn from `[0, max_property_value)`.
    pub max_property_value: f64,
    pub fire: FireParams,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: 2,
            cost_per_resource: 1.0,
            initial_fire_probability: 0.0,
            max_property_value: DEFAULT_MAX_PROPERTY_VALUE,
            fire: FireParams::default(),
        }
    }
}

impl GridConfig {
    /// Default configuration for an `n x n` grid with the given resource price.
    pub fn new(size: usize, cost_per_resource: f64) -> Self {
        Self {
            size,
            cost_per_resource,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), WildfireError> {
        if self.size == 0 {
            return Err(WildfireError::EmptyGrid);
        }
        checked_cell_count(self.size, MAX_GRID_CELLS)?;
        check_non_negative("cost_per_resource", self.cost_per_resource)?;
        check_unit_interval("initial_fire_probability", self.initial_fire_probability)?;
        check_non_negative("max_property_value", self.max_property_value)?;
        self.fire.validate()
    }
}

// ---------------------------------------------------------------------------
// Observation
// ---------------------------------------------------------------------------

/// Sensor noise applied by the observation model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservationConfig {
    /// Standard deviation of the additive noise on fuel and dryness.
    pub sensor_noise: f64,
    /// Standard deviation of the additive noise on property value, or `None`
    /// to report property value exactly.
    pub property_noise: Option<f64>,
}

impl Default for ObservationConfig {
    fn default() -> Self {
        Self {
            sensor_noise: DEFAULT_SENSOR_NOISE,
            property_noise: None,
        }
    }
}

impl ObservationConfig {
    pub fn validate(&self) -> Result<(), WildfireError> {
        check_non_negative("sensor_noise", self.sensor_noise)?;
        if let Some(sigma) = self.property_noise {
            check_non_negative("property_noise", sigma)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

/// Which view of the state the terminal heuristic is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum UtilitySource {
    /// The true grid state.
    #[default]
    Exact,
    /// A fresh noisy observation drawn at every leaf.
    Observed(ObservationConfig),
}

/// Search parameters shared by both planners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Number of transitions searched below the current state.
    pub depth: u32,
    /// Independent samples `m` drawn per action.
    pub branching_factor: u32,
    /// Discount `gamma` applied per step of future reward.
    pub discount: f64,
    /// Per-cell placement probability of the random rollout policy.
    pub rollout_placement_probability: f64,
    /// Evaluate top-level actions on the compute task pool.
    pub parallel: bool,
    pub utility: UtilitySource,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            depth: 2,
            branching_factor: 5,
            discount: 0.95,
            rollout_placement_probability: 0.5,
            parallel: false,
            utility: UtilitySource::Exact,
        }
    }
}

impl PlannerConfig {
    pub fn validate(&self) -> Result<(), WildfireError> {
        if self.depth > MAX_SEARCH_DEPTH {
            return Err(WildfireError::invalid(
                "depth",
                format!("must be at most {MAX_SEARCH_DEPTH}, got {}", self.depth),
            ));
        }
        if self.branching_factor == 0 {
            return Err(WildfireError::invalid(
                "branching_factor",
                "at least one sample per action is required",
            ));
        }
        check_unit_interval("discount", self.discount)?;
        check_unit_interval(
            "rollout_placement_probability",
            self.rollout_placement_probability,
        )?;
        if let UtilitySource::Observed(observation) = &self.utility {
            observation.validate()?;
        }
        Ok(())
    }
}
