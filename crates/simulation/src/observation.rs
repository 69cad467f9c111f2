//! Noisy, read-only view of a [`GridState`].
//!
//! Fire and wind are reported exactly. Fuel and dryness carry independent
//! additive Gaussian sensor noise, and property value is either exact or
//! noisy depending on [`ObservationConfig::property_noise`]. Readings are raw
//! sensor values and are not clamped, so a noisy fuel reading can dip below
//! zero.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::WildfireError;
use crate::grid::CellField;
use crate::grid_state::GridState;
use crate::params::ObservationConfig;

/// A snapshot of what the sensors report for one grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub fire: CellField<bool>,
    pub wind: CellField<f64>,
    pub fuel: CellField<f64>,
    pub dryness: CellField<f64>,
    pub property_value: CellField<f64>,
}

impl Observation {
    /// Observed property value sitting on burning cells.
    pub fn exposed_property(&self) -> f64 {
        self.fire
            .iter()
            .zip(self.property_value.iter())
            .filter(|(&burning, _)| burning)
            .map(|(_, &value)| value)
            .sum()
    }
}

/// Sensor model with its noise distributions prepared once.
#[derive(Debug, Clone, Copy)]
pub struct ObservationModel {
    sensor: Normal<f64>,
    property: Option<Normal<f64>>,
}

impl ObservationModel {
    pub fn new(config: &ObservationConfig) -> Result<Self, WildfireError> {
        config.validate()?;
        let sensor = Normal::new(0.0, config.sensor_noise)
            .map_err(|e| WildfireError::invalid("sensor_noise", e.to_string()))?;
        let property = config
            .property_noise
            .map(|sigma| {
                Normal::new(0.0, sigma)
                    .map_err(|e| WildfireError::invalid("property_noise", e.to_string()))
            })
            .transpose()?;
        Ok(Self { sensor, property })
    }

    /// Draw a fresh observation. Never touches `state`; every call samples
    /// new noise.
    pub fn observe(&self, state: &GridState, rng: &mut impl Rng) -> Observation {
        let fuel = noisy(state.fuel(), &self.sensor, rng);
        let dryness = noisy(state.dryness(), &self.sensor, rng);
        let property_value = match &self.property {
            Some(normal) => noisy(state.property_value(), normal, rng),
            None => state.property_value().clone(),
        };
        Observation {
            fire: state.fire().clone(),
            wind: state.wind().clone(),
            fuel,
            dryness,
            property_value,
        }
    }
}

fn noisy(layer: &CellField<f64>, noise: &Normal<f64>, rng: &mut impl Rng) -> CellField<f64> {
    layer.map(|v| v + noise.sample(rng))
}

/// Observe `state` once with the given sensor configuration.
pub fn observe(
    state: &GridState,
    config: &ObservationConfig,
    rng: &mut impl Rng,
) -> Result<Observation, WildfireError> {
    Ok(ObservationModel::new(config)?.observe(state, rng))
}
