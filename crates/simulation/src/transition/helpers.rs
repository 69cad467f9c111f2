use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::WildfireError;
use crate::grid::neighbors4;
use crate::params::{FireParams, WindNoise};

// =============================================================================
// Helpers
// =============================================================================

/// Counts the 4-connected neighbors of (x, y) that are burning in `fire`,
/// a row-major `size x size` layer. Cells past the edge count as not burning.
pub fn neighbors_on_fire(fire: &[bool], size: usize, x: usize, y: usize) -> u32 {
    neighbors4(x, y, size)
        .into_iter()
        .filter(|&(nx, ny)| fire[ny * size + nx])
        .count() as u32
}

/// Ignition probability of a cell that is not burning.
///
/// `(neighbors + 1) * neighbor_weight * dryness * fuel
///   + wind_weight * sqrt(wind) - resource_effect * resource`
///
/// The result is not clamped: above 1 the cell ignites with certainty, at or
/// below 0 it never does.
pub fn ignition_threshold(
    params: &FireParams,
    burning_neighbors: u32,
    dryness: f64,
    fuel: f64,
    wind: f64,
    resource_deployed: bool,
) -> f64 {
    debug_assert!(wind >= 0.0, "wind must stay non-negative, got {wind}");
    let spread = f64::from(burning_neighbors + 1) * params.neighbor_weight * dryness * fuel;
    let resource = if resource_deployed {
        params.resource_effect
    } else {
        0.0
    };
    spread + params.wind_weight * wind.sqrt() - resource
}

/// Per-cell wind perturbation drawn once per transition. Built when a grid is
/// constructed so a bad `wind_step` is refused there, not mid-episode.
#[derive(Debug, Clone, Copy)]
pub(crate) enum WindWalk {
    Uniform(f64),
    Gaussian(Normal<f64>),
}

impl WindWalk {
    pub(crate) fn new(params: &FireParams) -> Result<Self, WildfireError> {
        match params.wind_noise {
            WindNoise::Uniform => Ok(WindWalk::Uniform(params.wind_step)),
            WindNoise::Gaussian => Normal::new(0.0, params.wind_step)
                .map(WindWalk::Gaussian)
                .map_err(|e| WildfireError::invalid("wind_step", e.to_string())),
        }
    }

    #[inline]
    pub(crate) fn sample(&self, rng: &mut impl Rng) -> f64 {
        match self {
            WindWalk::Uniform(step) => rng.gen_range(-*step..=*step),
            WindWalk::Gaussian(normal) => normal.sample(rng),
        }
    }
}

impl PartialEq for WindWalk {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (WindWalk::Uniform(a), WindWalk::Uniform(b)) => a == b,
            (WindWalk::Gaussian(a), WindWalk::Gaussian(b)) => {
                a.mean() == b.mean() && a.std_dev() == b.std_dev()
            }
            _ => false,
        }
    }
}
