use bevy::prelude::*;
use rand::Rng;

use crate::action_space::Action;
use crate::config::{MAX_GRID_CELLS, WIND_MAX, WIND_MIN};
use crate::error::WildfireError;
use crate::grid::{checked_cell_count, CellField};
use crate::params::{FireParams, GridConfig};
use crate::transition::WindWalk;

// =============================================================================
// Layers
// =============================================================================

/// Explicit per-cell layers used to assemble a [`GridState`] by hand.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayers {
    pub fire: CellField<bool>,
    pub fuel: CellField<f64>,
    pub dryness: CellField<f64>,
    pub wind: CellField<f64>,
    pub property_value: CellField<f64>,
}

impl GridLayers {
    /// Every cell identical: handy for scenario setups.
    pub fn uniform(
        size: usize,
        fire: bool,
        fuel: f64,
        dryness: f64,
        wind: f64,
        property_value: f64,
    ) -> Self {
        Self {
            fire: CellField::filled(size, fire),
            fuel: CellField::filled(size, fuel),
            dryness: CellField::filled(size, dryness),
            wind: CellField::filled(size, wind),
            property_value: CellField::filled(size, property_value),
        }
    }
}

// =============================================================================
// Grid state
// =============================================================================

/// The complete mutable state of one simulated world.
///
/// Only [`GridState::set_resources`] and the transition engine mutate it.
/// Cloning produces a fully independent deep copy, which is what planners rely
/// on to sample sibling futures.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GridState {
    pub(crate) fire: CellField<bool>,
    pub(crate) fuel: CellField<f64>,
    pub(crate) dryness: CellField<f64>,
    pub(crate) wind: CellField<f64>,
    pub(crate) property_value: CellField<f64>,
    pub(crate) resources: CellField<bool>,
    pub(crate) reward: f64,
    pub(crate) cost_per_resource: f64,
    pub(crate) params: FireParams,
    pub(crate) wind_walk: WindWalk,
}

impl GridState {
    /// Generate a fresh episode grid.
    ///
    /// Each cell draws, in order: its initial fire flag, dryness, property
    /// value, fuel and wind, independently of every other cell.
    pub fn generate(config: &GridConfig, rng: &mut impl Rng) -> Result<Self, WildfireError> {
        config.validate()?;
        let size = config.size;
        let cells = checked_cell_count(size, MAX_GRID_CELLS)?;
        let wind_walk = WindWalk::new(&config.fire)?;

        let mut fire = Vec::with_capacity(cells);
        let mut dryness = Vec::with_capacity(cells);
        let mut property_value = Vec::with_capacity(cells);
        let mut fuel = Vec::with_capacity(cells);
        let mut wind = Vec::with_capacity(cells);
        for _ in 0..cells {
            fire.push(rng.gen::<f64>() < config.initial_fire_probability);
            dryness.push(rng.gen::<f64>());
            property_value.push(config.max_property_value * rng.gen::<f64>());
            fuel.push(rng.gen::<f64>());
            wind.push(rng.gen_range(WIND_MIN..=WIND_MAX));
        }

        Ok(Self {
            fire: CellField::from_vec(size, fire)?,
            fuel: CellField::from_vec(size, fuel)?,
            dryness: CellField::from_vec(size, dryness)?,
            wind: CellField::from_vec(size, wind)?,
            property_value: CellField::from_vec(size, property_value)?,
            resources: CellField::filled(size, false),
            reward: 0.0,
            cost_per_resource: config.cost_per_resource,
            params: config.fire,
            wind_walk,
        })
    }

    /// Assemble a state from explicit layers.
    ///
    /// All layers must share one size. Fuel and property must be
    /// non-negative, dryness and wind must lie in `[0, 1]`. Wind below
    /// [`WIND_MIN`] is accepted here; the first transition clamps it.
    pub fn from_layers(
        layers: GridLayers,
        cost_per_resource: f64,
        params: FireParams,
    ) -> Result<Self, WildfireError> {
        let size = layers.fire.size();
        if size == 0 {
            return Err(WildfireError::EmptyGrid);
        }
        checked_cell_count(size, MAX_GRID_CELLS)?;
        for other in [
            layers.fuel.size(),
            layers.dryness.size(),
            layers.wind.size(),
            layers.property_value.size(),
        ] {
            if other != size {
                return Err(WildfireError::ShapeMismatch {
                    expected: size,
                    found: other,
                });
            }
        }
        if !cost_per_resource.is_finite() || cost_per_resource < 0.0 {
            return Err(WildfireError::invalid(
                "cost_per_resource",
                format!("must be a finite non-negative number, got {cost_per_resource}"),
            ));
        }
        params.validate()?;
        let wind_walk = WindWalk::new(&params)?;
        check_layer("fuel", &layers.fuel, 0.0, f64::MAX)?;
        check_layer("dryness", &layers.dryness, 0.0, 1.0)?;
        check_layer("wind", &layers.wind, 0.0, 1.0)?;
        check_layer("property_value", &layers.property_value, 0.0, f64::MAX)?;

        Ok(Self {
            fire: layers.fire,
            fuel: layers.fuel,
            dryness: layers.dryness,
            wind: layers.wind,
            property_value: layers.property_value,
            resources: CellField::filled(size, false),
            reward: 0.0,
            cost_per_resource,
            params,
            wind_walk,
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[inline]
    pub fn size(&self) -> usize {
        self.fire.size()
    }

    pub fn fire(&self) -> &CellField<bool> {
        &self.fire
    }

    pub fn fuel(&self) -> &CellField<f64> {
        &self.fuel
    }

    pub fn dryness(&self) -> &CellField<f64> {
        &self.dryness
    }

    pub fn wind(&self) -> &CellField<f64> {
        &self.wind
    }

    pub fn property_value(&self) -> &CellField<f64> {
        &self.property_value
    }

    pub fn resource_assignment(&self) -> &CellField<bool> {
        &self.resources
    }

    /// Cumulative reward: the sum of every step reward so far.
    #[inline]
    pub fn reward(&self) -> f64 {
        self.reward
    }

    #[inline]
    pub fn cost_per_resource(&self) -> f64 {
        self.cost_per_resource
    }

    pub fn params(&self) -> &FireParams {
        &self.params
    }

    #[inline]
    pub fn is_burning(&self, x: usize, y: usize) -> bool {
        self.fire.get(x, y)
    }

    pub fn burning_count(&self) -> usize {
        self.fire.count_set()
    }

    /// Total property value sitting on currently burning cells.
    pub fn exposed_property(&self) -> f64 {
        self.fire
            .iter()
            .zip(self.property_value.iter())
            .filter(|(&burning, _)| burning)
            .map(|(_, &value)| value)
            .sum()
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Deploy resources for the next transition, replacing the previous
    /// assignment.
    pub fn set_resources(&mut self, action: &Action) -> Result<(), WildfireError> {
        if action.size() != self.size() {
            return Err(WildfireError::ShapeMismatch {
                expected: self.size(),
                found: action.size(),
            });
        }
        self.deploy(action);
        Ok(())
    }

    /// [`GridState::set_resources`] for callers that already checked the size.
    pub(crate) fn deploy(&mut self, action: &Action) {
        debug_assert_eq!(action.size(), self.size());
        self.resources
            .as_mut_slice()
            .copy_from_slice(action.cells());
    }
}

fn check_layer(
    name: &'static str,
    layer: &CellField<f64>,
    min: f64,
    max: f64,
) -> Result<(), WildfireError> {
    match layer.iter().find(|v| !(min..=max).contains(*v)) {
        Some(bad) => Err(WildfireError::invalid(
            name,
            format!("cell value {bad} outside [{min}, {max}]"),
        )),
        None => Ok(()),
    }
}

/// Generate a fresh fire-free `n x n` grid with default fire parameters.
pub fn create_grid(
    n: usize,
    cost_per_resource: f64,
    rng: &mut impl Rng,
) -> Result<GridState, WildfireError> {
    GridState::generate(&GridConfig::new(n, cost_per_resource), rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim_rng::SimRng;

    #[test]
    fn test_create_grid_initial_state() {
        let mut rng = SimRng::from_seed_u64(1);
        let grid = create_grid(4, 0.5, &mut rng.0).unwrap();
        assert_eq!(grid.size(), 4);
        assert_eq!(grid.reward(), 0.0);
        assert_eq!(grid.cost_per_resource(), 0.5);
        assert_eq!(grid.burning_count(), 0);
        assert_eq!(grid.resource_assignment().count_set(), 0);
        assert!(grid.fuel().iter().all(|f| (0.0..1.0).contains(f)));
        assert!(grid.dryness().iter().all(|d| (0.0..1.0).contains(d)));
        assert!(grid.property_value().iter().all(|p| (0.0..100.0).contains(p)));
        assert!(grid.wind().iter().all(|w| (WIND_MIN..=WIND_MAX).contains(w)));
    }

    #[test]
    fn test_generate_is_seed_deterministic() {
        let config = GridConfig::new(3, 1.0);
        let a = GridState::generate(&config, &mut SimRng::from_seed_u64(5).0).unwrap();
        let b = GridState::generate(&config, &mut SimRng::from_seed_u64(5).0).unwrap();
        let c = GridState::generate(&config, &mut SimRng::from_seed_u64(6).0).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_generate_with_certain_initial_fire() {
        let config = GridConfig {
            initial_fire_probability: 1.0,
            ..GridConfig::new(3, 1.0)
        };
        let grid = GridState::generate(&config, &mut SimRng::default().0).unwrap();
        assert_eq!(grid.burning_count(), 9);
    }

    #[test]
    fn test_generate_rejects_invalid_config() {
        let mut rng = SimRng::default();
        assert_eq!(
            create_grid(0, 1.0, &mut rng.0).unwrap_err(),
            WildfireError::EmptyGrid
        );
        assert!(create_grid(2, f64::NAN, &mut rng.0).is_err());
        assert!(matches!(
            create_grid(usize::MAX, 1.0, &mut rng.0),
            Err(WildfireError::GridTooLarge { .. })
        ));
    }

    #[test]
    fn test_set_resources_replaces_assignment() {
        let mut grid = create_grid(2, 1.0, &mut SimRng::default().0).unwrap();
        grid.set_resources(&Action::from_fn(2, |x, _| x == 0)).unwrap();
        assert_eq!(grid.resource_assignment().as_slice(), &[true, false, true, false]);
        grid.set_resources(&Action::none(2)).unwrap();
        assert_eq!(grid.resource_assignment().count_set(), 0);
    }

    #[test]
    fn test_set_resources_rejects_wrong_shape() {
        let mut grid = create_grid(2, 1.0, &mut SimRng::default().0).unwrap();
        let err = grid.set_resources(&Action::none(3)).unwrap_err();
        assert_eq!(
            err,
            WildfireError::ShapeMismatch {
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn test_from_layers_validates_ranges() {
        let ok = GridLayers::uniform(2, false, 1.0, 0.5, 0.0, 10.0);
        assert!(GridState::from_layers(ok, 1.0, FireParams::default()).is_ok());

        let negative_fuel = GridLayers::uniform(2, false, -0.1, 0.5, 0.5, 10.0);
        assert!(GridState::from_layers(negative_fuel, 1.0, FireParams::default()).is_err());

        let negative_wind = GridLayers::uniform(2, false, 0.5, 0.5, -0.5, 10.0);
        assert!(GridState::from_layers(negative_wind, 1.0, FireParams::default()).is_err());
    }

    #[test]
    fn test_from_layers_rejects_mixed_sizes() {
        let mut layers = GridLayers::uniform(2, false, 1.0, 0.5, 0.5, 10.0);
        layers.wind = CellField::filled(3, 0.5);
        assert_eq!(
            GridState::from_layers(layers, 1.0, FireParams::default()).unwrap_err(),
            WildfireError::ShapeMismatch {
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn test_exposed_property_sums_burning_cells_only() {
        let mut layers = GridLayers::uniform(2, false, 1.0, 0.5, 0.5, 10.0);
        layers.fire = CellField::from_vec(2, vec![true, false, false, true]).unwrap();
        layers.property_value = CellField::from_vec(2, vec![5.0, 7.0, 11.0, 13.0]).unwrap();
        let grid = GridState::from_layers(layers, 1.0, FireParams::default()).unwrap();
        assert_eq!(grid.exposed_property(), 18.0);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = create_grid(2, 1.0, &mut SimRng::default().0).unwrap();
        let mut copy = original.clone();
        copy.set_resources(&Action::from_fn(2, |_, _| true)).unwrap();
        copy.fuel.set(0, 0, 0.0);
        assert_eq!(original.resource_assignment().count_set(), 0);
        assert_ne!(original.fuel().get(0, 0), 0.0);
    }
}
