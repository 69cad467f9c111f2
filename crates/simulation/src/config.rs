/// Lower clamp for per-cell wind after every transition.
pub const WIND_MIN: f64 = 0.01;
/// Upper clamp for per-cell wind after every transition.
pub const WIND_MAX: f64 = 0.99;

/// Largest grid (in cells) a state may be built with: a 4096x4096 grid.
pub const MAX_GRID_CELLS: usize = 1 << 24;

/// Hard ceiling on `n * n` for exhaustive action enumeration.
///
/// The action space has `2^(n*n)` members and the sparse-sampling planner
/// touches every one of them at every depth, so anything past 20 cells
/// (about a million actions) is refused outright.
pub const MAX_ENUMERABLE_CELLS: usize = 20;

/// Above this many cells an action space is still built, but a warning is
/// logged: a single planner ply already costs 1024+ transitions per sample.
pub const WARN_ENUMERABLE_CELLS: usize = 9;

/// Deepest search either planner will accept.
pub const MAX_SEARCH_DEPTH: u32 = 8;

/// Default standard deviation of the fuel/dryness sensor noise.
pub const DEFAULT_SENSOR_NOISE: f64 = 0.05;

/// Property values are drawn uniformly from `[0, DEFAULT_MAX_PROPERTY_VALUE)`.
pub const DEFAULT_MAX_PROPERTY_VALUE: f64 = 100.0;
