//! Runner configuration, read from an optional JSON file.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use wildfire::{GridConfig, PlannerConfig, PolicySpec, WildfireError};

/// What to run and how often. Every field has a default, so a config file
/// only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub grid: GridConfig,
    pub planner: PlannerConfig,
    pub policies: Vec<PolicySpec>,
    /// Transitions per episode.
    pub steps: u32,
    /// Independent episodes per policy.
    pub trials: u32,
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig {
                initial_fire_probability: 0.25,
                ..GridConfig::default()
            },
            planner: PlannerConfig::default(),
            policies: vec![
                PolicySpec::Idle,
                PolicySpec::Random {
                    placement_probability: 0.5,
                },
                PolicySpec::Lookahead,
                PolicySpec::SparseSampling,
            ],
            steps: 20,
            trials: 10,
            seed: 42,
        }
    }
}

impl RunConfig {
    /// Read a config file, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, RunnerError> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                Ok(serde_json::from_str(&text)?)
            }
            None => Ok(Self::default()),
        }
    }
}

// ---------------------------------------------------------------------------
// RunnerError
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum RunnerError {
    /// The config file could not be read.
    Io(std::io::Error),
    /// The config file is not valid JSON for a `RunConfig`.
    Json(serde_json::Error),
    /// The grid, planner or policy configuration was rejected.
    Simulation(WildfireError),
}

impl fmt::Display for RunnerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunnerError::Io(e) => write!(f, "I/O error: {e}"),
            RunnerError::Json(e) => write!(f, "JSON error: {e}"),
            RunnerError::Simulation(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for RunnerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunnerError::Io(e) => Some(e),
            RunnerError::Json(e) => Some(e),
            RunnerError::Simulation(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for RunnerError {
    fn from(e: std::io::Error) -> Self {
        RunnerError::Io(e)
    }
}

impl From<serde_json::Error> for RunnerError {
    fn from(e: serde_json::Error) -> Self {
        RunnerError::Json(e)
    }
}

impl From<WildfireError> for RunnerError {
    fn from(e: WildfireError) -> Self {
        RunnerError::Simulation(e)
    }
}
