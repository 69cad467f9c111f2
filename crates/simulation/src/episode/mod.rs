//! Episode loop: decide, deploy, transition, repeat.
//!
//! [`run_episode`] and [`evaluate_policy`] drive the loop directly. The
//! resources and systems re-exported here run the same loop one step per
//! `FixedUpdate` tick inside a Bevy `App` (see [`crate::WildfirePlugin`]).

mod resources;
mod systems;

pub use resources::{ActivePolicy, EpisodeClock, EpisodeLog, StepCompleted};
pub use systems::{advance_episode, record_step};

use bevy::log::info;
use serde::{Deserialize, Serialize};

use crate::error::WildfireError;
use crate::grid_state::GridState;
use crate::params::GridConfig;
use crate::policy::Policy;
use crate::sim_rng::SimRng;

/// Rewards collected by one episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeOutcome {
    pub step_rewards: Vec<f64>,
    pub total_reward: f64,
}

/// Total episode reward over independent trials of one policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialSummary {
    pub policy: String,
    pub rewards: Vec<f64>,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl TrialSummary {
    fn from_rewards(policy: &str, rewards: Vec<f64>) -> Self {
        let count = rewards.len().max(1) as f64;
        let mean = rewards.iter().sum::<f64>() / count;
        let min = rewards.iter().copied().fold(f64::INFINITY, f64::min);
        let max = rewards.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self {
            policy: policy.to_string(),
            rewards,
            mean,
            min,
            max,
        }
    }
}

/// Run `steps` decide/deploy/transition rounds on `state`.
///
/// `state` is advanced in place and keeps its cumulative reward, so
/// `total_reward` equals the change in `state.reward()`.
pub fn run_episode(
    state: &mut GridState,
    policy: &Policy,
    steps: u32,
    rng: &mut SimRng,
) -> Result<EpisodeOutcome, WildfireError> {
    let mut step_rewards = Vec::with_capacity(steps as usize);
    for _ in 0..steps {
        let action = policy.decide(state, rng)?;
        state.set_resources(&action)?;
        step_rewards.push(state.transition(&mut rng.0));
    }
    let total_reward = step_rewards.iter().sum();
    Ok(EpisodeOutcome {
        step_rewards,
        total_reward,
    })
}

/// Run `trials` independent episodes of `steps` steps, each on a freshly
/// generated grid.
///
/// Every trial forks its own stream from a master RNG seeded with `seed`, so
/// trial `k` sees the same grid and the same randomness no matter which
/// policy is evaluated.
pub fn evaluate_policy(
    grid: &GridConfig,
    policy: &Policy,
    steps: u32,
    trials: u32,
    seed: u64,
) -> Result<TrialSummary, WildfireError> {
    if trials == 0 {
        return Err(WildfireError::invalid("trials", "at least one trial is required"));
    }
    grid.validate()?;

    let mut master = SimRng::from_seed_u64(seed);
    let mut rewards = Vec::with_capacity(trials as usize);
    for _ in 0..trials {
        let mut rng = master.fork();
        let mut state = GridState::generate(grid, &mut rng.0)?;
        let outcome = run_episode(&mut state, policy, steps, &mut rng)?;
        rewards.push(outcome.total_reward);
    }

    let summary = TrialSummary::from_rewards(policy.name(), rewards);
    info!(
        "Policy {}: {} trials of {} steps on a {}x{} grid, mean reward {:.2} (min {:.2}, max {:.2})",
        summary.policy,
        trials,
        steps,
        grid.size,
        grid.size,
        summary.mean,
        summary.min,
        summary.max
    );
    Ok(summary)
}
