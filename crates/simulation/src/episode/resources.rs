use bevy::prelude::*;

use crate::policy::Policy;

/// The policy that chooses each step's resource placement.
#[derive(Resource, Debug, Clone)]
pub struct ActivePolicy(pub Policy);

/// Progress of the running episode.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeClock {
    /// Transitions completed so far.
    pub step: u32,
    pub max_steps: u32,
}

impl EpisodeClock {
    pub fn new(max_steps: u32) -> Self {
        Self { step: 0, max_steps }
    }

    pub fn finished(&self) -> bool {
        self.step >= self.max_steps
    }
}

/// Sent once per completed transition.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct StepCompleted {
    /// 1-based index of the step that just ran.
    pub step: u32,
    pub reward: f64,
    pub resources_deployed: usize,
    /// Cells burning after the step.
    pub burning: usize,
}

/// Per-step history of the running episode.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct EpisodeLog {
    pub step_rewards: Vec<f64>,
    pub resources_deployed: Vec<usize>,
    pub burning: Vec<usize>,
    /// Set once the completion summary has been logged.
    pub completed: bool,
}

impl EpisodeLog {
    pub fn record(&mut self, event: &StepCompleted) {
        self.step_rewards.push(event.reward);
        self.resources_deployed.push(event.resources_deployed);
        self.burning.push(event.burning);
    }

    pub fn total_reward(&self) -> f64 {
        self.step_rewards.iter().sum()
    }

    pub fn steps(&self) -> usize {
        self.step_rewards.len()
    }
}
