use bevy::prelude::*;

pub mod action_space;
pub mod config;
pub mod episode;
pub mod error;
pub mod grid;
pub mod grid_state;
pub mod observation;
pub mod params;
pub mod planner;
pub mod policy;
pub mod sim_rng;
pub mod simulation_sets;
pub mod transition;

#[cfg(test)]
pub mod test_harness;

pub use action_space::{enumerate_actions, Action, ActionSpace};
pub use episode::{
    evaluate_policy, run_episode, ActivePolicy, EpisodeClock, EpisodeLog, EpisodeOutcome,
    StepCompleted, TrialSummary,
};
pub use error::WildfireError;
pub use grid_state::{create_grid, GridState};
pub use observation::{observe, Observation, ObservationModel};
pub use params::{FireParams, GridConfig, ObservationConfig, PlannerConfig, UtilitySource};
pub use planner::{LookaheadRollout, PlanResult, Planner, SparseSampling};
pub use policy::{Policy, PolicySpec, RandomPolicy};
pub use sim_rng::SimRng;
pub use simulation_sets::WildfireSet;

/// Runs one episode inside a Bevy `App`, one step per `FixedUpdate` tick.
///
/// The grid is generated when the plugin is constructed, from the same seeded
/// stream that later drives the transitions, so a plugin built with the same
/// arguments replays the same episode.
pub struct WildfirePlugin {
    state: GridState,
    rng: SimRng,
    policy: Policy,
    max_steps: u32,
}

impl WildfirePlugin {
    pub fn new(
        grid: &GridConfig,
        policy: Policy,
        max_steps: u32,
        seed: u64,
    ) -> Result<Self, WildfireError> {
        let mut rng = SimRng::from_seed_u64(seed);
        let state = GridState::generate(grid, &mut rng.0)?;
        Ok(Self::from_state(state, policy, max_steps, rng))
    }

    /// Start from an existing grid instead of generating one.
    pub fn from_state(state: GridState, policy: Policy, max_steps: u32, rng: SimRng) -> Self {
        Self {
            state,
            rng,
            policy,
            max_steps,
        }
    }
}

impl Plugin for WildfirePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.state.clone())
            .insert_resource(self.rng.clone())
            .insert_resource(ActivePolicy(self.policy.clone()))
            .insert_resource(EpisodeClock::new(self.max_steps))
            .init_resource::<EpisodeLog>()
            .add_event::<StepCompleted>()
            .configure_sets(FixedUpdate, (WildfireSet::Step, WildfireSet::Report).chain())
            .add_systems(
                FixedUpdate,
                (
                    episode::advance_episode.in_set(WildfireSet::Step),
                    episode::record_step.in_set(WildfireSet::Report),
                ),
            );
    }
}
