//! # TestWildfire: headless harness for the episode plugin
//!
//! Wraps `bevy::app::App` + `MinimalPlugins` + [`WildfirePlugin`] so tests can
//! tick an episode through `FixedUpdate` and inspect the ECS resources.

use bevy::app::App;
use bevy::prelude::*;

use crate::episode::{EpisodeClock, EpisodeLog};
use crate::grid_state::GridState;
use crate::params::GridConfig;
use crate::policy::Policy;
use crate::sim_rng::SimRng;
use crate::WildfirePlugin;

/// A headless Bevy App running one wildfire episode.
pub struct TestWildfire {
    app: App,
}

impl TestWildfire {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// A generated grid driven by `policy` for `max_steps` steps.
    pub fn new(config: &GridConfig, policy: Policy, max_steps: u32, seed: u64) -> Self {
        let plugin = WildfirePlugin::new(config, policy, max_steps, seed)
            .expect("test grid config should be valid");
        Self::with_plugin(plugin)
    }

    /// Run on a hand-built grid.
    pub fn with_state(state: GridState, policy: Policy, max_steps: u32, seed: u64) -> Self {
        Self::with_plugin(WildfirePlugin::from_state(
            state,
            policy,
            max_steps,
            SimRng::from_seed_u64(seed),
        ))
    }

    fn with_plugin(plugin: WildfirePlugin) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(plugin);
        app.update();
        Self { app }
    }

    // -----------------------------------------------------------------------
    // Builders
    // -----------------------------------------------------------------------

    /// Swap the active policy before ticking.
    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.app
            .world_mut()
            .insert_resource(crate::episode::ActivePolicy(policy));
        self
    }

    // -----------------------------------------------------------------------
    // Ticking
    // -----------------------------------------------------------------------

    /// Run `n` `FixedUpdate` schedules.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    /// Tick until the episode clock runs out.
    pub fn run_to_end(&mut self) {
        let remaining = {
            let clock = self.clock();
            clock.max_steps.saturating_sub(clock.step)
        };
        self.tick(remaining);
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn state(&self) -> &GridState {
        self.app.world().resource::<GridState>()
    }

    pub fn clock(&self) -> &EpisodeClock {
        self.app.world().resource::<EpisodeClock>()
    }

    pub fn log(&self) -> &EpisodeLog {
        self.app.world().resource::<EpisodeLog>()
    }
}
