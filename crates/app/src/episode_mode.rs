//! `--episode` mode: one episode driven by `WildfirePlugin` inside a headless
//! Bevy App, reported step by step.

use bevy::log::LogPlugin;
use bevy::prelude::*;
use serde::Serialize;

use wildfire::{EpisodeClock, EpisodeLog, WildfirePlugin};

use crate::run_config::{RunConfig, RunnerError};

/// One line of episode output.
#[derive(Debug, Serialize)]
struct StepLine {
    step: usize,
    reward: f64,
    resources_deployed: usize,
    burning: usize,
}

/// Install the `RUST_LOG`-aware stderr subscriber for the whole process.
///
/// `LogPlugin` sets the global subscriber while it is being built, so the
/// throwaway App hosting it is dropped straight away. Call once, before any
/// mode runs.
pub fn init_logging() {
    App::new().add_plugins(LogPlugin::default());
}

/// Headless App with no simulation systems. Logging is process-global and
/// comes from [`init_logging`].
pub fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app
}

/// Run the first configured policy for `steps` ticks and return one JSON
/// line per step.
pub fn run_episode_mode(config: &RunConfig) -> Result<Vec<String>, RunnerError> {
    let spec = config.policies.first().copied().unwrap_or_default();
    let policy = spec.build(&config.planner, config.grid.size)?;
    let plugin = WildfirePlugin::new(&config.grid, policy, config.steps, config.seed)?;

    let mut app = headless_app();
    app.add_plugins(plugin);
    // Initial update so Startup systems run and resources settle.
    app.update();

    while !app.world().resource::<EpisodeClock>().finished() {
        let before = app.world().resource::<EpisodeClock>().step;
        app.world_mut().run_schedule(FixedUpdate);
        if app.world().resource::<EpisodeClock>().step == before {
            // The policy failed and was logged; it will fail again.
            break;
        }
    }

    let log = app.world().resource::<EpisodeLog>();
    let mut lines = Vec::with_capacity(log.steps());
    let steps = log
        .step_rewards
        .iter()
        .zip(&log.resources_deployed)
        .zip(&log.burning);
    for (i, ((&reward, &resources_deployed), &burning)) in steps.enumerate() {
        let line = StepLine {
            step: i + 1,
            reward,
            resources_deployed,
            burning,
        };
        lines.push(serde_json::to_string(&line)?);
    }
    Ok(lines)
}
