//! Headless experiment runner.
//!
//! ```text
//! wildfire-runner [CONFIG.json]            evaluate every configured policy
//! wildfire-runner --episode [CONFIG.json]  one plugin-driven episode, per step
//! ```
//!
//! Results go to stdout as JSON; logs go to stderr and honor `RUST_LOG`.

mod episode_mode;
mod run_config;

use std::path::Path;
use std::process::ExitCode;

use wildfire::{evaluate_policy, TrialSummary};

use episode_mode::{init_logging, run_episode_mode};
use run_config::{RunConfig, RunnerError};

fn evaluate_mode(config: &RunConfig) -> Result<Vec<String>, RunnerError> {
    let mut summaries: Vec<TrialSummary> = Vec::with_capacity(config.policies.len());
    for spec in &config.policies {
        let policy = spec.build(&config.planner, config.grid.size)?;
        summaries.push(evaluate_policy(
            &config.grid,
            &policy,
            config.steps,
            config.trials,
            config.seed,
        )?);
    }
    Ok(vec![serde_json::to_string_pretty(&summaries)?])
}

fn main() -> ExitCode {
    init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let episode = args.iter().any(|a| a == "--episode");
    let path = args.iter().find(|a| !a.starts_with("--")).map(Path::new);

    let result = RunConfig::load(path).and_then(|config| {
        if episode {
            run_episode_mode(&config)
        } else {
            evaluate_mode(&config)
        }
    });

    match result {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("wildfire-runner: {e}");
            ExitCode::FAILURE
        }
    }
}
