use bevy::prelude::*;

use crate::grid_state::GridState;
use crate::sim_rng::SimRng;

use super::resources::{ActivePolicy, EpisodeClock, EpisodeLog, StepCompleted};

// =============================================================================
// Systems
// =============================================================================

/// Advance the episode by one step: ask the active policy for a placement,
/// deploy it and run one transition.
///
/// Does nothing once the clock has reached `max_steps`. A policy error is
/// logged and the tick is skipped without advancing the clock.
pub fn advance_episode(
    mut state: ResMut<GridState>,
    mut rng: ResMut<SimRng>,
    policy: Res<ActivePolicy>,
    mut clock: ResMut<EpisodeClock>,
    mut completed: EventWriter<StepCompleted>,
) {
    if clock.finished() {
        return;
    }

    let action = match policy.0.decide(&state, &mut rng) {
        Ok(action) => action,
        Err(e) => {
            error!("advance_episode: step {} skipped: {}", clock.step + 1, e);
            return;
        }
    };
    if let Err(e) = state.set_resources(&action) {
        error!("advance_episode: step {} skipped: {}", clock.step + 1, e);
        return;
    }

    let report = state.step(&mut rng.0);
    clock.step += 1;
    completed.send(StepCompleted {
        step: clock.step,
        reward: report.reward,
        resources_deployed: action.deployed_count(),
        burning: state.burning_count(),
    });
}

/// Append completed steps to the [`EpisodeLog`] and log the episode summary
/// once the clock runs out.
pub fn record_step(
    mut completed: EventReader<StepCompleted>,
    mut log: ResMut<EpisodeLog>,
    clock: Res<EpisodeClock>,
    state: Res<GridState>,
) {
    for event in completed.read() {
        log.record(event);
    }

    if clock.finished() && !log.completed {
        log.completed = true;
        info!(
            "Episode finished after {} steps: total reward {:.2}, {} cells burning",
            clock.step,
            state.reward(),
            state.burning_count()
        );
    }
}
