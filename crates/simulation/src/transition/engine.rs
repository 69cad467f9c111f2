use rand::Rng;

use crate::config::{WIND_MAX, WIND_MIN};
use crate::grid_state::GridState;

use super::helpers::{ignition_threshold, neighbors_on_fire};

/// Breakdown of one transition.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    /// Step reward: `-(property_loss + resource_cost)`, never positive.
    pub reward: f64,
    /// Property destroyed by burning cells this step.
    pub property_loss: f64,
    /// `cost_per_resource * deployed cells`.
    pub resource_cost: f64,
    /// Cells that caught fire this step.
    pub ignitions: u32,
    /// Burning cells that ran out of fuel this step.
    pub extinguished: u32,
}

impl GridState {
    /// Advance one time step and return the step reward.
    ///
    /// Mutates this instance in place. Callers that need to keep the prior
    /// state (planners sampling futures) must clone first.
    pub fn transition(&mut self, rng: &mut impl Rng) -> f64 {
        self.step(rng).reward
    }

    /// Advance one time step and return the full breakdown.
    ///
    /// Phases run in a fixed order and draw randomness in a fixed order, so
    /// a seeded RNG reproduces a run exactly:
    ///
    /// 1. burn-down: one burn fraction per burning cell, fuel clamped at 0,
    ///    cells out of fuel extinguished, property loss charged;
    /// 2. ignition: one uniform draw per cell that was not burning when the
    ///    step began, compared against [`ignition_threshold`];
    /// 3. wind: one perturbation per cell, clamped to `[WIND_MIN, WIND_MAX]`;
    /// 4. resource cost.
    pub fn step(&mut self, rng: &mut impl Rng) -> StepReport {
        let size = self.size();
        let params = self.params;
        let mut report = StepReport::default();

        // Spread and ignition eligibility read the fire layer as it stood
        // when the step began.
        let burning_at_start: Vec<bool> = self.fire.as_slice().to_vec();

        // --- Phase 1: Burn-down ---
        {
            let fuel = self.fuel.as_mut_slice();
            let fire = self.fire.as_mut_slice();
            let property = self.property_value.as_mut_slice();
            for idx in 0..burning_at_start.len() {
                if !burning_at_start[idx] {
                    continue;
                }
                let burn = rng.gen_range(0.0..=params.max_burn_fraction);
                fuel[idx] = (fuel[idx] - burn).max(0.0);
                if fuel[idx] == 0.0 {
                    fire[idx] = false;
                    report.extinguished += 1;
                }
                let loss = property[idx] * burn;
                property[idx] -= loss;
                report.property_loss += loss;
            }
        }

        // --- Phase 2: Ignition ---
        for y in 0..size {
            for x in 0..size {
                let idx = y * size + x;
                if burning_at_start[idx] {
                    continue;
                }
                let draw: f64 = rng.gen();
                let fuel = self.fuel.get(x, y);
                // No fuel, no fire.
                if fuel <= 0.0 {
                    continue;
                }
                let threshold = ignition_threshold(
                    &params,
                    neighbors_on_fire(&burning_at_start, size, x, y),
                    self.dryness.get(x, y),
                    fuel,
                    self.wind.get(x, y),
                    self.resources.get(x, y),
                );
                if draw < threshold {
                    self.fire.set(x, y, true);
                    report.ignitions += 1;
                }
            }
        }

        // --- Phase 3: Wind random walk ---
        let walk = self.wind_walk;
        for wind in self.wind.as_mut_slice() {
            *wind = (*wind + walk.sample(rng)).clamp(WIND_MIN, WIND_MAX);
        }

        // --- Phase 4: Resource cost and reward ---
        report.resource_cost = self.cost_per_resource * self.resources.count_set() as f64;
        report.reward = -report.property_loss - report.resource_cost;
        self.reward += report.reward;

        report
    }
}
