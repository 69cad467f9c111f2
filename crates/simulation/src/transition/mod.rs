mod engine;
mod helpers;

pub use engine::StepReport;
pub use helpers::{ignition_threshold, neighbors_on_fire};
pub(crate) use helpers::WindWalk;
