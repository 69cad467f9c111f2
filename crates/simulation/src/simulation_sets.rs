//! Ordering of the wildfire systems inside `FixedUpdate`.
//!
//! ```text
//! Step  →  Report
//! ```
//!
//! * **Step** – decide, deploy and transition. The only phase that mutates
//!   `GridState` or draws from `SimRng`.
//! * **Report** – reads what `Step` produced (step events, the episode clock)
//!   and appends to `EpisodeLog`. Never touches the grid.

use bevy::prelude::*;

/// Ordered phases for systems running in the `FixedUpdate` schedule.
///
/// Configured as a chain by `WildfirePlugin`: `Step` → `Report`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum WildfireSet {
    /// One episode step: policy decision and transition.
    Step,
    /// Bookkeeping over the step that just ran.
    Report,
}
