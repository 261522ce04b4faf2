//! # Plan expansion module
//!
//! The route planner only marks a directive command (a turn, a lane change)
//! on the waypoints that lie inside the intersection itself. An agent acting
//! on that plan would learn about the manouvre too late and drop it as soon as
//! the intersection geometry ends. Plan expansion lengthens every directive
//! run by writing its command onto a number of entries before the run (the
//! front margin) and after it (the back margin).
//!
//! A directive run is a maximal sequence of non-`LaneFollow` entries that is
//! closed by a `LaneFollow` entry. Runs are found with a [`RunTracker`], a two
//! state machine stepped over the plan once. A run which is still open when
//! the plan ends is dropped and not expanded.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod expander;
mod params;
mod run_tracker;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use expander::*;
pub use params::Params;
pub use run_tracker::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during plan expansion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanExpError {
    /// A directive run was closed without ever having been opened. This
    /// indicates that the scan over the plan is inconsistent and the plan
    /// cannot be trusted.
    #[error("Directive run closed at index {end} without a recorded start")]
    MalformedPlan { end: usize },
}
