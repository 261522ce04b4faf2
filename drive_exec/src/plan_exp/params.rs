//! Parameters structure for plan expansion

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for plan expansion.
#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize)]
pub struct Params {
    /// Number of entries before the start of a directive run that are
    /// overwritten with the run's command.
    ///
    /// Units: ticks (plan entries)
    pub expand_command_front: usize,

    /// Number of entries from the end of a directive run (the first
    /// `LaneFollow` entry after it) that are overwritten with the run's
    /// command.
    ///
    /// Units: ticks (plan entries)
    pub expand_command_back: usize,
}
