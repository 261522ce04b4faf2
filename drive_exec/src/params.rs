//! # Driving Executable Parameters
//!
//! This module provide parameters for the driving executable.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveExecParams {
    /// Minimum log level, e.g. `"info"` or `"trace"`
    pub log_level: String,

    /// Per-target log levels, e.g. `{ "drive_lib::intent_res" = "info" }`
    #[serde(default)]
    pub target_log_levels: HashMap<String, String>,

    /// Target period of one tick when replaying. Zero disables pacing.
    ///
    /// Units: seconds
    pub cycle_period_s: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Errors in the exec parameter values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExecParamsError {
    #[error("The cycle period must be finite and non-negative, got {0}")]
    InvalidCyclePeriod(f64),
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl DriveExecParams {
    /// The replay cycle period as a duration.
    pub fn cycle_period(&self) -> Result<Duration, ExecParamsError> {
        if !self.cycle_period_s.is_finite() || self.cycle_period_s < 0.0 {
            return Err(ExecParamsError::InvalidCyclePeriod(self.cycle_period_s));
        }

        Ok(Duration::from_secs_f64(self.cycle_period_s))
    }
}
