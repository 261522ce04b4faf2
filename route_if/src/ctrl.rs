//! # Control signal
//!
//! The control triple issued to the vehicle actuation interface each tick.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// A vehicle control demand.
///
/// No bounds are enforced on the values, by convention steer is in [-1, 1] and throttle and brake
/// are in [0, 1].
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ControlTriple {
    /// Steering demand, positive is to the right.
    pub steer: f64,

    /// Throttle demand.
    pub throttle: f64,

    /// Brake demand.
    pub brake: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl ControlTriple {
    pub fn new(steer: f64, throttle: f64, brake: f64) -> Self {
        Self {
            steer,
            throttle,
            brake,
        }
    }

    /// Return the control as a `(steer, throttle, brake)` tuple.
    pub fn into_tuple(self) -> (f64, f64, f64) {
        (self.steer, self.throttle, self.brake)
    }
}

impl From<(f64, f64, f64)> for ControlTriple {
    fn from(t: (f64, f64, f64)) -> Self {
        Self::new(t.0, t.1, t.2)
    }
}
