//! # Control sanitisation module
//!
//! Removes two physically inconsistent patterns from the raw control demand
//! before it is issued to the vehicle:
//!
//!  1. A brake demand below [`BRAKE_NOISE_THRESHOLD`] is noise and is zeroed.
//!  2. If the throttle demand exceeds the (possibly already zeroed) brake
//!     demand the brake is zeroed, so throttle and brake are never applied
//!     together.
//!
//! The rules are applied in that order. Steer is passed through unchanged.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use serde::Serialize;

// Internal
use route_if::ControlTriple;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Brake demands below this value are treated as noise.
pub const BRAKE_NOISE_THRESHOLD: f64 = 0.05;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Flags indicating which rule modified the brake demand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    /// The brake demand was below the noise threshold
    pub brake_noise_zeroed: bool,

    /// The brake demand was overridden by a larger throttle demand
    pub brake_overridden: bool,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Sanitise a raw control demand.
pub fn sanitise(raw: ControlTriple) -> (ControlTriple, StatusReport) {
    let mut report = StatusReport::default();
    let mut ctrl = raw;

    if ctrl.brake < BRAKE_NOISE_THRESHOLD {
        // Only flag if it actually changed something
        report.brake_noise_zeroed = ctrl.brake != 0.0;
        ctrl.brake = 0.0;
    }

    if ctrl.throttle > ctrl.brake {
        report.brake_overridden = ctrl.brake != 0.0;
        ctrl.brake = 0.0;
    }

    trace!("Sanitised control {:?} -> {:?}", raw, ctrl);

    (ctrl, report)
}

/// Sanitise a raw `(steer, throttle, brake)` demand.
pub fn sanitise_triple(steer: f64, throttle: f64, brake: f64) -> (f64, f64, f64) {
    sanitise(ControlTriple::new(steer, throttle, brake)).0.into_tuple()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_small_brake_zeroed() {
        assert_eq!(sanitise_triple(0.1, 0.02, 0.04), (0.1, 0.02, 0.0));

        let (_, report) = sanitise(ControlTriple::new(0.1, 0.02, 0.04));
        assert!(report.brake_noise_zeroed);
        assert!(!report.brake_overridden);
    }

    #[test]
    fn test_throttle_overrides_brake() {
        assert_eq!(sanitise_triple(0.1, 0.5, 0.3), (0.1, 0.5, 0.0));

        let (_, report) = sanitise(ControlTriple::new(0.1, 0.5, 0.3));
        assert!(!report.brake_noise_zeroed);
        assert!(report.brake_overridden);
    }

    #[test]
    fn test_brake_kept_when_dominant() {
        assert_eq!(sanitise_triple(-0.3, 0.2, 0.6), (-0.3, 0.2, 0.6));
        assert_eq!(sanitise_triple(0.0, 0.3, 0.3), (0.0, 0.3, 0.3));
        assert_eq!(sanitise_triple(0.0, 0.0, 0.05), (0.0, 0.0, 0.05));
    }

    #[test]
    fn test_clean_input_unchanged() {
        for steer in [-1.0, -0.25, 0.0, 0.7, 1.0].iter() {
            for throttle in [0.0, 0.01, 0.5, 1.0].iter() {
                assert_eq!(
                    sanitise_triple(*steer, *throttle, 0.0),
                    (*steer, *throttle, 0.0)
                );

                let (_, report) = sanitise(ControlTriple::new(*steer, *throttle, 0.0));
                assert_eq!(report, StatusReport::default());
            }
        }
    }
}
