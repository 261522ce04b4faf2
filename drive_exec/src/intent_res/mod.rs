//! # Intent resolution module
//!
//! Resolves which manouvre intent should currently be communicated to the
//! control stage. The position fix is matched to the nearest waypoint in the
//! (expanded) plan, and the command at that waypoint is translated into an
//! [`IntentCode`].
//!
//! Nearest-waypoint matching is a cheap proxy for progress along the route.
//! It tolerates uneven waypoint spacing and position noise, but can pick the
//! wrong part of a route which crosses itself.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use serde::Serialize;

// Internal
use route_if::{IntentCode, ManeuverCommand, PositionFix, TopologicalPlan};
use util::maths::norm;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The plan waypoint closest to a position fix.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct ClosestWaypoint {
    /// Index of the waypoint in the plan
    pub index: usize,

    /// Planar distance between the waypoint and the fix
    ///
    /// Units: same as the plan coordinates
    pub distance_m: f64,

    /// The command associated with the waypoint
    pub command: ManeuverCommand,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during intent resolution.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntentResError {
    #[error("Cannot resolve an intent against an empty plan")]
    EmptyPlan,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Find the plan waypoint closest to the given position.
///
/// Distances are flat (euclidian) rather than geodesic. When several
/// waypoints are equally close the earliest one in the plan is returned.
pub fn find_closest(
    plan: &TopologicalPlan,
    position: &PositionFix,
) -> Result<ClosestWaypoint, IntentResError> {
    let pos = position.position();

    let mut closest: Option<ClosestWaypoint> = None;

    for (index, entry) in plan.iter().enumerate() {
        // Both points are 2D so the norm always exists
        let distance_m = match norm(&entry.waypoint.position(), &pos) {
            Some(d) => d,
            None => continue,
        };

        // A NaN minimum never blocks a later finite waypoint
        let is_closer = match closest {
            Some(ref c) => distance_m < c.distance_m || c.distance_m.is_nan(),
            None => true,
        };

        if is_closer {
            closest = Some(ClosestWaypoint {
                index,
                distance_m,
                command: entry.command,
            });
        }
    }

    let closest = closest.ok_or(IntentResError::EmptyPlan)?;

    debug!(
        "Closest waypoint {} (dist {:.3}, {:?})",
        closest.index, closest.distance_m, closest.command
    );

    Ok(closest)
}

/// Resolve the intent code for the given position.
pub fn resolve(
    plan: &TopologicalPlan,
    position: &PositionFix,
) -> Result<IntentCode, IntentResError> {
    find_closest(plan, position).map(|c| IntentCode::from(c.command))
}

#[cfg(test)]
mod test {
    use super::*;
    use route_if::{ManeuverCommand::*, PlanEntry, Waypoint};

    fn plan(entries: &[(f64, f64, ManeuverCommand)]) -> TopologicalPlan {
        TopologicalPlan::from_entries(
            entries
                .iter()
                .map(|(lat, lon, c)| PlanEntry::new(Waypoint::new(*lat, *lon), *c))
                .collect(),
        )
    }

    #[test]
    fn test_nearest_waypoint() {
        let p = plan(&[
            (0.0, 0.0, LaneFollow),
            (1.0, 0.0, Left),
            (2.0, 0.0, Straight),
        ]);

        let closest = find_closest(&p, &PositionFix::new(0.9, 0.0)).unwrap();
        assert_eq!(closest.index, 1);
        assert!((closest.distance_m - 0.1).abs() < 1e-12);

        assert_eq!(resolve(&p, &PositionFix::new(0.9, 0.0)).unwrap().value(), 3.0);
        assert_eq!(resolve(&p, &PositionFix::new(2.4, 3.0)).unwrap().value(), 5.0);
        assert_eq!(resolve(&p, &PositionFix::new(-5.0, 0.0)).unwrap().value(), 2.0);
    }

    #[test]
    fn test_tie_break_earliest() {
        let p = plan(&[(0.0, 1.0, Right), (0.0, -1.0, Left)]);

        let closest = find_closest(&p, &PositionFix::new(0.0, 0.0)).unwrap();
        assert_eq!(closest.index, 0);
        assert_eq!(resolve(&p, &PositionFix::new(0.0, 0.0)).unwrap(), IntentCode::Right);
    }

    #[test]
    fn test_far_position_still_resolves() {
        let p = plan(&[(0.0, 0.0, LaneFollow), (1.0e6, 0.0, Right)]);
        assert_eq!(
            resolve(&p, &PositionFix::new(2.0e6, 0.0)).unwrap(),
            IntentCode::Right
        );
    }

    #[test]
    fn test_nan_waypoint_never_wins() {
        let p = plan(&[(f64::NAN, 0.0, LaneFollow), (1.0, 0.0, Left)]);

        let closest = find_closest(&p, &PositionFix::new(1.0, 0.0)).unwrap();
        assert_eq!(closest.index, 1);
        assert_eq!(closest.distance_m, 0.0);
        assert_eq!(resolve(&p, &PositionFix::new(1.0, 0.0)).unwrap().value(), 3.0);

        // A NaN waypoint later in the plan doesn't displace the minimum
        let p = plan(&[(1.0, 0.0, Left), (f64::NAN, 0.0, Right), (3.0, 0.0, Straight)]);
        assert_eq!(find_closest(&p, &PositionFix::new(1.2, 0.0)).unwrap().index, 0);
    }

    #[test]
    fn test_other_commands_map_to_lane_follow() {
        let p = plan(&[(0.0, 0.0, ChangeLaneLeft), (5.0, 0.0, Void)]);
        assert_eq!(
            resolve(&p, &PositionFix::new(0.0, 0.0)).unwrap(),
            IntentCode::LaneFollow
        );
        assert_eq!(
            resolve(&p, &PositionFix::new(5.0, 0.0)).unwrap(),
            IntentCode::LaneFollow
        );
    }

    #[test]
    fn test_empty_plan() {
        assert_eq!(
            resolve(&TopologicalPlan::new_empty(), &PositionFix::new(0.0, 0.0)),
            Err(IntentResError::EmptyPlan)
        );
    }
}
