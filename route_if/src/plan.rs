//! # Topological plan
//!
//! A topological plan is the coarse description of a route given to the agent by the route
//! planner. It is an ordered sequence of waypoints, each annotated with the manouvre that should
//! be performed around it. The order of the entries is the order in which they are traversed.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::Path;
use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// A point on the route produced by the route planner.
///
/// The coordinates are treated as planar, so any coordinate pair can be used as long as the
/// localisation feed uses the same space.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Waypoint {
    pub lat: f64,
    pub lon: f64,
}

/// A single position reading from the localisation feed.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PositionFix {
    pub lat: f64,
    pub lon: f64,
}

/// A waypoint together with the manouvre command associated with it.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub waypoint: Waypoint,
    pub command: ManeuverCommand,
}

/// An ordered sequence of plan entries.
///
/// The insertion order is the traversal order along the route, and no stage of processing is
/// allowed to reorder it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopologicalPlan {
    entries: Vec<PlanEntry>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Manouvre commands that the route planner can attach to a waypoint.
///
/// `LaneFollow` is the background value, every other command is a directive that requires the
/// agent's attention.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManeuverCommand {
    #[serde(rename = "VOID")]
    Void,

    #[serde(rename = "LEFT")]
    Left,

    #[serde(rename = "RIGHT")]
    Right,

    #[serde(rename = "STRAIGHT")]
    Straight,

    #[serde(rename = "LANEFOLLOW")]
    LaneFollow,

    #[serde(rename = "CHANGELANELEFT")]
    ChangeLaneLeft,

    #[serde(rename = "CHANGELANERIGHT")]
    ChangeLaneRight,

    /// Any tag the planner emits that isn't recognised.
    #[serde(other)]
    Other,
}

/// Errors that can occur while loading a plan.
#[derive(Debug, Error)]
pub enum PlanLoadError {
    #[error("Cannot load the plan file: {0}")]
    FileLoadError(std::io::Error),

    #[error("Cannot read the plan: {0}")]
    DeserialiseError(serde_json::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl Waypoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// The waypoint as a planar point.
    pub fn position(&self) -> [f64; 2] {
        [self.lat, self.lon]
    }
}

impl PositionFix {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// The fix as a planar point.
    pub fn position(&self) -> [f64; 2] {
        [self.lat, self.lon]
    }
}

impl PlanEntry {
    pub fn new(waypoint: Waypoint, command: ManeuverCommand) -> Self {
        Self { waypoint, command }
    }
}

impl ManeuverCommand {
    /// Returns true if the command is anything other than the default `LaneFollow`.
    pub fn is_directive(&self) -> bool {
        *self != ManeuverCommand::LaneFollow
    }
}

impl Default for ManeuverCommand {
    fn default() -> Self {
        ManeuverCommand::LaneFollow
    }
}

impl TopologicalPlan {
    /// Create a new empty plan
    pub fn new_empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a plan from entries which are already in traversal order.
    pub fn from_entries(entries: Vec<PlanEntry>) -> Self {
        Self { entries }
    }

    /// Parse a plan from a JSON string.
    ///
    /// The JSON shall be an array of `{"waypoint": {"lat": _, "lon": _}, "command": "LEFT"}`
    /// objects.
    pub fn from_json_str(json_str: &str) -> Result<Self, PlanLoadError> {
        match serde_json::from_str(json_str) {
            Ok(p) => Ok(p),
            Err(e) => Err(PlanLoadError::DeserialiseError(e)),
        }
    }

    /// Load a plan from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, PlanLoadError> {
        let json_str = read_to_string(path.as_ref()).map_err(PlanLoadError::FileLoadError)?;

        let plan = Self::from_json_str(&json_str)?;

        debug!(
            "Loaded plan with {} entries from {:?}",
            plan.len(),
            path.as_ref()
        );

        Ok(plan)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlanEntry> {
        self.entries.iter()
    }

    /// The commands of the plan, in traversal order.
    pub fn commands(&self) -> Vec<ManeuverCommand> {
        self.entries.iter().map(|e| e.command).collect()
    }

    /// Replace the command at the given index, keeping its waypoint.
    ///
    /// Out of range indices are ignored.
    pub fn set_command(&mut self, index: usize, command: ManeuverCommand) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.command = command;
        }
    }
}

impl From<Vec<PlanEntry>> for TopologicalPlan {
    fn from(entries: Vec<PlanEntry>) -> Self {
        Self::from_entries(entries)
    }
}

impl<'a> IntoIterator for &'a TopologicalPlan {
    type Item = &'a PlanEntry;
    type IntoIter = std::slice::Iter<'a, PlanEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_plan_from_json() {
        let json = r#"[
            {"waypoint": {"lat": 0.0, "lon": 0.0}, "command": "LANEFOLLOW"},
            {"waypoint": {"lat": 1.0, "lon": 0.0}, "command": "LEFT"},
            {"waypoint": {"lat": 2.0, "lon": 0.5}, "command": "CHANGELANERIGHT"},
            {"waypoint": {"lat": 3.0, "lon": 1.0}, "command": "ROUNDABOUT"}
        ]"#;

        let plan = TopologicalPlan::from_json_str(json).unwrap();

        assert_eq!(plan.len(), 4);
        assert_eq!(
            plan.commands(),
            vec![
                ManeuverCommand::LaneFollow,
                ManeuverCommand::Left,
                ManeuverCommand::ChangeLaneRight,
                ManeuverCommand::Other
            ]
        );
        assert_eq!(plan.entries()[2].waypoint, Waypoint::new(2.0, 0.5));
    }

    #[test]
    fn test_plan_from_bad_json() {
        let res = TopologicalPlan::from_json_str("{\"waypoint\": 1}");
        assert!(matches!(res, Err(PlanLoadError::DeserialiseError(_))));
    }

    #[test]
    fn test_is_directive() {
        assert!(!ManeuverCommand::LaneFollow.is_directive());
        assert!(ManeuverCommand::Left.is_directive());
        assert!(ManeuverCommand::Void.is_directive());
        assert!(ManeuverCommand::Other.is_directive());
        assert_eq!(ManeuverCommand::default(), ManeuverCommand::LaneFollow);
    }

    #[test]
    fn test_set_command() {
        let mut plan = TopologicalPlan::from_entries(vec![
            PlanEntry::new(Waypoint::new(0.0, 0.0), ManeuverCommand::LaneFollow);
            3
        ]);

        plan.set_command(1, ManeuverCommand::Right);
        plan.set_command(7, ManeuverCommand::Right);

        assert_eq!(
            plan.commands(),
            vec![
                ManeuverCommand::LaneFollow,
                ManeuverCommand::Right,
                ManeuverCommand::LaneFollow
            ]
        );
    }
}
