//! Directive run detection

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, trace};
use serde::Serialize;

// Internal
use super::PlanExpError;
use route_if::{ManeuverCommand, TopologicalPlan};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A closed directive run, covering the plan indices `[start, end)`.
///
/// `end` is the index of the `LaneFollow` entry which closed the run.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct DirectiveRun {
    pub start: usize,
    pub end: usize,
    pub command: ManeuverCommand,
}

/// Tracks whether a scan over a plan is currently inside a directive run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunTracker {
    state: RunState,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The two states of the run tracker.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RunState {
    /// Not inside a directive run.
    Outside,

    /// Inside a directive run which began at `start`. The run's command is
    /// the command of its first entry.
    Inside {
        start: usize,
        command: ManeuverCommand,
    },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for RunState {
    fn default() -> Self {
        RunState::Outside
    }
}

impl RunTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_inside(&self) -> bool {
        matches!(self.state, RunState::Inside { .. })
    }

    /// Step the tracker over the plan entry at `index`.
    ///
    /// Transitions:
    ///  - `Outside` + directive command: open a run starting at `index`.
    ///  - `Inside` + `LaneFollow`: close the run, returning it.
    ///  - Anything else leaves the state unchanged. In particular a change
    ///    between two directive commands does not start a new run.
    pub fn step(
        &mut self,
        index: usize,
        command: ManeuverCommand,
    ) -> Result<Option<DirectiveRun>, PlanExpError> {
        match (self.state, command.is_directive()) {
            (RunState::Outside, true) => {
                trace!("Directive run of {:?} starts at {}", command, index);
                self.state = RunState::Inside {
                    start: index,
                    command,
                };
                Ok(None)
            }
            (RunState::Inside { .. }, false) => self.close(index).map(Some),
            _ => Ok(None),
        }
    }

    /// Close the currently open run at `end`.
    ///
    /// Closing a run while outside of one is an inconsistency in the scan and
    /// results in a `MalformedPlan` error.
    pub fn close(&mut self, end: usize) -> Result<DirectiveRun, PlanExpError> {
        match self.state {
            RunState::Inside { start, command } => {
                trace!("Directive run of {:?} ends at {}", command, end);
                self.state = RunState::Outside;
                Ok(DirectiveRun {
                    start,
                    end,
                    command,
                })
            }
            RunState::Outside => Err(PlanExpError::MalformedPlan { end }),
        }
    }

    /// Finish tracking, returning the start and command of a run which was
    /// never closed, if there is one.
    pub fn finish(self) -> Option<(usize, ManeuverCommand)> {
        match self.state {
            RunState::Inside { start, command } => Some((start, command)),
            RunState::Outside => None,
        }
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Find all closed directive runs in the plan, in plan order.
///
/// A run which is still open at the end of the plan is not included.
pub fn find_directive_runs(plan: &TopologicalPlan) -> Result<Vec<DirectiveRun>, PlanExpError> {
    let mut tracker = RunTracker::new();
    let mut runs = Vec::new();

    for (index, entry) in plan.iter().enumerate() {
        if let Some(run) = tracker.step(index, entry.command)? {
            runs.push(run);
        }
    }

    if let Some((start, command)) = tracker.finish() {
        debug!(
            "Directive run of {:?} starting at {} is not closed before the end of the plan and \
             will not be expanded",
            command, start
        );
    }

    debug!("Directive runs: {:?}", runs);

    Ok(runs)
}
