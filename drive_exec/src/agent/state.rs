//! Implementations for the DriveAgent state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{info, trace, warn};
use serde::Serialize;
use std::path::PathBuf;

// Internal
use super::{AgentError, Params, DEFAULT_PARAMS_FILE};
use crate::{ctrl_san, intent_res, plan_exp::PlanExpander};
use route_if::{ControlTriple, IntentCode, PositionFix, TopologicalPlan};
use util::{
    archive::{ArchiveError, Archived, Archiver},
    module::State,
    params,
    session::{self, Session},
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Driving agent module state
#[derive(Default)]
pub struct DriveAgent {
    params: Params,

    expander: PlanExpander,

    /// The expanded plan for the current episode
    global_plan: Option<TopologicalPlan>,

    /// Number of ticks processed in the current episode
    num_ticks: u64,

    last_tick: Option<TickRecord>,
    arch_ticks: Archiver,
}

/// Input data to the agent for one tick.
#[derive(Debug, Default, Clone, Copy)]
pub struct InputData {
    /// The current position fix from the localisation feed.
    pub position: PositionFix,

    /// The raw control demand produced by the inference stage.
    pub raw_control: ControlTriple,
}

/// Output of the agent for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutputData {
    /// The intent code to feed to the inference stage.
    pub intent: IntentCode,

    /// The sanitised control demand to issue to the vehicle.
    pub control: ControlTriple,
}

/// Status report for one tick of agent processing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StatusReport {
    /// Episode tick number this report belongs to, starting at zero
    pub tick: u64,

    /// Index of the plan waypoint closest to the position fix
    pub closest_index: usize,

    /// Distance from the position fix to the closest waypoint
    pub closest_distance_m: f64,

    /// The brake demand was below the noise threshold
    pub brake_noise_zeroed: bool,

    /// The brake demand was overridden by the throttle demand
    pub brake_overridden: bool,
}

/// Flat record of a single tick, written to the tick archive.
#[derive(Debug, Clone, Copy, Serialize)]
struct TickRecord {
    time_s: f64,
    tick: u64,
    lat: f64,
    lon: f64,
    closest_index: usize,
    closest_distance_m: f64,
    intent_code: f64,
    raw_steer: f64,
    raw_throttle: f64,
    raw_brake: f64,
    steer: f64,
    throttle: f64,
    brake: f64,
    brake_noise_zeroed: bool,
    brake_overridden: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for DriveAgent {
    type InitData = Option<PathBuf>;
    type InitError = AgentError;

    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = AgentError;

    /// Initialise the agent.
    ///
    /// Expected init data is the path to the parameter file, or `None` to
    /// use the default file in the params directory.
    fn init(&mut self, init_data: Self::InitData, session: &Session)
        -> Result<(), Self::InitError>
    {
        // Load the parameters
        let params: Params = match init_data {
            Some(path) => params::load_from_path(path),
            None => params::load(DEFAULT_PARAMS_FILE),
        }
        .map_err(AgentError::ParamLoadError)?;

        info!(
            "Agent margins: front = {}, back = {}",
            params.plan_exp.expand_command_front,
            params.plan_exp.expand_command_back
        );

        *self = Self::new(params);

        // Initialise the archivers
        self.arch_ticks = Archiver::from_path(session, "agent/ticks.csv")
            .map_err(AgentError::ArchiveInitError)?;

        Ok(())
    }

    /// Process a single tick.
    ///
    /// Fails if no plan has been set for this episode.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        let plan = match self.global_plan {
            Some(ref p) => p,
            None => return Err(AgentError::NoPlan),
        };

        // ---- INTENT RESOLUTION ----

        let closest = intent_res::find_closest(plan, &input_data.position)?;
        let intent = IntentCode::from(closest.command);

        // ---- CONTROL SANITISATION ----

        let (control, san_report) = ctrl_san::sanitise(input_data.raw_control);

        let output = OutputData { intent, control };
        let report = StatusReport {
            tick: self.num_ticks,
            closest_index: closest.index,
            closest_distance_m: closest.distance_m,
            brake_noise_zeroed: san_report.brake_noise_zeroed,
            brake_overridden: san_report.brake_overridden,
        };

        trace!(
            "Agent tick {}: intent {:?} ({}), control {:?}",
            report.tick,
            intent,
            intent.value(),
            control
        );

        self.last_tick = Some(TickRecord::new(input_data, &output, &report));
        self.num_ticks += 1;

        Ok((output, report))
    }
}

impl Archived for DriveAgent {
    fn write(&mut self) -> Result<(), ArchiveError> {
        match self.last_tick.take() {
            Some(t) => self.arch_ticks.serialise(t),
            None => Ok(()),
        }
    }
}

impl DriveAgent {
    /// Create a new agent from parameters, without any archiving.
    pub fn new(params: Params) -> Self {
        Self {
            expander: PlanExpander::new(params.plan_exp),
            params,
            ..Default::default()
        }
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Set the plan for a new episode.
    ///
    /// The plan is expanded before being stored. Setting a plan while one is
    /// already set replaces it and restarts the tick count.
    pub fn set_global_plan(&mut self, plan: &TopologicalPlan) -> Result<(), AgentError> {
        if self.global_plan.is_some() {
            warn!("Replacing the current plan, a new episode begins");
        }

        let expanded = self.expander.expand(plan)?;

        if expanded.is_empty() {
            warn!("The plan is empty, intents cannot be resolved against it");
        }

        self.global_plan = Some(expanded);
        self.num_ticks = 0;
        self.last_tick = None;

        Ok(())
    }

    /// The expanded plan for the current episode, if one has been set.
    pub fn global_plan(&self) -> Option<&TopologicalPlan> {
        self.global_plan.as_ref()
    }

    /// Number of ticks processed since the plan was set.
    pub fn num_ticks(&self) -> u64 {
        self.num_ticks
    }
}

impl TickRecord {
    fn new(input: &InputData, output: &OutputData, report: &StatusReport) -> Self {
        Self {
            time_s: session::get_elapsed_seconds(),
            tick: report.tick,
            lat: input.position.lat,
            lon: input.position.lon,
            closest_index: report.closest_index,
            closest_distance_m: report.closest_distance_m,
            intent_code: output.intent.value(),
            raw_steer: input.raw_control.steer,
            raw_throttle: input.raw_control.throttle,
            raw_brake: input.raw_control.brake,
            steer: output.control.steer,
            throttle: output.control.throttle,
            brake: output.control.brake,
            brake_noise_zeroed: report.brake_noise_zeroed,
            brake_overridden: report.brake_overridden,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::plan_exp;
    use route_if::{ManeuverCommand, ManeuverCommand::*, PlanEntry, Waypoint};

    fn agent(front: usize, back: usize) -> DriveAgent {
        DriveAgent::new(Params {
            plan_exp: plan_exp::Params {
                expand_command_front: front,
                expand_command_back: back,
            },
        })
    }

    /// A straight route along the lat axis with one waypoint per meter.
    fn straight_plan(cmds: &[ManeuverCommand]) -> TopologicalPlan {
        TopologicalPlan::from_entries(
            cmds.iter()
                .enumerate()
                .map(|(i, c)| PlanEntry::new(Waypoint::new(i as f64, 0.0), *c))
                .collect(),
        )
    }

    fn input(lat: f64, steer: f64, throttle: f64, brake: f64) -> InputData {
        InputData {
            position: PositionFix::new(lat, 0.1),
            raw_control: ControlTriple::new(steer, throttle, brake),
        }
    }

    #[test]
    fn test_proc_without_plan() {
        let mut a = agent(1, 1);
        assert!(matches!(
            a.proc(&input(0.0, 0.0, 0.0, 0.0)),
            Err(AgentError::NoPlan)
        ));
        assert_eq!(a.num_ticks(), 0);
    }

    #[test]
    fn test_proc_with_empty_plan() {
        let mut a = agent(1, 1);
        a.set_global_plan(&TopologicalPlan::new_empty()).unwrap();
        assert!(matches!(
            a.proc(&input(0.0, 0.0, 0.0, 0.0)),
            Err(AgentError::IntentRes(intent_res::IntentResError::EmptyPlan))
        ));
    }

    #[test]
    fn test_episode() {
        let mut cmds = vec![LaneFollow; 10];
        cmds[5] = Right;
        let plan = straight_plan(&cmds);

        let mut a = agent(2, 1);
        a.set_global_plan(&plan).unwrap();

        // Stored plan is the expanded one: 3, 4 from the front, 6 from the back
        let stored = a.global_plan().unwrap();
        assert_eq!(stored.len(), plan.len());
        assert_eq!(stored.commands()[2], LaneFollow);
        assert_eq!(stored.commands()[3], Right);
        assert_eq!(stored.commands()[6], Right);
        assert_eq!(stored.commands()[7], LaneFollow);

        // Before the expanded window
        let (out, report) = a.proc(&input(1.8, 0.0, 0.6, 0.02)).unwrap();
        assert_eq!(out.intent, IntentCode::LaneFollow);
        assert_eq!(out.control, ControlTriple::new(0.0, 0.6, 0.0));
        assert_eq!(report.tick, 0);
        assert_eq!(report.closest_index, 2);
        assert!(report.brake_noise_zeroed);

        // Inside the expanded front margin
        let (out, report) = a.proc(&input(3.2, 0.4, 0.5, 0.3)).unwrap();
        assert_eq!(out.intent.value(), 4.0);
        assert_eq!(out.control, ControlTriple::new(0.4, 0.5, 0.0));
        assert_eq!(report.tick, 1);
        assert_eq!(report.closest_index, 3);
        assert!(report.brake_overridden);

        // Inside the expanded back margin
        let (out, _) = a.proc(&input(6.1, 0.2, 0.1, 0.8)).unwrap();
        assert_eq!(out.intent, IntentCode::Right);
        assert_eq!(out.control, ControlTriple::new(0.2, 0.1, 0.8));

        // Past it
        let (out, _) = a.proc(&input(7.4, 0.0, 0.3, 0.0)).unwrap();
        assert_eq!(out.intent, IntentCode::LaneFollow);

        assert_eq!(a.num_ticks(), 4);
    }

    #[test]
    fn test_new_plan_restarts_episode() {
        let mut a = agent(0, 0);
        a.set_global_plan(&straight_plan(&[LaneFollow, Left, LaneFollow]))
            .unwrap();
        a.proc(&input(1.0, 0.0, 0.0, 0.0)).unwrap();
        assert_eq!(a.num_ticks(), 1);

        a.set_global_plan(&straight_plan(&[Straight, LaneFollow]))
            .unwrap();
        assert_eq!(a.num_ticks(), 0);

        let (out, _) = a.proc(&input(0.0, 0.0, 0.0, 0.0)).unwrap();
        assert_eq!(out.intent, IntentCode::Straight);
    }

    #[test]
    fn test_report_tick_matches_archive_record() {
        let mut a = agent(0, 0);
        a.set_global_plan(&straight_plan(&[LaneFollow, Left])).unwrap();

        for expected in 0..3 {
            let (_, report) = a.proc(&input(1.0, 0.0, 0.0, 0.0)).unwrap();
            assert_eq!(report.tick, expected);
            assert_eq!(a.last_tick.map(|t| t.tick), Some(expected));
            assert_eq!(a.num_ticks(), expected + 1);
        }
    }

    #[test]
    fn test_write_without_archiver() {
        let mut a = agent(0, 0);

        // Nothing to write yet
        assert!(a.write().is_ok());

        a.set_global_plan(&straight_plan(&[LaneFollow])).unwrap();
        a.proc(&input(0.0, 0.0, 0.0, 0.0)).unwrap();
        assert!(matches!(a.write(), Err(ArchiveError::NotInitialised)));
    }
}
