//! Driving agent executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise the session, logging and the agent
//!     - Load the route plan and set it on the agent (expanding it)
//!     - Main loop, once per recorded tick:
//!         - Intent resolution from the position fix
//!         - Control sanitisation of the raw control demand
//!         - Archiving
//!
//! The position fixes and raw control demands are replayed from a CSV file,
//! standing in for the localisation feed and the inference stage.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::{debug, error, info, warn};
use std::collections::HashMap;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use structopt::StructOpt;

// Internal
use drive_lib::{
    agent::{DriveAgent, InputData},
    params::DriveExecParams,
    tick_src,
};
use route_if::TopologicalPlan;
use util::{
    archive::Archived,
    logger::{logger_init, parse_level, LevelFilter},
    module::State,
    session::Session,
};

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

/// Command line arguments
#[derive(Debug, StructOpt)]
#[structopt(name = "drive_exec", about = "Replay a route through the driving agent")]
struct Opts {
    /// Path to the route plan (JSON)
    #[structopt(long, parse(from_os_str))]
    plan: PathBuf,

    /// Path to the recorded ticks (CSV)
    #[structopt(long, parse(from_os_str))]
    ticks: PathBuf,

    /// Path to the agent parameter file, defaults to `params/drive_agent.toml`
    #[structopt(long, parse(from_os_str))]
    params: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let opts = Opts::from_args();

    // ---- EARLY INITIALISATION ----

    let exec_params: DriveExecParams = util::params::load("drive_exec.toml")
        .wrap_err("Could not load exec params")?;

    let cycle_period = exec_params
        .cycle_period()
        .wrap_err("Invalid cycle period in exec params")?;

    // Initialise session
    let session = Session::new("drive_exec", "sessions")
        .wrap_err("Failed to create the session")?;

    // From here on the session must be exited so queued saves are flushed
    let result = run(&opts, &exec_params, cycle_period, &session);

    session.exit();

    result
}

/// Initialise logging and the agent, then replay every tick.
fn run(
    opts: &Opts,
    exec_params: &DriveExecParams,
    cycle_period: Duration,
    session: &Session,
) -> Result<(), Report> {
    // Initialise logger
    let min_level = parse_level(&exec_params.log_level)
        .wrap_err("Invalid log level in exec params")?;
    let target_levels = parse_target_levels(&exec_params.target_log_levels)?;
    logger_init(min_level, &target_levels, session)
        .wrap_err("Failed to initialise logging")?;

    info!("Driving Agent Executable\n");
    info!("Session directory: {:?}\n", session.session_root);
    debug!("CLI arguments: {:?}", opts);

    // ---- MODULE INITIALISATION ----

    let mut agent = DriveAgent::default();
    agent
        .init(opts.params.clone(), session)
        .wrap_err("Failed to initialise the agent")?;

    info!("Agent initialised");

    // ---- ROUTE ASSIGNMENT ----

    let plan = TopologicalPlan::from_json_file(&opts.plan)
        .wrap_err_with(|| format!("Failed to load the plan from {:?}", opts.plan))?;

    info!("Loaded plan with {} entries", plan.len());

    agent
        .set_global_plan(&plan)
        .wrap_err("Failed to set the plan")?;

    if let Some(expanded) = agent.global_plan() {
        session.save("plan/expanded_plan.json", expanded.clone());
    }
    session.save("plan/raw_plan.json", plan);

    let ticks = tick_src::read_ticks_file(&opts.ticks)
        .wrap_err_with(|| format!("Failed to read ticks from {:?}", opts.ticks))?;

    info!("Replaying {} ticks\n", ticks.len());

    // ---- MAIN LOOP ----

    for tick in ticks {
        let cycle_start = Instant::now();

        let input = InputData::from(tick);

        let (output, report) = match agent.proc(&input) {
            Ok(o) => o,
            // Agent errors come from bad upstream data, the episode can't
            // continue
            Err(e) => {
                error!("Episode aborted at tick {}: {}", agent.num_ticks(), e);
                return Err(e).wrap_err("Error processing the agent");
            }
        };

        debug!(
            "Tick {}: closest {} ({:.3}), intent {}, control ({:.3}, {:.3}, {:.3})",
            report.tick,
            report.closest_index,
            report.closest_distance_m,
            output.intent.value(),
            output.control.steer,
            output.control.throttle,
            output.control.brake
        );

        if let Err(e) = agent.write() {
            warn!("Could not archive agent data: {}", e);
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start;
        match cycle_period.checked_sub(cycle_dur) {
            Some(d) => thread::sleep(d),
            None => {
                if !cycle_period.is_zero() {
                    warn!(
                        "Cycle overran by {:.06} s",
                        cycle_dur.as_secs_f64() - cycle_period.as_secs_f64()
                    );
                }
            }
        }
    }

    info!("Replay complete after {} ticks", agent.num_ticks());

    Ok(())
}

/// Convert the per-target level names in the exec params into level filters.
fn parse_target_levels(
    levels: &HashMap<String, String>,
) -> Result<HashMap<String, LevelFilter>, Report> {
    levels
        .iter()
        .map(|(target, level)| {
            parse_level(level)
                .map(|l| (target.clone(), l))
                .wrap_err_with(|| format!("Invalid log level for {}", target))
        })
        .collect()
}
