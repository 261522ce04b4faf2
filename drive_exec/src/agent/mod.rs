//! # Driving agent module
//!
//! The driving agent owns the plan for the current episode. The plan is set
//! once per route assignment, at which point it is expanded, and is then held
//! read-only while every tick resolves an intent from the position fix and
//! sanitises the raw control demand from the inference stage.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use params::Params;
pub use state::*;

use crate::{intent_res::IntentResError, plan_exp::PlanExpError};
use util::{archive::ArchiveError, params::LoadError};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Default parameter file, relative to the params directory.
pub const DEFAULT_PARAMS_FILE: &str = "drive_agent.toml";

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during agent operation.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("Could not load parameters: {0}")]
    ParamLoadError(LoadError),

    #[error("Could not initialise the agent archives: {0}")]
    ArchiveInitError(ArchiveError),

    #[error("No plan has been set")]
    NoPlan,

    #[error("Could not expand the plan: {0}")]
    PlanExp(#[from] PlanExpError),

    #[error("Could not resolve the intent: {0}")]
    IntentRes(#[from] IntentResError),
}
