//! # Driving agent library.
//!
//! This library allows other crates in the workspace (and the benchmarks) to access items defined
//! inside the driving agent crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Plan expansion - lengthens directive commands so the agent gets advance notice of manouvres
pub mod plan_exp;

/// Intent resolution - maps a position fix onto the plan to get the active manouvre intent
pub mod intent_res;

/// Control sanitisation - removes physically inconsistent control demands
pub mod ctrl_san;

/// Driving agent - per-episode composition of expansion, resolution and sanitisation
pub mod agent;

/// Tick source - replays recorded position fixes and raw control outputs
pub mod tick_src;

/// Executable parameters
pub mod params;
