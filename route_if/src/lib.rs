//! # Route interface crate.
//!
//! Provides the data exchanged between the driving agent and its collaborators: the route-plan
//! provider, the localisation feed and the control output consumer.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Topological plan definitions (waypoints and manouvre commands)
pub mod plan;

/// Intent codes passed to the downstream inference stage
pub mod intent;

/// Vehicle control signal
pub mod ctrl;

// ------------------------------------------------------------------------------------------------
// REEXPORTS
// ------------------------------------------------------------------------------------------------

pub use ctrl::ControlTriple;
pub use intent::IntentCode;
pub use plan::*;
