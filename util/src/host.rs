//! Host platform utility functions

use std::env;
use std::path::PathBuf;

/// The environment variable pointing at the root of the software tree.
pub const SW_ROOT_ENV_VAR: &str = "DRIVE_AGENT_SW_ROOT";

/// Get the root directory of the software, as given by the `DRIVE_AGENT_SW_ROOT` environment
/// variable.
pub fn get_sw_root() -> Result<PathBuf, env::VarError> {
    env::var(SW_ROOT_ENV_VAR).map(PathBuf::from)
}
