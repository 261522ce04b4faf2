//! Parameters structure for the driving agent

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

use crate::plan_exp;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the driving agent.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Params {
    /// Plan expansion margins.
    pub plan_exp: plan_exp::Params,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_params() {
        let p: Params = util::params::from_str(
            "[plan_exp]\nexpand_command_front = 4\nexpand_command_back = 2\n",
        )
        .unwrap();

        assert_eq!(p.plan_exp.expand_command_front, 4);
        assert_eq!(p.plan_exp.expand_command_back, 2);
    }
}
