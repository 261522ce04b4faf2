//! # Intent codes
//!
//! The intent code is the numeric form of a manouvre command consumed by the inference stage as
//! an auxiliary input. The numbers are part of the contract with that stage and must not change.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Serialize, Serializer};

use crate::plan::ManeuverCommand;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// The manouvre intent currently communicated to the control stage.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IntentCode {
    /// Follow the lane, also used for any command without a dedicated code.
    LaneFollow,
    Left,
    Right,
    Straight,
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl IntentCode {
    /// The numeric value of the code.
    pub fn value(&self) -> f64 {
        match self {
            IntentCode::LaneFollow => 2.0,
            IntentCode::Left => 3.0,
            IntentCode::Right => 4.0,
            IntentCode::Straight => 5.0,
        }
    }
}

impl From<ManeuverCommand> for IntentCode {
    fn from(cmd: ManeuverCommand) -> Self {
        match cmd {
            ManeuverCommand::Left => IntentCode::Left,
            ManeuverCommand::Right => IntentCode::Right,
            ManeuverCommand::Straight => IntentCode::Straight,
            _ => IntentCode::LaneFollow,
        }
    }
}

impl From<IntentCode> for f64 {
    fn from(code: IntentCode) -> Self {
        code.value()
    }
}

impl Serialize for IntentCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_intent_code_table() {
        assert_eq!(IntentCode::from(ManeuverCommand::Left).value(), 3.0);
        assert_eq!(IntentCode::from(ManeuverCommand::Right).value(), 4.0);
        assert_eq!(IntentCode::from(ManeuverCommand::Straight).value(), 5.0);

        for cmd in [
            ManeuverCommand::LaneFollow,
            ManeuverCommand::Void,
            ManeuverCommand::ChangeLaneLeft,
            ManeuverCommand::ChangeLaneRight,
            ManeuverCommand::Other,
        ]
        .iter()
        {
            assert_eq!(IntentCode::from(*cmd).value(), 2.0);
        }
    }

    #[test]
    fn test_intent_code_serialises_as_number() {
        assert_eq!(serde_json::to_string(&IntentCode::Right).unwrap(), "4.0");
    }
}
