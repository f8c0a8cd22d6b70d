//! CallOutcome / CallDirection - How a call started and how it ended

use serde::{Deserialize, Serialize};

/// Outcome recorded in call history
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CallOutcome {
    Outgoing,
    Incoming,
    Missed,
}

/// Which side initiated the call
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CallDirection {
    Outgoing,
    Incoming,
}

impl std::fmt::Display for CallOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallOutcome::Outgoing => write!(f, "outgoing"),
            CallOutcome::Incoming => write!(f, "incoming"),
            CallOutcome::Missed => write!(f, "missed"),
        }
    }
}

impl std::str::FromStr for CallOutcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "outgoing" => Ok(CallOutcome::Outgoing),
            "incoming" => Ok(CallOutcome::Incoming),
            "missed" => Ok(CallOutcome::Missed),
            _ => Err(format!("Unknown call outcome: {}", s)),
        }
    }
}

impl std::fmt::Display for CallDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallDirection::Outgoing => write!(f, "outgoing"),
            CallDirection::Incoming => write!(f, "incoming"),
        }
    }
}

impl From<CallDirection> for CallOutcome {
    fn from(direction: CallDirection) -> Self {
        match direction {
            CallDirection::Outgoing => CallOutcome::Outgoing,
            CallDirection::Incoming => CallOutcome::Incoming,
        }
    }
}
