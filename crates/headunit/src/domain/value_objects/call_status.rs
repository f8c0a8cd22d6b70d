//! CallStatus - Lifecycle position of the current call

use serde::{Deserialize, Serialize};

/// Call status
///
/// `Held` is part of the vocabulary exposed to UI layers but no transition
/// currently enters it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    #[default]
    Idle,
    Incoming,
    Outgoing,
    Active,
    Held,
}

impl CallStatus {
    /// Whether `end_call` may act on a call in this status
    pub fn is_endable(&self) -> bool {
        matches!(
            self,
            CallStatus::Incoming | CallStatus::Outgoing | CallStatus::Active
        )
    }
}

impl std::fmt::Display for CallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallStatus::Idle => write!(f, "idle"),
            CallStatus::Incoming => write!(f, "incoming"),
            CallStatus::Outgoing => write!(f, "outgoing"),
            CallStatus::Active => write!(f, "active"),
            CallStatus::Held => write!(f, "held"),
        }
    }
}

impl std::str::FromStr for CallStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "idle" => Ok(CallStatus::Idle),
            "incoming" => Ok(CallStatus::Incoming),
            "outgoing" => Ok(CallStatus::Outgoing),
            "active" => Ok(CallStatus::Active),
            "held" => Ok(CallStatus::Held),
            _ => Err(format!("Unknown call status: {}", s)),
        }
    }
}
