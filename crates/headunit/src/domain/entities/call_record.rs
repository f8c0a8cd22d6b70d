//! CallRecord - Completed or missed call
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::CallOutcome;

/// CallRecord - Immutable history entry created when a call terminates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CallRecord {
    pub id: Uuid,
    pub number: String,
    pub name: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_seconds: u64,
    pub outcome: CallOutcome,
}

impl CallRecord {
    /// Create a new call record with a generated ID
    pub fn new(
        number: String,
        name: Option<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        duration_seconds: u64,
        outcome: CallOutcome,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            number,
            name,
            start_time,
            end_time,
            duration_seconds,
            outcome,
        }
    }
}
