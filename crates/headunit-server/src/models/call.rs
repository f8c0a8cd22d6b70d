//! Call, contact and history DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use headunit::{CallRecord, Contact, OngoingCall};

/// Phone book entry
#[derive(Debug, Serialize, ToSchema)]
pub struct ContactResponse {
    pub id: String,
    pub name: String,
    pub phone_number: String,
}

/// Call history entry
#[derive(Debug, Serialize, ToSchema)]
pub struct CallRecordResponse {
    pub id: Uuid,
    pub number: String,
    pub name: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_seconds: u64,
    /// outgoing, incoming or missed
    pub outcome: String,
}

/// The call in progress
#[derive(Debug, Serialize, ToSchema)]
pub struct CurrentCallResponse {
    pub id: Uuid,
    /// incoming, outgoing, active or held
    pub status: String,
    /// outgoing or incoming
    pub direction: String,
    pub number: String,
    pub name: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Make call request; `contact_id` takes precedence over `number`
#[derive(Debug, Deserialize, ToSchema)]
pub struct MakeCallRequest {
    pub number: Option<String>,
    pub contact_id: Option<String>,
}

impl From<Contact> for ContactResponse {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            name: contact.name,
            phone_number: contact.phone_number,
        }
    }
}

impl From<CallRecord> for CallRecordResponse {
    fn from(record: CallRecord) -> Self {
        Self {
            id: record.id,
            number: record.number,
            name: record.name,
            start_time: record.start_time,
            end_time: record.end_time,
            duration_seconds: record.duration_seconds,
            outcome: record.outcome.to_string(),
        }
    }
}

impl From<OngoingCall> for CurrentCallResponse {
    fn from(call: OngoingCall) -> Self {
        Self {
            id: call.id(),
            status: call.status().to_string(),
            direction: call.direction().to_string(),
            number: call.number().to_string(),
            name: call.name().map(str::to_string),
            start_time: call.start_time(),
        }
    }
}
