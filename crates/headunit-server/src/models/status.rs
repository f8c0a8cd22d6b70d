//! Status DTO

use serde::Serialize;
use utoipa::ToSchema;

use super::CurrentCallResponse;
use headunit::StatusSnapshot;

/// Connection and call status for UI rendering
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    pub connected: bool,
    pub device_name: Option<String>,
    pub device_kind: Option<String>,
    pub battery_percent: Option<u8>,
    pub signal_bars: Option<u8>,
    /// idle, incoming, outgoing, active or held
    pub call_status: String,
    pub current_call: Option<CurrentCallResponse>,
}

impl From<StatusSnapshot> for StatusResponse {
    fn from(status: StatusSnapshot) -> Self {
        Self {
            connected: status.connected,
            device_name: status.device_name,
            device_kind: status.device_kind.map(|kind| kind.to_string()),
            battery_percent: status.battery_percent,
            signal_bars: status.signal_bars,
            call_status: status.call_status.to_string(),
            current_call: status.current_call.map(CurrentCallResponse::from),
        }
    }
}
