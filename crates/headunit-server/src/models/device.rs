//! Device and connection DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use headunit::Device;

/// Paired device
#[derive(Debug, Serialize, ToSchema)]
pub struct DeviceResponse {
    pub id: String,
    pub display_name: String,
    /// phone, audio_accessory or other
    pub kind: String,
    pub battery_percent: Option<u8>,
    pub signal_bars: Option<u8>,
    pub last_connected: Option<DateTime<Utc>>,
}

/// Connect request; omit `device_id` to reconnect the most recent device
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ConnectRequest {
    pub device_id: Option<String>,
}

impl From<Device> for DeviceResponse {
    fn from(device: Device) -> Self {
        Self {
            id: device.id,
            display_name: device.display_name,
            kind: device.kind.to_string(),
            battery_percent: device.battery_percent,
            signal_bars: device.signal_bars,
            last_connected: device.last_connected,
        }
    }
}
