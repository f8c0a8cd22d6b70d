//! ConnectionState - Which paired device, if any, is connected

use serde::{Deserialize, Serialize};

/// Connection state
///
/// Being connected always names the active device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected { device_id: String },
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected { .. })
    }

    /// Id of the active device
    pub fn device_id(&self) -> Option<&str> {
        match self {
            ConnectionState::Connected { device_id } => Some(device_id),
            ConnectionState::Disconnected => None,
        }
    }
}
