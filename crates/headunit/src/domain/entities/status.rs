//! StatusSnapshot - Read-only view of connection and call state

use serde::Serialize;

use super::{CallSession, Device, OngoingCall};
use crate::domain::value_objects::{CallStatus, DeviceKind};

/// Composite status rendered by UI layers
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub connected: bool,
    pub device_name: Option<String>,
    pub device_kind: Option<DeviceKind>,
    pub battery_percent: Option<u8>,
    pub signal_bars: Option<u8>,
    pub call_status: CallStatus,
    pub current_call: Option<OngoingCall>,
}

impl StatusSnapshot {
    /// Project the active device and call session into a snapshot
    pub fn project(active_device: Option<&Device>, session: &CallSession) -> Self {
        Self {
            connected: active_device.is_some(),
            device_name: active_device.map(|d| d.display_name.clone()),
            device_kind: active_device.map(|d| d.kind),
            battery_percent: active_device.and_then(|d| d.battery_percent),
            signal_bars: active_device.and_then(|d| d.signal_bars),
            call_status: session.status(),
            current_call: session.current().cloned(),
        }
    }
}
