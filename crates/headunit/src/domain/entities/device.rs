//! Device - Paired Bluetooth device
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::DeviceKind;

/// Device - A paired Bluetooth device known to the head unit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Device {
    pub id: String,
    pub display_name: String,
    pub kind: DeviceKind,
    /// Battery charge, 0-100 (None when the device does not report it)
    pub battery_percent: Option<u8>,
    /// Cellular signal, 0-5 bars (None for devices without a radio)
    pub signal_bars: Option<u8>,
    /// Last successful connection (None = never connected)
    pub last_connected: Option<DateTime<Utc>>,
}

impl Device {
    pub const MAX_BATTERY_PERCENT: u8 = 100;
    pub const MAX_SIGNAL_BARS: u8 = 5;

    /// Create a device that has never been connected
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, kind: DeviceKind) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            kind,
            battery_percent: None,
            signal_bars: None,
            last_connected: None,
        }
    }

    /// Set battery level (clamped to 100)
    pub fn with_battery(mut self, percent: u8) -> Self {
        self.battery_percent = Some(percent.min(Self::MAX_BATTERY_PERCENT));
        self
    }

    /// Set signal strength (clamped to 5 bars)
    pub fn with_signal(mut self, bars: u8) -> Self {
        self.signal_bars = Some(bars.min(Self::MAX_SIGNAL_BARS));
        self
    }

    /// Set last connection time
    pub fn with_last_connected(mut self, at: DateTime<Utc>) -> Self {
        self.last_connected = Some(at);
        self
    }

    /// Drop battery by one percent, floored at 0
    pub fn drain_battery(&mut self) {
        if let Some(level) = self.battery_percent.as_mut() {
            *level = level.saturating_sub(1);
        }
    }

    /// Move signal by `delta` bars, clamped to [0, 5]
    pub fn shift_signal(&mut self, delta: i8) {
        if let Some(bars) = self.signal_bars.as_mut() {
            let shifted = (*bars as i16 + delta as i16).clamp(0, Self::MAX_SIGNAL_BARS as i16);
            *bars = shifted as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_clamp_ranges() {
        let device = Device::new("d1", "Phone", DeviceKind::Phone)
            .with_battery(250)
            .with_signal(9);
        assert_eq!(device.battery_percent, Some(100));
        assert_eq!(device.signal_bars, Some(5));
        assert_eq!(device.last_connected, None);
    }

    #[test]
    fn test_drain_floors_at_zero() {
        let mut device = Device::new("d1", "Phone", DeviceKind::Phone).with_battery(1);
        device.drain_battery();
        device.drain_battery();
        assert_eq!(device.battery_percent, Some(0));
    }

    #[test]
    fn test_signal_shift_is_clamped() {
        let mut device = Device::new("d1", "Phone", DeviceKind::Phone).with_signal(5);
        device.shift_signal(1);
        assert_eq!(device.signal_bars, Some(5));

        device.signal_bars = Some(0);
        device.shift_signal(-1);
        assert_eq!(device.signal_bars, Some(0));

        device.shift_signal(1);
        assert_eq!(device.signal_bars, Some(1));
    }

    #[test]
    fn test_missing_readings_stay_missing() {
        let mut headphones = Device::new("d2", "Headphones", DeviceKind::AudioAccessory);
        headphones.drain_battery();
        headphones.shift_signal(-1);
        assert_eq!(headphones.battery_percent, None);
        assert_eq!(headphones.signal_bars, None);
    }
}
