//! Device Registry - Paired device bookkeeping
//!
//! Owns every known `Device` and the `ConnectionState` that points at the
//! active one.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::domain::{ConnectionState, Device, PhoneError};

/// Per-tick probabilities for simulated device drift
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftRates {
    /// Chance the active device loses one percent of battery
    pub battery_drain_probability: f64,
    /// Chance the active device gains or loses one signal bar
    pub signal_change_probability: f64,
}

impl Default for DriftRates {
    fn default() -> Self {
        Self {
            battery_drain_probability: 0.1,
            signal_change_probability: 0.2,
        }
    }
}

/// Registry of paired devices, in registration order
#[derive(Debug, Clone, Default)]
pub struct DeviceRegistry {
    devices: Vec<Device>,
    connection: ConnectionState,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a paired device; ids are unique
    pub fn register(&mut self, device: Device) -> Result<(), PhoneError> {
        if self.get(&device.id).is_some() {
            return Err(PhoneError::DuplicateDevice(device.id));
        }
        self.devices.push(device);
        Ok(())
    }

    pub fn get(&self, device_id: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == device_id)
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn connection(&self) -> &ConnectionState {
        &self.connection
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    pub fn active_device(&self) -> Option<&Device> {
        self.connection.device_id().and_then(|id| self.get(id))
    }

    fn active_device_mut(&mut self) -> Option<&mut Device> {
        let id = self.connection.device_id()?;
        self.devices.iter_mut().find(|d| d.id == id)
    }

    /// Connect to `device_id`, or to the most recently connected device
    ///
    /// Never-connected devices rank below any timestamp; on ties the device
    /// registered first wins.
    pub fn connect(
        &mut self,
        device_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<&Device, PhoneError> {
        let index = match device_id {
            Some(id) => self
                .devices
                .iter()
                .position(|d| d.id == id)
                .ok_or_else(|| PhoneError::DeviceNotFound(id.to_string()))?,
            None => self.most_recent_index().ok_or(PhoneError::EmptyRegistry)?,
        };

        let device = &mut self.devices[index];
        device.last_connected = Some(now);
        self.connection = ConnectionState::Connected {
            device_id: device.id.clone(),
        };
        Ok(&*device)
    }

    fn most_recent_index(&self) -> Option<usize> {
        self.devices
            .iter()
            .enumerate()
            .reduce(|best, candidate| {
                if candidate.1.last_connected > best.1.last_connected {
                    candidate
                } else {
                    best
                }
            })
            .map(|(index, _)| index)
    }

    /// Drop the active connection, returning the device that was active
    pub fn disconnect(&mut self) -> Result<Device, PhoneError> {
        let device = self.active_device().cloned().ok_or(PhoneError::NotConnected)?;
        self.connection = ConnectionState::Disconnected;
        Ok(device)
    }

    /// Apply one tick of battery/signal drift to the active device
    ///
    /// Returns true when a reading changed.
    pub fn drift<R: Rng + ?Sized>(&mut self, rng: &mut R, rates: &DriftRates) -> bool {
        let Some(device) = self.active_device_mut() else {
            return false;
        };
        let before = (device.battery_percent, device.signal_bars);

        if chance(rng, rates.battery_drain_probability) {
            device.drain_battery();
        }
        if chance(rng, rates.signal_change_probability) {
            let delta = if rng.gen_bool(0.5) { 1 } else { -1 };
            device.shift_signal(delta);
        }

        before != (device.battery_percent, device.signal_bars)
    }
}

/// Bernoulli trial that tolerates out-of-range probabilities
pub(crate) fn chance<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    if probability >= 1.0 {
        true
    } else if probability > 0.0 {
        rng.gen_bool(probability)
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DeviceKind;
    use chrono::{Duration, TimeZone};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn registry() -> DeviceRegistry {
        let mut registry = DeviceRegistry::new();
        registry
            .register(Device::new("d1", "Pixel 7 Pro", DeviceKind::Phone).with_battery(85).with_signal(4))
            .unwrap();
        registry
            .register(
                Device::new("d2", "iPhone 14", DeviceKind::Phone)
                    .with_battery(75)
                    .with_signal(3)
                    .with_last_connected(now() - Duration::days(1)),
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_unknown_device_is_rejected() {
        let mut registry = DeviceRegistry::new();
        assert_eq!(
            registry.connect(Some("ghost"), now()).unwrap_err(),
            PhoneError::DeviceNotFound("ghost".to_string())
        );
        assert!(!registry.is_connected());
    }

    #[test]
    fn test_connect_by_id_activates_and_stamps() {
        let mut registry = registry();
        let device = registry.connect(Some("d1"), now()).unwrap();
        assert_eq!(device.id, "d1");
        assert_eq!(device.last_connected, Some(now()));
        assert!(registry.is_connected());
        assert_eq!(registry.active_device().unwrap().id, "d1");
    }

    #[test]
    fn test_connect_without_id_prefers_most_recent() {
        // d1 was never connected, d2 one day ago
        let mut registry = registry();
        let device = registry.connect(None, now()).unwrap();
        assert_eq!(device.id, "d2");
    }

    #[test]
    fn test_connect_without_id_breaks_ties_by_registration_order() {
        let mut registry = DeviceRegistry::new();
        let stamp = now() - Duration::hours(3);
        for id in ["a", "b", "c"] {
            registry
                .register(Device::new(id, id, DeviceKind::Other).with_last_connected(stamp))
                .unwrap();
        }
        assert_eq!(registry.connect(None, now()).unwrap().id, "a");
    }

    #[test]
    fn test_connect_on_empty_registry_fails() {
        let mut registry = DeviceRegistry::new();
        assert_eq!(
            registry.connect(None, now()).unwrap_err(),
            PhoneError::EmptyRegistry
        );
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let mut registry = registry();
        let err = registry
            .register(Device::new("d1", "Clone", DeviceKind::Other))
            .unwrap_err();
        assert_eq!(err, PhoneError::DuplicateDevice("d1".to_string()));
        assert_eq!(registry.devices().len(), 2);
    }

    #[test]
    fn test_second_disconnect_fails() {
        let mut registry = registry();
        registry.connect(Some("d1"), now()).unwrap();

        assert_eq!(registry.disconnect().unwrap().id, "d1");
        assert_eq!(registry.disconnect().unwrap_err(), PhoneError::NotConnected);
        assert_eq!(registry.connection(), &ConnectionState::Disconnected);
        assert!(registry.active_device().is_none());
    }

    #[test]
    fn test_drift_requires_connection() {
        let mut registry = registry();
        let mut rng = StdRng::seed_from_u64(7);
        let rates = DriftRates {
            battery_drain_probability: 1.0,
            signal_change_probability: 1.0,
        };
        assert!(!registry.drift(&mut rng, &rates));
        assert_eq!(registry.get("d1").unwrap().battery_percent, Some(85));
    }

    #[test]
    fn test_drift_changes_only_active_device() {
        let mut registry = registry();
        registry.connect(Some("d1"), now()).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let rates = DriftRates {
            battery_drain_probability: 1.0,
            signal_change_probability: 1.0,
        };

        for _ in 0..10 {
            registry.drift(&mut rng, &rates);
        }

        let active = registry.get("d1").unwrap();
        assert_eq!(active.battery_percent, Some(75));
        assert!(active.signal_bars.unwrap() <= Device::MAX_SIGNAL_BARS);
        let idle = registry.get("d2").unwrap();
        assert_eq!(idle.battery_percent, Some(75));
        assert_eq!(idle.signal_bars, Some(3));
    }

    #[test]
    fn test_zero_rates_never_drift() {
        let mut registry = registry();
        registry.connect(Some("d1"), now()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let rates = DriftRates {
            battery_drain_probability: 0.0,
            signal_change_probability: f64::NAN,
        };
        for _ in 0..100 {
            assert!(!registry.drift(&mut rng, &rates));
        }
    }
}
