//! Sample data for the simulated head unit
//!
//! Three paired devices, five contacts and a short call history, stamped
//! relative to `now`.

use chrono::{DateTime, Duration, Utc};

use super::phone::PhoneSeed;
use crate::domain::{CallOutcome, CallRecord, Contact, Device, DeviceKind};

/// Build the demo seed
pub fn sample_seed(now: DateTime<Utc>) -> PhoneSeed {
    PhoneSeed {
        devices: sample_devices(now),
        contacts: sample_contacts(),
        history: sample_history(now),
    }
}

pub fn sample_devices(now: DateTime<Utc>) -> Vec<Device> {
    vec![
        Device::new("device1", "Pixel 7 Pro", DeviceKind::Phone)
            .with_battery(85)
            .with_signal(4)
            .with_last_connected(now),
        Device::new("device2", "Sony WH-1000XM4", DeviceKind::AudioAccessory)
            .with_battery(60)
            .with_last_connected(now - Duration::days(1)),
        Device::new("device3", "iPhone 14", DeviceKind::Phone)
            .with_battery(75)
            .with_signal(3)
            .with_last_connected(now - Duration::days(2)),
    ]
}

pub fn sample_contacts() -> Vec<Contact> {
    vec![
        Contact::new("contact1", "John Smith", "+1 (555) 123-4567"),
        Contact::new("contact2", "Jane Doe", "+1 (555) 987-6543"),
        Contact::new("contact3", "Alice Johnson", "+1 (555) 555-5555"),
        Contact::new("contact4", "Bob Williams", "+1 (555) 444-3333"),
        Contact::new("contact5", "Chris Taylor", "+1 (555) 222-1111"),
    ]
}

/// Most recent first
pub fn sample_history(now: DateTime<Utc>) -> Vec<CallRecord> {
    vec![
        CallRecord::new(
            "+1 (555) 123-4567".to_string(),
            Some("John Smith".to_string()),
            now - Duration::hours(1),
            now - Duration::hours(1) + Duration::seconds(100),
            100,
            CallOutcome::Outgoing,
        ),
        CallRecord::new(
            "+1 (555) 987-6543".to_string(),
            Some("Jane Doe".to_string()),
            now - Duration::hours(2),
            now - Duration::hours(2) + Duration::seconds(30),
            30,
            CallOutcome::Incoming,
        ),
        CallRecord::new(
            "+1 (555) 333-2222".to_string(),
            None,
            now - Duration::hours(12),
            now - Duration::hours(12),
            0,
            CallOutcome::Missed,
        ),
    ]
}
