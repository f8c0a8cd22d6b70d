//! Services
//!
//! - `phone`: the phone core handle (commands, queries, lifecycle)
//! - `device_registry`: paired devices and the active connection
//! - `call_history`: bounded call log
//! - `simulator`: background tick (incoming calls, device drift)
//! - `timer`: one-shot deferred actions
//! - `sample_data`: demo seed

pub mod call_history;
pub mod device_registry;
pub mod phone;
pub mod sample_data;
pub mod simulator;
pub mod timer;

// Re-exports
pub use call_history::{CallHistoryLog, DEFAULT_HISTORY_CAPACITY};
pub use device_registry::{DeviceRegistry, DriftRates};
pub use phone::{PhoneConfig, PhoneSeed, PhoneService};
pub use simulator::SimulatorConfig;
