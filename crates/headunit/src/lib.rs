//! Head Unit Phone Core
//!
//! Simulated Bluetooth phone features for the head unit: paired devices,
//! the current call, call history and a background simulator that drifts
//! device readings and rings with occasional incoming calls.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): Pure entities and logic
//!   - `entities/`: Device, Contact, CallRecord, CallSession, ConnectionState, StatusSnapshot
//!   - `value_objects/`: CallStatus, DeviceKind, CallOutcome, CallDirection
//!   - `errors/`: PhoneError
//!
//! - **Ports** (`ports/`): Abstract interfaces (Clock)
//!
//! - **Services** (`services/`): PhoneService and its parts
//!
//! # Usage
//!
//! ```rust,ignore
//! use headunit::{PhoneConfig, PhoneService, SystemClock};
//!
//! let phone = PhoneService::with_sample_data(PhoneConfig::default(), Arc::new(SystemClock))?;
//! phone.start().await;
//! phone.connect(None).await?;
//! phone.make_call(Some("+15551234567"), None).await?;
//! ```

pub mod domain;
pub mod ports;
pub mod services;

// Re-export commonly used types
pub use domain::{
    CallDirection, CallOutcome, CallRecord, CallSession, CallStatus, ConnectionState, Contact,
    Device, DeviceKind, OngoingCall, PhoneError, StatusSnapshot,
};
pub use ports::{Clock, SystemClock, TokioClock};
pub use services::{
    CallHistoryLog, DeviceRegistry, DriftRates, PhoneConfig, PhoneSeed, PhoneService,
    SimulatorConfig,
};
