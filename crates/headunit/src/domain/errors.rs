//! Domain Errors
//!
//! Error types for phone and device operations.

use thiserror::Error;

use super::value_objects::CallStatus;

/// Phone service errors
///
/// A failed command never changes state; the service keeps running.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PhoneError {
    #[error("Cannot {operation} while call status is {status}")]
    InvalidStateTransition {
        operation: &'static str,
        status: CallStatus,
    },

    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Contact not found: {0}")]
    ContactNotFound(String),

    #[error("No device connected")]
    NotConnected,

    #[error("No paired devices to connect to")]
    EmptyRegistry,

    #[error("Device already registered: {0}")]
    DuplicateDevice(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl PhoneError {
    pub fn invalid_transition(operation: &'static str, status: CallStatus) -> Self {
        Self::InvalidStateTransition { operation, status }
    }
}
