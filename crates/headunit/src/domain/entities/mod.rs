//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Device: Paired Bluetooth device
//! - Contact: Phone book entry
//! - CallRecord: Completed or missed call
//! - CallSession: Current call state machine
//! - ConnectionState: Active device binding
//! - StatusSnapshot: Read projection for UI layers

mod call_record;
mod call_session;
mod connection;
mod contact;
mod device;
mod status;

pub use call_record::*;
pub use call_session::*;
pub use connection::*;
pub use contact::*;
pub use device::*;
pub use status::*;
