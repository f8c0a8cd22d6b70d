//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the phone core
//! interacts with the outside world.

pub mod clock;

// Re-exports
pub use clock::*;
