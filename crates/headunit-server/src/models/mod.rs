//! Request/Response DTOs
//!
//! API-facing shapes of the phone core types, with OpenAPI schemas.

mod call;
mod device;
mod status;

pub use call::*;
pub use device::*;
pub use status::*;
