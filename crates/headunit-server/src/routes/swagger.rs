//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{
    // Call models
    CallRecordResponse,
    // Connection models
    ConnectRequest,
    ContactResponse,
    CurrentCallResponse,
    DeviceResponse,
    MakeCallRequest,
    StatusResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Connection endpoints
        super::connection::get_status,
        super::connection::list_devices,
        super::connection::connect,
        super::connection::disconnect,
        // Call endpoints
        super::call::make_call,
        super::call::answer_call,
        super::call::end_call,
        super::call::list_contacts,
        super::call::get_call_history,
    ),
    info(
        title = "Head Unit API",
        version = "0.1.0",
        description = "Simulated head unit phone core\n\nBluetooth device connection, call handling and call history.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Connection", description = "Bluetooth devices and connection status"),
        (name = "Call", description = "Call lifecycle, contacts and history"),
    ),
    components(
        schemas(
            // Connection
            StatusResponse,
            DeviceResponse,
            ConnectRequest,
            // Call
            CurrentCallResponse,
            MakeCallRequest,
            ContactResponse,
            CallRecordResponse,
        )
    ),
)]
pub struct ApiDoc;
