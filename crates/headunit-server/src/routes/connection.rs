//! Connection Routes - Bluetooth status, paired devices, connect/disconnect

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use super::phone_error;
use crate::models::{ConnectRequest, DeviceResponse, StatusResponse};
use crate::AppState;

/// Current connection and call status
#[utoipa::path(
    get,
    path = "/api/phone/status",
    responses(
        (status = 200, description = "Current status", body = StatusResponse)
    ),
    tag = "Connection"
)]
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(state.phone.get_status().await.into())
}

/// List paired devices
#[utoipa::path(
    get,
    path = "/api/phone/devices",
    responses(
        (status = 200, description = "Paired devices", body = Vec<DeviceResponse>)
    ),
    tag = "Connection"
)]
pub async fn list_devices(State(state): State<AppState>) -> Json<Vec<DeviceResponse>> {
    let devices = state.phone.get_paired_devices().await;
    Json(devices.into_iter().map(DeviceResponse::from).collect())
}

/// Connect to a paired device
#[utoipa::path(
    post,
    path = "/api/phone/connect",
    request_body = ConnectRequest,
    responses(
        (status = 200, description = "Connected", body = StatusResponse),
        (status = 404, description = "Device not found"),
        (status = 409, description = "No paired devices"),
        (status = 422, description = "Malformed request body")
    ),
    tag = "Connection"
)]
pub async fn connect(
    State(state): State<AppState>,
    payload: Result<Json<ConnectRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, (StatusCode, String)> {
    // No JSON body means "most recent device"; a body that fails to parse is rejected
    let device_id = match payload {
        Ok(Json(request)) => request.device_id,
        Err(JsonRejection::MissingJsonContentType(_)) => None,
        Err(rejection) => return Err((rejection.status(), rejection.body_text())),
    };

    state
        .phone
        .connect(device_id.as_deref())
        .await
        .map_err(phone_error)?;

    Ok(Json(state.phone.get_status().await.into()))
}

/// Disconnect the active device
#[utoipa::path(
    post,
    path = "/api/phone/disconnect",
    responses(
        (status = 200, description = "Disconnected", body = StatusResponse),
        (status = 409, description = "No device connected")
    ),
    tag = "Connection"
)]
pub async fn disconnect(
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>, (StatusCode, String)> {
    state.phone.disconnect().await.map_err(phone_error)?;
    Ok(Json(state.phone.get_status().await.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/phone/status", get(get_status))
        .route("/api/phone/devices", get(list_devices))
        .route("/api/phone/connect", post(connect))
        .route("/api/phone/disconnect", post(disconnect))
}
