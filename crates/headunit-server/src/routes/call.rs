//! Call Routes - Dial, answer, hang up, contacts and history

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use super::phone_error;
use crate::models::{CallRecordResponse, ContactResponse, MakeCallRequest, StatusResponse};
use crate::AppState;

/// Place an outgoing call to a number or a contact
#[utoipa::path(
    post,
    path = "/api/phone/call",
    request_body = MakeCallRequest,
    responses(
        (status = 200, description = "Dialing", body = StatusResponse),
        (status = 400, description = "Neither number nor contact_id given"),
        (status = 404, description = "Contact not found"),
        (status = 409, description = "Not connected or a call is already in progress")
    ),
    tag = "Call"
)]
pub async fn make_call(
    State(state): State<AppState>,
    Json(payload): Json<MakeCallRequest>,
) -> Result<Json<StatusResponse>, (StatusCode, String)> {
    state
        .phone
        .make_call(payload.number.as_deref(), payload.contact_id.as_deref())
        .await
        .map_err(phone_error)?;

    Ok(Json(state.phone.get_status().await.into()))
}

/// Answer the ringing call
#[utoipa::path(
    post,
    path = "/api/phone/answer",
    responses(
        (status = 200, description = "Call answered", body = StatusResponse),
        (status = 409, description = "No incoming call or not connected")
    ),
    tag = "Call"
)]
pub async fn answer_call(
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>, (StatusCode, String)> {
    state.phone.answer_call().await.map_err(phone_error)?;
    Ok(Json(state.phone.get_status().await.into()))
}

/// End the current call
#[utoipa::path(
    post,
    path = "/api/phone/end",
    responses(
        (status = 200, description = "Call ended", body = StatusResponse),
        (status = 409, description = "No call in progress or not connected")
    ),
    tag = "Call"
)]
pub async fn end_call(
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>, (StatusCode, String)> {
    state.phone.end_call().await.map_err(phone_error)?;
    Ok(Json(state.phone.get_status().await.into()))
}

/// Phone book
#[utoipa::path(
    get,
    path = "/api/phone/contacts",
    responses(
        (status = 200, description = "Contacts", body = Vec<ContactResponse>)
    ),
    tag = "Call"
)]
pub async fn list_contacts(State(state): State<AppState>) -> Json<Vec<ContactResponse>> {
    let contacts = state.phone.get_contacts();
    Json(contacts.into_iter().map(ContactResponse::from).collect())
}

/// Call history, most recent first
#[utoipa::path(
    get,
    path = "/api/phone/history",
    responses(
        (status = 200, description = "Call history", body = Vec<CallRecordResponse>)
    ),
    tag = "Call"
)]
pub async fn get_call_history(State(state): State<AppState>) -> Json<Vec<CallRecordResponse>> {
    let history = state.phone.get_call_history().await;
    Json(history.into_iter().map(CallRecordResponse::from).collect())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/phone/call", post(make_call))
        .route("/api/phone/answer", post(answer_call))
        .route("/api/phone/end", post(end_call))
        .route("/api/phone/contacts", get(list_contacts))
        .route("/api/phone/history", get(get_call_history))
}
