//! Head Unit API Routes
//!
//! - /api/phone/status, /devices, /connect, /disconnect - Bluetooth connection
//! - /api/phone/call, /answer, /end, /contacts, /history - Calls
//!
//! Command endpoints answer with the resulting status so clients do not
//! have to re-query.

pub mod call;
pub mod connection;
pub mod swagger;

use axum::{http::StatusCode, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use headunit::PhoneError;

use crate::AppState;

/// Build the full application router
pub fn app(state: AppState) -> Router {
    let openapi = swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(crate::health_check))
        .merge(connection::router())
        .merge(call::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Map a phone error onto an HTTP status with its message
pub(crate) fn phone_error(e: PhoneError) -> (StatusCode, String) {
    let status = match e {
        PhoneError::DeviceNotFound(_) | PhoneError::ContactNotFound(_) => StatusCode::NOT_FOUND,
        PhoneError::NotConnected
        | PhoneError::InvalidStateTransition { .. }
        | PhoneError::EmptyRegistry => StatusCode::CONFLICT,
        PhoneError::Validation(_) | PhoneError::DuplicateDevice(_) => StatusCode::BAD_REQUEST,
    };
    (status, e.to_string())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use headunit::{PhoneConfig, PhoneService, TokioClock};
    use tower::ServiceExt;

    use crate::AppState;

    pub fn app() -> (Router, PhoneService) {
        let phone =
            PhoneService::with_sample_data(PhoneConfig::default(), Arc::new(TokioClock::new()))
                .unwrap();
        let router = super::app(AppState {
            phone: phone.clone(),
        });
        (router, phone)
    }

    pub async fn send(
        router: &Router,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, String) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    pub fn body_json(body: &str) -> serde_json::Value {
        serde_json::from_str(body).unwrap()
    }
}
