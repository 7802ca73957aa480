//! HTTP middleware and shared application state

use crate::{
    auth::{jwt::JwtService, policy::AccessPolicy},
    config::AppConfig,
    services::AuthService,
};
use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// Application state shared by all handlers and middleware.
///
/// Services are wrapped in `Arc` so cloning the state per request is a
/// pointer copy.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub auth_service: Arc<AuthService>,
    pub jwt_service: Arc<JwtService>,
    pub policy: Arc<AccessPolicy>,
}

/// Request tracking middleware.
/// Opens one span per request and logs method, uri, status and latency.
pub async fn request_tracking_middleware(req: Request, next: Next) -> Response {
    let trace_id = extract_or_generate_trace_id(req.headers());
    let request_id = Uuid::new_v4().to_string();

    let method = req.method().to_string();
    let uri = req.uri().to_string();

    let span = tracing::info_span!(
        "http_request",
        trace_id = %trace_id,
        request_id = %request_id,
        method = %method,
        uri = %uri,
    );

    async move {
        let start = Instant::now();

        let response = next.run(req).await;

        let elapsed = start.elapsed();

        tracing::info!(
            method = %method,
            uri = %uri,
            status = response.status().as_u16(),
            elapsed_ms = elapsed.as_millis(),
            "Request completed"
        );

        let mut response = response;
        response.headers_mut().insert("x-trace-id", trace_id.parse().unwrap());
        response.headers_mut().insert("x-request-id", request_id.parse().unwrap());

        response
    }
    .instrument(span)
    .await
}

/// Reuse an upstream trace id when one is supplied
fn extract_or_generate_trace_id(headers: &HeaderMap) -> String {
    headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}
