//! Route registration.
//! Builds the API router and applies the middleware stack: CORS and request
//! tracking on the outside, then the authentication filter, then the
//! authorization policy, then handlers.

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::{auth, config::AppConfig, handlers, middleware::AppState};

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config);

    // Open endpoints: registration and login (the policy also whitelists
    // these prefixes)
    let auth_routes = Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me));

    // Instructor/admin catalog surface
    let catalog_routes = Router::new()
        .route("/courses", get(handlers::catalog::list_courses))
        .route("/subjects", get(handlers::catalog::list_subjects))
        .route("/topics", get(handlers::catalog::list_topics));

    // Per-role dashboards
    let dashboard_routes = Router::new()
        .route("/student/dashboard", get(handlers::dashboard::student_dashboard))
        .route("/instructor/dashboard", get(handlers::dashboard::instructor_dashboard))
        .route("/admin/dashboard", get(handlers::dashboard::admin_dashboard));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .merge(auth_routes)
        .merge(catalog_routes)
        .merge(dashboard_routes)
        // Layers run top-down per request: tracking, then authentication,
        // then authorization. The policy check therefore always sees the
        // identity the filter installed (or its absence).
        .layer(axum::middleware::from_fn_with_state(
            state.policy.clone(),
            auth::middleware::authorize,
        ))
        .layer(axum::middleware::from_fn_with_state(
            state.jwt_service.clone(),
            auth::middleware::authenticate,
        ))
        .layer(axum::middleware::from_fn(crate::middleware::request_tracking_middleware))
        .layer(cors)
        .with_state(state)
}

/// CORS for the web frontend, mirroring the methods and headers the SPA
/// actually sends.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origin = config
        .server
        .cors_allowed_origin
        .parse::<HeaderValue>()
        .expect("Invalid CORS origin");

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}
