//! Per-role dashboard landing endpoints

use axum::{response::IntoResponse, Json};
use serde_json::json;

pub async fn student_dashboard() -> impl IntoResponse {
    Json(json!({ "message": "Welcome Student Dashboard" }))
}

pub async fn instructor_dashboard() -> impl IntoResponse {
    Json(json!({ "message": "Welcome Instructor Dashboard" }))
}

pub async fn admin_dashboard() -> impl IntoResponse {
    Json(json!({ "message": "Welcome Admin Dashboard" }))
}
