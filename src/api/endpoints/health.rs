//! Service health checks.

use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct ApiTestResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
}

/// `GET /` — liveness check.
pub async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        message: "Server is running",
    })
}

/// `GET /api/test` — confirms the API prefix is mounted.
pub async fn api_test() -> Json<ApiTestResponse> {
    Json(ApiTestResponse {
        status: "success",
        message: "API is working",
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Fallback for unknown paths.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Route not found".into())
}
