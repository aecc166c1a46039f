//! API error types with structured JSON responses.

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::types::ErrorBody;
use crate::store::StoreError;

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Request body too large")]
    PayloadTooLarge,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail.clone()),
            ApiError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "Request body too large".to_string(),
            ),
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, detail.clone()),
            ApiError::Store(StoreError::Encode(detail)) => {
                tracing::warn!(detail, "Patient record not encodable");
                (
                    StatusCode::BAD_REQUEST,
                    "Patient data contains values that cannot be stored".to_string(),
                )
            }
            ApiError::Store(err @ StoreError::Timeout(_)) => {
                tracing::error!(error = %err, "Patient store did not answer in time");
                // The write may still land after the deadline.
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Patient data could not be confirmed as saved".to_string(),
                )
            }
            ApiError::Store(err) => {
                tracing::error!(error = %err, "Patient store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Patient data could not be saved".to_string(),
                )
            }
        };

        (status, Json(ErrorBody::new(message))).into_response()
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            ApiError::BadRequest(rejection.body_text())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use std::time::Duration;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn bad_request_returns_400_with_detail() {
        let response = ApiError::BadRequest("Request body is not valid JSON".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Request body is not valid JSON");
    }

    #[tokio::test]
    async fn store_unavailable_returns_500_without_detail() {
        let err = StoreError::Unavailable("connection refused at 10.0.0.5:27017".into());
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Patient data could not be saved");
    }

    #[tokio::test]
    async fn store_timeout_returns_500_with_unconfirmed_outcome() {
        let response =
            ApiError::from(StoreError::Timeout(Duration::from_secs(5))).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Patient data could not be confirmed as saved");
    }

    #[tokio::test]
    async fn unencodable_record_is_a_client_error() {
        let err = StoreError::Encode("BSON does not support unsigned integers".into());
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Patient data contains values that cannot be stored");
    }

    #[tokio::test]
    async fn write_rejection_hides_details_from_client() {
        let err = StoreError::Write("E11000 duplicate key on patients_data".into());
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Patient data could not be saved");
    }

    #[tokio::test]
    async fn payload_too_large_returns_413() {
        let response = ApiError::PayloadTooLarge.into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn not_found_returns_404() {
        let response = ApiError::NotFound("Route not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Route not found");
    }
}
