//! Patient intake endpoint.
//!
//! `POST /api/patients` — normalize the submitted form, stamp it with the
//! server time and insert it into the patient store.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{Map, Value};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, SaveResponse};
use crate::patient::{self, PatientRecord};

pub async fn save(
    State(ctx): State<ApiContext>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<SaveResponse>), ApiError> {
    let body = body?;
    let submission = parse_submission(&body)?;

    let record = PatientRecord::stamp(patient::normalize(&submission));
    tracing::debug!(?record, "Normalized patient record");

    let inserted_id = ctx.save_patient(record).await?;
    tracing::info!(%inserted_id, store = ctx.store.name(), "Patient record saved");

    Ok((StatusCode::CREATED, Json(SaveResponse::saved(inserted_id))))
}

/// Decode the request body, which must be a JSON object.
/// The content type is not checked.
fn parse_submission(body: &[u8]) -> Result<Map<String, Value>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::BadRequest(
            "Request body is empty or not properly formatted".into(),
        ));
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ApiError::BadRequest("Request body must be a JSON object".into())),
        Err(e) => {
            tracing::debug!(error = %e, "Rejected malformed patient body");
            Err(ApiError::BadRequest("Request body is not valid JSON".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bad_request_message(result: Result<Map<String, Value>, ApiError>) -> String {
        match result {
            Err(ApiError::BadRequest(message)) => message,
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[test]
    fn accepts_empty_object() {
        assert!(parse_submission(b"{}").unwrap().is_empty());
    }

    #[test]
    fn rejects_empty_body() {
        assert_eq!(
            bad_request_message(parse_submission(b"")),
            "Request body is empty or not properly formatted"
        );
        assert_eq!(
            bad_request_message(parse_submission(b"  \n")),
            "Request body is empty or not properly formatted"
        );
    }

    #[test]
    fn rejects_invalid_json() {
        assert_eq!(
            bad_request_message(parse_submission(b"name=Jane")),
            "Request body is not valid JSON"
        );
    }

    #[test]
    fn rejects_non_object_json() {
        for body in [&b"[1, 2]"[..], b"\"Jane\"", b"null", b"7"] {
            assert_eq!(
                bad_request_message(parse_submission(body)),
                "Request body must be a JSON object"
            );
        }
    }
}
