//! Shared types for the HTTP API layer.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::config::AppConfig;
use crate::patient::PatientRecord;
use crate::store::{PatientStore, StoreError};

// ═══════════════════════════════════════════════════════════
// API context — shared state for the router
// ═══════════════════════════════════════════════════════════

/// Shared context for all routes. Cheap to clone.
#[derive(Clone)]
pub struct ApiContext {
    pub store: Arc<dyn PatientStore>,
    /// Upper bound on a single store call.
    pub store_timeout: Duration,
    /// Maximum accepted request body, in bytes.
    pub body_limit: usize,
}

impl ApiContext {
    /// Context with default limits.
    pub fn new(store: Arc<dyn PatientStore>) -> Self {
        Self::from_config(store, &AppConfig::default())
    }

    pub fn from_config(store: Arc<dyn PatientStore>, config: &AppConfig) -> Self {
        Self {
            store,
            store_timeout: config.store_timeout,
            body_limit: config.body_limit,
        }
    }

    /// Insert a record, failing with `StoreError::Timeout` when the
    /// store does not answer within `store_timeout`.
    pub async fn save_patient(&self, record: PatientRecord) -> Result<String, StoreError> {
        match tokio::time::timeout(self.store_timeout, self.store.insert(record)).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(self.store_timeout)),
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Response envelopes
// ═══════════════════════════════════════════════════════════

/// `{ "success": false, "error": "..." }`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertedData {
    pub inserted_id: String,
}

/// Body of a successful `POST /api/patients`.
#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub success: bool,
    pub message: &'static str,
    pub data: InsertedData,
}

impl SaveResponse {
    pub fn saved(inserted_id: String) -> Self {
        Self {
            success: true,
            message: "Patient data saved successfully",
            data: InsertedData { inserted_id },
        }
    }
}

/// Fixed acknowledgement returned by route stubs.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    use crate::patient::PatientIntake;
    use crate::store::MemoryPatientStore;

    struct StalledStore;

    #[async_trait]
    impl PatientStore for StalledStore {
        async fn insert(&self, _record: PatientRecord) -> Result<String, StoreError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("never".into())
        }
        async fn ping(&self) -> Result<(), StoreError> {
            Ok(())
        }
        fn name(&self) -> &str {
            "stalled"
        }
    }

    #[test]
    fn save_response_shape() {
        let value = serde_json::to_value(SaveResponse::saved("abc123".into())).unwrap();
        assert_eq!(
            value,
            json!({
                "success": true,
                "message": "Patient data saved successfully",
                "data": { "insertedId": "abc123" }
            })
        );
    }

    #[test]
    fn error_body_shape() {
        let value = serde_json::to_value(ErrorBody::new("nope")).unwrap();
        assert_eq!(value, json!({ "success": false, "error": "nope" }));
    }

    #[tokio::test]
    async fn save_patient_returns_store_id() {
        let store = Arc::new(MemoryPatientStore::new());
        let ctx = ApiContext::new(store.clone());
        let id = ctx
            .save_patient(PatientRecord::stamp(PatientIntake::default()))
            .await
            .unwrap();
        assert_eq!(store.records()[0].id, id);
    }

    #[tokio::test]
    async fn save_patient_times_out() {
        let mut ctx = ApiContext::new(Arc::new(StalledStore));
        ctx.store_timeout = Duration::from_millis(20);
        let err = ctx
            .save_patient(PatientRecord::stamp(PatientIntake::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Timeout(d) if d == Duration::from_millis(20)));
    }
}
