//! Patient record persistence.
//!
//! Handlers see only the [`PatientStore`] trait. The MongoDB backend is
//! used in production; the in-memory backend serves tests and local runs.

pub mod memory;
pub mod mongo;

use std::time::Duration;

use async_trait::async_trait;

use crate::patient::PatientRecord;

pub use memory::{MemoryPatientStore, StoredPatient};
pub use mongo::MongoPatientStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Write rejected: {0}")]
    Write(String),
    #[error("Cannot encode record: {0}")]
    Encode(String),
    #[error("Store call timed out after {0:?}")]
    Timeout(Duration),
}

/// Append-only store of patient records.
///
/// Implementations must be safe to share across concurrent requests.
#[async_trait]
pub trait PatientStore: Send + Sync {
    /// Insert one record and return the identifier the store assigned.
    async fn insert(&self, record: PatientRecord) -> Result<String, StoreError>;

    /// Round-trip check against the backend.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Backend name for logs.
    fn name(&self) -> &str;
}
