use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::{PatientStore, StoreError};
use crate::patient::PatientRecord;

/// A record as held by [`MemoryPatientStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct StoredPatient {
    pub id: String,
    pub record: PatientRecord,
}

/// In-process store. Ids are UUID v4 strings.
#[derive(Debug, Default)]
pub struct MemoryPatientStore {
    records: Mutex<Vec<StoredPatient>>,
}

impl MemoryPatientStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything inserted so far, in insertion order.
    pub fn records(&self) -> Vec<StoredPatient> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PatientStore for MemoryPatientStore {
    async fn insert(&self, record: PatientRecord) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        let mut records = self
            .records
            .lock()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))?;
        records.push(StoredPatient {
            id: id.clone(),
            record,
        });
        Ok(id)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
