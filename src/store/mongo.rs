//! MongoDB-backed patient store.
//!
//! The client is built once at startup and shared across requests; the
//! driver pools connections internally. Connecting is lazy, so an
//! unreachable server surfaces on the first `ping` or `insert`.

use async_trait::async_trait;
use bson::{doc, Bson, Document};
use mongodb::error::ErrorKind;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use serde_json::Value;

use super::{PatientStore, StoreError};
use crate::config::{self, AppConfig};
use crate::patient::PatientRecord;

pub struct MongoPatientStore {
    database: Database,
    collection: Collection<Document>,
}

impl MongoPatientStore {
    /// Build a client from `MONGO_URI` and bind the patient collection.
    ///
    /// Server selection and connect are bounded by the store timeout so
    /// a dead server fails requests instead of hanging them.
    pub async fn connect(config: &AppConfig) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(&config.mongo_uri)
            .await
            .map_err(|e| StoreError::Unavailable(format!("invalid MONGO_URI: {e}")))?;
        options.app_name = Some(config::APP_NAME.to_string());
        options.server_selection_timeout = Some(config.store_timeout);
        options.connect_timeout = Some(config.store_timeout);

        let client = Client::with_options(options).map_err(classify)?;
        let database = client.database(&config.mongo_db_name);
        let collection = database.collection::<Document>(&config.mongo_collection);

        tracing::info!(
            uri = %config::redact_uri(&config.mongo_uri),
            db = %config.mongo_db_name,
            collection = %config.mongo_collection,
            "MongoDB client configured"
        );

        Ok(Self {
            database,
            collection,
        })
    }
}

#[async_trait]
impl PatientStore for MongoPatientStore {
    async fn insert(&self, record: PatientRecord) -> Result<String, StoreError> {
        let document = record_to_document(&record)?;
        let result = self.collection.insert_one(document).await.map_err(classify)?;
        Ok(id_to_string(result.inserted_id))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(classify)
    }

    fn name(&self) -> &str {
        "mongodb"
    }
}

/// Encode a record as BSON with `createdAt` as a native datetime.
pub(crate) fn record_to_document(record: &PatientRecord) -> Result<Document, StoreError> {
    let mut intake =
        serde_json::to_value(&record.intake).map_err(|e| StoreError::Encode(e.to_string()))?;
    widen_unsigned(&mut intake);
    let mut document =
        bson::to_document(&intake).map_err(|e| StoreError::Encode(e.to_string()))?;
    document.insert("createdAt", bson::DateTime::from_chrono(record.created_at));
    Ok(document)
}

/// BSON has no unsigned 64-bit type. Integers above `i64::MAX` are stored
/// as doubles; everything else keeps its JSON type.
fn widen_unsigned(value: &mut Value) {
    match value {
        Value::Number(n) if n.as_i64().is_none() && n.as_u64().is_some() => {
            if let Some(widened) = n.as_f64().and_then(serde_json::Number::from_f64) {
                *n = widened;
            }
        }
        Value::Array(items) => items.iter_mut().for_each(widen_unsigned),
        Value::Object(map) => map.values_mut().for_each(widen_unsigned),
        _ => {}
    }
}

/// ObjectIds render as 24 hex digits; anything else uses its BSON display.
pub(crate) fn id_to_string(id: Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s,
        other => other.to_string(),
    }
}

fn classify(err: mongodb::error::Error) -> StoreError {
    match *err.kind {
        ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) => {
            StoreError::Unavailable(err.to_string())
        }
        _ => StoreError::Write(err.to_string()),
    }
}
