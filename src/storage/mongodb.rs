//! MongoDB storage backend using the official MongoDB async driver.
//!
//! Provides `MongoStore<T>`, an `EntityStore<T>` backed by a
//! `mongodb::Database`.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag.
//!
//! # Storage model
//!
//! One collection per record type, named by `T::collection()` ("products",
//! "categories", ...). Reference fields are stored as plain id strings and
//! are never denormalized.
//!
//! # Serialization strategy
//!
//! Records go through `serde_json::Value` before being converted to BSON, so
//! ids stay strings and timestamps stay RFC 3339 strings. The record `id`
//! field is mapped to MongoDB's `_id`.

use crate::core::{
    EntityStore, FieldValue, Record, RecordId, StoreError, StoreResult, Stores,
};
use crate::entities::{Category, Order, Product, User};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use std::marker::PhantomData;

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a JSON object into a BSON document, renaming `id` → `_id`.
fn json_to_document(collection: &'static str, json: serde_json::Value) -> StoreResult<Document> {
    let bson = mongodb::bson::to_bson(&json)
        .map_err(|e| StoreError::serialization(collection, e.to_string()))?;

    let Bson::Document(mut doc) = bson else {
        return Err(StoreError::serialization(
            collection,
            "expected a document, got a non-object value",
        ));
    };

    if let Some(id) = doc.remove("id") {
        doc.insert("_id", id);
    }

    Ok(doc)
}

/// Convert a BSON document back into JSON, renaming `_id` → `id`.
fn document_to_json(mut doc: Document) -> serde_json::Value {
    if let Some(id) = doc.remove("_id") {
        doc.insert("id", id);
    }

    Bson::Document(doc).into_relaxed_extjson()
}

fn id_bson(id: &RecordId) -> Bson {
    Bson::String(id.as_str().to_string())
}

// ---------------------------------------------------------------------------
// MongoStore<T>
// ---------------------------------------------------------------------------

/// Entity store backed by one MongoDB collection.
///
/// # Example
///
/// ```rust,ignore
/// use mongodb::Client;
/// use storefront::storage::MongoStore;
///
/// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
/// let store = MongoStore::<Product>::new(client.database("storefront"));
/// let product = store.find_by_id(&id).await?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoStore<T> {
    database: Database,
    _marker: PhantomData<fn() -> T>,
}

impl<T> MongoStore<T> {
    pub fn new(database: Database) -> Self {
        Self {
            database,
            _marker: PhantomData,
        }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }
}

impl<T: Record> MongoStore<T> {
    fn collection(&self) -> Collection<Document> {
        self.database.collection(T::collection())
    }

    fn record_to_document(record: &T) -> StoreResult<Document> {
        let json = serde_json::to_value(record)
            .map_err(|e| StoreError::serialization(T::collection(), e.to_string()))?;
        json_to_document(T::collection(), json)
    }

    fn document_to_record(doc: Document) -> StoreResult<T> {
        serde_json::from_value(document_to_json(doc))
            .map_err(|e| StoreError::serialization(T::collection(), e.to_string()))
    }

    fn unavailable(operation: &str, err: mongodb::error::Error) -> StoreError {
        tracing::error!(collection = T::collection(), operation, error = %err, "mongodb call failed");
        StoreError::unavailable(T::collection(), format!("{} failed: {}", operation, err))
    }

    async fn find_many(&self, filter: Document) -> StoreResult<Vec<T>> {
        let cursor = self
            .collection()
            .find(filter)
            .await
            .map_err(|e| Self::unavailable("find", e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| Self::unavailable("collect", e))?;

        docs.into_iter().map(Self::document_to_record).collect()
    }
}

#[async_trait]
impl<T: Record> EntityStore<T> for MongoStore<T> {
    async fn find_all(&self) -> StoreResult<Vec<T>> {
        self.find_many(doc! {}).await
    }

    async fn find_by_id(&self, id: &RecordId) -> StoreResult<Option<T>> {
        let doc = self
            .collection()
            .find_one(doc! { "_id": id_bson(id) })
            .await
            .map_err(|e| Self::unavailable("find_one", e))?;

        doc.map(Self::document_to_record).transpose()
    }

    /// Single `$in` query whatever the number of ids.
    async fn find_by_ids(&self, ids: &[RecordId]) -> StoreResult<Vec<T>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Bson> = ids.iter().map(id_bson).collect();
        self.find_many(doc! { "_id": { "$in": ids } }).await
    }

    async fn find_by_field(&self, field: &str, value: &FieldValue) -> StoreResult<Vec<T>> {
        let value = mongodb::bson::to_bson(value)
            .map_err(|e| StoreError::serialization(T::collection(), e.to_string()))?;
        let field = if field == "id" { "_id" } else { field };
        self.find_many(doc! { field: value }).await
    }

    async fn create(&self, draft: T::Draft) -> StoreResult<T> {
        let record = T::from_draft(RecordId::generate(), draft);
        let doc = Self::record_to_document(&record)?;

        self.collection()
            .insert_one(doc)
            .await
            .map_err(|e| Self::unavailable("insert_one", e))?;

        tracing::debug!(collection = T::collection(), id = %record.id(), "record created");
        Ok(record)
    }

    /// `$set` of the present fields only, applied atomically to one document.
    async fn update(&self, id: &RecordId, patch: T::Patch) -> StoreResult<Option<T>> {
        let json = serde_json::to_value(&patch)
            .map_err(|e| StoreError::serialization(T::collection(), e.to_string()))?;
        let changes = json_to_document(T::collection(), json)?;

        if changes.is_empty() {
            return self.find_by_id(id).await;
        }

        let doc = self
            .collection()
            .find_one_and_update(doc! { "_id": id_bson(id) }, doc! { "$set": changes })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| Self::unavailable("find_one_and_update", e))?;

        doc.map(Self::document_to_record).transpose()
    }

    async fn delete(&self, id: &RecordId) -> StoreResult<Option<T>> {
        let doc = self
            .collection()
            .find_one_and_delete(doc! { "_id": id_bson(id) })
            .await
            .map_err(|e| Self::unavailable("find_one_and_delete", e))?;

        doc.map(Self::document_to_record).transpose()
    }
}

impl Stores {
    /// MongoDB-backed stores, one collection per record type
    pub fn mongodb(database: Database) -> Self {
        Stores::new(
            MongoStore::<Product>::new(database.clone()),
            MongoStore::<Category>::new(database.clone()),
            MongoStore::<User>::new(database.clone()),
            MongoStore::<Order>::new(database),
        )
    }
}
