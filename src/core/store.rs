//! Entity store contract and the request-scoped bundle of store handles

use crate::core::entity::{Record, RecordId};
use crate::core::error::StoreError;
use crate::core::field::FieldValue;
use crate::entities::{Category, Order, Product, User};
use async_trait::async_trait;
use std::sync::Arc;

pub type StoreResult<T> = Result<T, StoreError>;

/// Minimal CRUD over one record type.
///
/// A store knows nothing about other collections. Every call is atomic with
/// respect to the record it touches and nothing more. A missing record is
/// reported as `Ok(None)` (or an empty list), never as an error; `Err` means
/// the store itself could not answer.
#[async_trait]
pub trait EntityStore<T: Record>: Send + Sync {
    /// List every record in the collection, in no guaranteed order
    async fn find_all(&self) -> StoreResult<Vec<T>>;

    /// Get a record by id
    async fn find_by_id(&self, id: &RecordId) -> StoreResult<Option<T>>;

    /// Get every record whose id is a member of `ids`, in one call.
    ///
    /// Unknown ids are skipped. Each matching record is returned once,
    /// whatever the multiplicity of its id in `ids`.
    async fn find_by_ids(&self, ids: &[RecordId]) -> StoreResult<Vec<T>>;

    /// Get every record whose stored `field` equals `value`
    async fn find_by_field(&self, field: &str, value: &FieldValue) -> StoreResult<Vec<T>>;

    /// Persist a new record; the store assigns its id
    async fn create(&self, draft: T::Draft) -> StoreResult<T>;

    /// Merge the present fields of `patch` into an existing record
    ///
    /// Returns `None` when no record has this id.
    async fn update(&self, id: &RecordId, patch: T::Patch) -> StoreResult<Option<T>>;

    /// Remove a record and return it, or `None` if it was already gone
    async fn delete(&self, id: &RecordId) -> StoreResult<Option<T>>;
}

/// Handles to the four entity stores, passed explicitly to every resolver.
///
/// Cloning is cheap; clones share the same underlying stores.
#[derive(Clone)]
pub struct Stores {
    pub products: Arc<dyn EntityStore<Product>>,
    pub categories: Arc<dyn EntityStore<Category>>,
    pub users: Arc<dyn EntityStore<User>>,
    pub orders: Arc<dyn EntityStore<Order>>,
}

impl Stores {
    pub fn new(
        products: impl EntityStore<Product> + 'static,
        categories: impl EntityStore<Category> + 'static,
        users: impl EntityStore<User> + 'static,
        orders: impl EntityStore<Order> + 'static,
    ) -> Self {
        Self {
            products: Arc::new(products),
            categories: Arc::new(categories),
            users: Arc::new(users),
            orders: Arc::new(orders),
        }
    }
}
