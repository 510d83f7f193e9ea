//! In-memory implementation of EntityStore for testing and development

use crate::core::{
    EntityStore, FieldValue, Record, RecordId, StoreError, StoreResult, Stores,
};
use crate::entities::{Category, Order, Product, User};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory entity store
///
/// Records are kept in insertion order. Uses RwLock for thread-safe access;
/// a poisoned lock makes the store report itself unavailable.
pub struct InMemoryStore<T> {
    records: Arc<RwLock<IndexMap<RecordId, T>>>,
}

impl<T: Record> InMemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, IndexMap<RecordId, T>>> {
        self.records.read().map_err(|e| {
            StoreError::unavailable(T::collection(), format!("Failed to acquire read lock: {}", e))
        })
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, IndexMap<RecordId, T>>> {
        self.records.write().map_err(|e| {
            StoreError::unavailable(T::collection(), format!("Failed to acquire write lock: {}", e))
        })
    }
}

impl<T: Record> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Clones share the same records.
impl<T> Clone for InMemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
        }
    }
}

#[async_trait]
impl<T: Record> EntityStore<T> for InMemoryStore<T> {
    async fn find_all(&self) -> StoreResult<Vec<T>> {
        Ok(self.read()?.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &RecordId) -> StoreResult<Option<T>> {
        Ok(self.read()?.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[RecordId]) -> StoreResult<Vec<T>> {
        let records = self.read()?;
        let mut seen = HashSet::new();

        Ok(ids
            .iter()
            .filter(|id| seen.insert(*id))
            .filter_map(|id| records.get(id).cloned())
            .collect())
    }

    async fn find_by_field(&self, field: &str, value: &FieldValue) -> StoreResult<Vec<T>> {
        Ok(self
            .read()?
            .values()
            .filter(|record| record.field_value(field).as_ref() == Some(value))
            .cloned()
            .collect())
    }

    async fn create(&self, draft: T::Draft) -> StoreResult<T> {
        let record = T::from_draft(RecordId::generate(), draft);
        self.write()?.insert(record.id().clone(), record.clone());

        tracing::debug!(collection = T::collection(), id = %record.id(), "record created");
        Ok(record)
    }

    async fn update(&self, id: &RecordId, patch: T::Patch) -> StoreResult<Option<T>> {
        let mut records = self.write()?;

        let Some(record) = records.get_mut(id) else {
            return Ok(None);
        };
        record.apply_patch(patch);

        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: &RecordId) -> StoreResult<Option<T>> {
        Ok(self.write()?.shift_remove(id))
    }
}

impl Stores {
    /// Fresh, empty in-memory stores for all four collections
    pub fn in_memory() -> Self {
        Stores::new(
            InMemoryStore::<Product>::new(),
            InMemoryStore::<Category>::new(),
            InMemoryStore::<User>::new(),
            InMemoryStore::<Order>::new(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Patch;
    use crate::entities::{NewProduct, ProductPatch};

    fn new_product(name: &str, category: Option<&str>) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price: 1.5,
            description: None,
            stock: 10,
            category_id: category.map(RecordId::from),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let store = InMemoryStore::<Product>::new();
        let a = store.create(new_product("Pen", None)).await.unwrap();
        let b = store.create(new_product("Ink", None)).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(store.find_by_id(&a.id).await.unwrap(), Some(a));
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let store = InMemoryStore::<Product>::new();
        for name in ["a", "b", "c"] {
            store.create(new_product(name, None)).await.unwrap();
        }

        let names: Vec<_> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_find_by_ids_skips_unknown_and_duplicates() {
        let store = InMemoryStore::<Product>::new();
        let pen = store.create(new_product("Pen", None)).await.unwrap();

        let found = store
            .find_by_ids(&[pen.id.clone(), RecordId::from("stale"), pen.id.clone()])
            .await
            .unwrap();
        assert_eq!(found, vec![pen]);
    }

    #[tokio::test]
    async fn test_find_by_field_matches_reference() {
        let store = InMemoryStore::<Product>::new();
        store.create(new_product("Pen", Some("C1"))).await.unwrap();
        store.create(new_product("Ink", Some("C2"))).await.unwrap();
        store.create(new_product("Pad", None)).await.unwrap();

        let found = store
            .find_by_field(Product::CATEGORY_ID, &FieldValue::Id(RecordId::from("C1")))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Pen");
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let store = InMemoryStore::<Product>::new();
        let patch = ProductPatch {
            price: Patch::Set(2.0),
            ..Default::default()
        };
        assert_eq!(store.update(&RecordId::from("nope"), patch).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = InMemoryStore::<Product>::new();
        let pen = store.create(new_product("Pen", None)).await.unwrap();

        assert_eq!(store.delete(&pen.id).await.unwrap(), Some(pen.clone()));
        assert_eq!(store.delete(&pen.id).await.unwrap(), None);
        assert_eq!(store.find_by_id(&pen.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clones_share_records() {
        let store = InMemoryStore::<Product>::new();
        let clone = store.clone();
        let pen = store.create(new_product("Pen", None)).await.unwrap();

        assert!(clone.find_by_id(&pen.id).await.unwrap().is_some());
    }
}
