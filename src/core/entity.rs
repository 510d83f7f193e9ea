//! Record trait defining the persistence abstraction for every entity type

use crate::core::field::FieldValue;
use async_graphql::ID;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier assigned by a store when a record is created.
///
/// Identifiers are never interpreted: two ids are equal when their text is
/// equal. Stores generate UUID v4 text, but ids coming from clients are
/// accepted as-is so that lookups on unknown ids simply miss.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<ID> for RecordId {
    fn from(value: ID) -> Self {
        Self(value.0)
    }
}

/// Base trait for every record kept in an entity store.
///
/// A record type names its collection, knows how to build itself from a
/// creation draft once the store has assigned an id, and how to merge a
/// presence-aware patch. Relational fields are never part of a record: they
/// are recomputed from the stored ids on every resolution.
pub trait Record: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Input accepted by `EntityStore::create`
    type Draft: Send + 'static;

    /// Input accepted by `EntityStore::update`
    ///
    /// Serializing a patch must emit only the fields that are present.
    type Patch: Default + Serialize + Send + Sync + 'static;

    /// Name of the collection holding this record type (e.g. "products")
    fn collection() -> &'static str;

    /// Singular entity type name (e.g. "product")
    fn entity_type() -> &'static str;

    /// The immutable identifier of this record
    fn id(&self) -> &RecordId;

    /// Build a record from a draft and a store-assigned id
    fn from_draft(id: RecordId, draft: Self::Draft) -> Self;

    /// Merge the fields present in `patch`, leaving every other field untouched
    fn apply_patch(&mut self, patch: Self::Patch);

    /// Get the value of a stored field by its serialized name
    fn field_value(&self, field: &str) -> Option<FieldValue>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = RecordId::generate();
        let b = RecordId::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn test_id_conversions() {
        let id = RecordId::from("C1");
        assert_eq!(id.to_string(), "C1");

        let gql: ID = id.clone().into();
        assert_eq!(gql.as_str(), "C1");
        assert_eq!(RecordId::from(gql), id);
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = RecordId::from("abc");
        assert_eq!(serde_json::to_value(&id).unwrap(), serde_json::json!("abc"));
    }
}
