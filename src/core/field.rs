//! Field value types and presence-aware update markers

use crate::core::entity::RecordId;
use crate::core::error::FieldValidationError;
use async_graphql::MaybeUndefined;
use serde::{Serialize, Serializer};

/// A stored field value used for equality scans across a collection
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Id(RecordId),
    Integer(i64),
    Float(f64),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            FieldValue::Id(id) => Some(id.as_str()),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl From<Option<&RecordId>> for FieldValue {
    fn from(value: Option<&RecordId>) -> Self {
        value.map_or(FieldValue::Null, |id| FieldValue::Id(id.clone()))
    }
}

/// One field of an update: either omitted by the caller, or supplied.
///
/// Optional attributes are modelled as `Patch<Option<T>>`, where `Set(None)`
/// clears the stored value. `Keep` never touches the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Patch<T> {
    #[default]
    Keep,
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, Patch::Keep)
    }

    /// Overwrite `target` if the field was supplied
    pub fn apply_to(self, target: &mut T) {
        if let Patch::Set(value) = self {
            *target = value;
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Patch::Keep => Patch::Keep,
            Patch::Set(value) => Patch::Set(f(value)),
        }
    }

    /// Convert an engine argument for a non-nullable attribute.
    ///
    /// An explicit null cannot be stored in a required attribute, so it is
    /// reported against `field` instead of being silently dropped.
    pub fn required(
        field: &str,
        value: MaybeUndefined<T>,
    ) -> Result<Self, FieldValidationError> {
        match value {
            MaybeUndefined::Undefined => Ok(Patch::Keep),
            MaybeUndefined::Value(value) => Ok(Patch::Set(value)),
            MaybeUndefined::Null => Err(FieldValidationError::new(field, "cannot be null")),
        }
    }
}

impl<T> Patch<Option<T>> {
    /// Convert an engine argument for a nullable attribute
    pub fn nullable(value: MaybeUndefined<T>) -> Self {
        match value {
            MaybeUndefined::Undefined => Patch::Keep,
            MaybeUndefined::Null => Patch::Set(None),
            MaybeUndefined::Value(value) => Patch::Set(Some(value)),
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Patch::Keep, Patch::Set)
    }
}

// `Keep` fields are expected to be skipped with `skip_serializing_if`.
impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Patch::Keep => serializer.serialize_none(),
            Patch::Set(value) => value.serialize(serializer),
        }
    }
}
