//! Core module containing the record abstraction, the store contract and errors

pub mod entity;
pub mod error;
pub mod field;
pub mod store;

pub use entity::{Record, RecordId};
pub use error::{
    ConfigError, FieldValidationError, StoreError, StorefrontError, StorefrontResult,
    ValidationError,
};
pub use field::{FieldValue, Patch};
pub use store::{EntityStore, StoreResult, Stores};
