//! # Storefront
//!
//! A GraphQL query/mutation service over four records, Product, Category,
//! Order and User, each kept in its own collection of a document store.
//!
//! The collections have no joins and enforce no foreign keys. The relational
//! fields of the GraphQL types (`Product.category`, `Category.products`,
//! `User.orders`, `Order.userId`, `Order.products`) are recomputed from the
//! stored ids every time they are selected, and a reference that no longer
//! resolves turns into null or an empty list rather than an error.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use storefront::prelude::*;
//!
//! let schema = build_schema(Stores::in_memory());
//! let response = execute(&schema, "{ products { name category { name } } }").await;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod relations;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        EntityStore, FieldValue, Patch, Record, RecordId, StoreError, StoreResult,
        StorefrontError, StorefrontResult, Stores, ValidationError,
    };

    // === Records ===
    pub use crate::entities::{
        Category, CategoryPatch, NewCategory, NewOrder, NewProduct, NewUser, Order, OrderPatch,
        Product, ProductPatch, User, UserPatch,
    };

    // === Storage ===
    pub use crate::storage::InMemoryStore;
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoStore;

    // === Config ===
    pub use crate::config::{GraphQLConfig, ServerConfig, StorageConfig};

    // === Server ===
    pub use crate::server::{
        AppSchema, GraphQLExposure, ServerBuilder, ServerHost, build_schema, execute,
    };

    // === External dependencies ===
    pub use async_trait::async_trait;
}
