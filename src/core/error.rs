//! Typed error handling for the storefront
//!
//! Record-level absence is never an error in this crate: lookups return
//! `Ok(None)` and relations degrade to null or an empty list. The types here
//! cover the failures that do end an operation.
//!
//! # Error Categories
//!
//! - [`StoreError`]: a store call could not complete
//! - [`ValidationError`]: malformed input detected before any store call
//! - [`ConfigError`]: configuration loading and validation
//!
//! [`StorefrontError`] wraps them all, maps them to HTTP status codes and
//! stable error codes, and converts into GraphQL errors carrying a `code`
//! extension.

use async_graphql::ErrorExtensions;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Error code attached to GraphQL errors raised by an unavailable store
pub const STORE_UNAVAILABLE: &str = "STORE_UNAVAILABLE";

/// Error code attached to GraphQL errors raised by input validation
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";

/// The main error type for the storefront
#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Should not happen in normal operation
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl StorefrontError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            StorefrontError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
            StorefrontError::Validation(_) => StatusCode::BAD_REQUEST,
            StorefrontError::Config(_) | StorefrontError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            StorefrontError::Store(e) => e.error_code(),
            StorefrontError::Validation(_) => VALIDATION_ERROR,
            StorefrontError::Config(_) => "CONFIG_ERROR",
            StorefrontError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            StorefrontError::Store(StoreError::Unavailable { collection, .. }) => {
                Some(serde_json::json!({ "collection": collection }))
            }
            StorefrontError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for StorefrontError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

impl ErrorExtensions for StorefrontError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, ext| {
            ext.set("code", self.error_code());
            if let StorefrontError::Validation(ValidationError::FieldErrors(errors)) = self {
                ext.set(
                    "fields",
                    async_graphql::Value::List(
                        errors
                            .iter()
                            .map(|e| async_graphql::Value::String(e.field.clone()))
                            .collect(),
                    ),
                );
            }
        })
    }
}

// =============================================================================
// Store Errors
// =============================================================================

/// A store call failed to complete
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing collection could not be reached or locked
    #[error("{collection} store unavailable: {message}")]
    Unavailable {
        collection: &'static str,
        message: String,
    },

    /// A stored document could not be converted to or from a record
    #[error("Failed to serialize/deserialize {collection} record: {message}")]
    Serialization {
        collection: &'static str,
        message: String,
    },
}

impl StoreError {
    pub fn unavailable(collection: &'static str, message: impl Into<String>) -> Self {
        StoreError::Unavailable {
            collection,
            message: message.into(),
        }
    }

    pub fn serialization(collection: &'static str, message: impl Into<String>) -> Self {
        StoreError::Serialization {
            collection,
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        // A record the store cannot decode is as fatal to the operation as
        // a store that cannot be reached.
        match self {
            StoreError::Unavailable { .. } | StoreError::Serialization { .. } => STORE_UNAVAILABLE,
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Malformed input rejected before any store call
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid input: {}", format_fields(.0))]
    FieldErrors(Vec<FieldValidationError>),
}

/// A single offending field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl FieldValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn format_fields(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("'{}' {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Config Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

pub type StorefrontResult<T> = Result<T, StorefrontError>;
