//! Server module for building the HTTP server
//!
//! `ServerBuilder` resolves configuration and stores into a `ServerHost`,
//! and the exposures turn the host into routes.

pub mod builder;
pub mod exposure;
pub mod host;
pub mod router;

pub use builder::ServerBuilder;
pub use exposure::GraphQLExposure;
pub use exposure::graphql::{AppSchema, build_schema, execute};
pub use host::ServerHost;
