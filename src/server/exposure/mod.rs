//! API exposure modules
//!
//! Each exposure consumes a `ServerHost` and produces a Router.

pub mod graphql;

pub use graphql::GraphQLExposure;
