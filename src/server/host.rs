//! Server host for transport-agnostic API exposure
//!
//! `ServerHost` holds everything an exposure needs: the configuration, the
//! store handles and the GraphQL schema built over them.

use crate::config::ServerConfig;
use crate::core::Stores;
use crate::server::exposure::graphql::{AppSchema, build_schema};
use std::sync::Arc;

/// Host context containing all server state
///
/// # Example
///
/// ```rust,ignore
/// let host = Arc::new(ServerHost::new(ServerConfig::default(), Stores::in_memory()));
/// let app = GraphQLExposure::build_router(host);
/// ```
pub struct ServerHost {
    pub config: Arc<ServerConfig>,

    /// Store handles shared by every operation
    pub stores: Stores,

    /// Schema whose resolvers see `stores` as context data
    pub schema: AppSchema,
}

impl ServerHost {
    pub fn new(config: ServerConfig, stores: Stores) -> Self {
        let schema = build_schema(stores.clone());
        Self {
            config: Arc::new(config),
            stores,
            schema,
        }
    }
}
