//! ServerBuilder for fluent API to build HTTP servers

use super::host::ServerHost;
use super::router::build_router;
use crate::config::{ServerConfig, StorageConfig};
use crate::core::Stores;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for creating the storefront server
///
/// # Example
///
/// ```ignore
/// ServerBuilder::new()
///     .with_config(ServerConfig::from_yaml_file("storefront.yaml")?.with_env_overrides()?)
///     .serve()
///     .await?;
/// ```
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<ServerConfig>,
    stores: Option<Stores>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration (defaults to `ServerConfig::default()`)
    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use these stores instead of the ones described by the configuration
    pub fn with_stores(mut self, stores: Stores) -> Self {
        self.stores = Some(stores);
        self
    }

    /// Build the transport-agnostic host
    ///
    /// Without explicit stores, the storage section of the configuration
    /// decides: fresh in-memory stores, or a MongoDB connection.
    pub async fn build_host(self) -> Result<ServerHost> {
        let config = self.config.unwrap_or_default();

        let stores = match self.stores {
            Some(stores) => stores,
            None => Self::connect_stores(&config.storage).await?,
        };

        Ok(ServerHost::new(config, stores))
    }

    /// Build the complete router
    pub async fn build(self) -> Result<Router> {
        let host = Arc::new(self.build_host().await?);
        Ok(build_router(host))
    }

    /// Build the router and serve it on the configured address until the
    /// process is stopped.
    pub async fn serve(self) -> Result<()> {
        let host = Arc::new(self.build_host().await?);
        let bind = host.config.bind.clone();
        let graphql_path = host.config.graphql.path.clone();
        let app = build_router(host);

        let listener = TcpListener::bind(&bind).await?;
        tracing::info!(address = %listener.local_addr()?, path = %graphql_path, "storefront listening");

        axum::serve(listener, app).await?;
        Ok(())
    }

    async fn connect_stores(storage: &StorageConfig) -> Result<Stores> {
        match storage {
            StorageConfig::InMemory => {
                tracing::info!("using in-memory stores");
                Ok(Stores::in_memory())
            }
            #[cfg(feature = "mongodb_backend")]
            StorageConfig::Mongodb { uri, database } => {
                let client = mongodb::Client::with_uri_str(uri).await?;
                tracing::info!(database = %database, "connected to MongoDB");
                Ok(Stores::mongodb(client.database(database)))
            }
            #[cfg(not(feature = "mongodb_backend"))]
            StorageConfig::Mongodb { .. } => Err(crate::core::ConfigError::InvalidValue {
                key: "storage.backend".to_string(),
                message: "MongoDB support is not enabled. Enable the 'mongodb_backend' feature."
                    .to_string(),
            }
            .into()),
        }
    }
}
