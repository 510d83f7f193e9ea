//! Configuration loading and management

use crate::core::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_BIND: &str = "0.0.0.0:4000";
const DEFAULT_DATABASE: &str = "storefront";

/// Complete server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address the HTTP server listens on
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub graphql: GraphQLConfig,
}

/// Which backend holds the four collections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StorageConfig {
    #[default]
    InMemory,
    Mongodb {
        uri: String,
        #[serde(default = "default_database")]
        database: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLConfig {
    /// Route serving queries and mutations
    #[serde(default = "default_graphql_path")]
    pub path: String,

    /// Serve the GraphQL playground under `{path}/playground`
    #[serde(default = "default_true")]
    pub playground: bool,
}

impl Default for GraphQLConfig {
    fn default() -> Self {
        Self {
            path: default_graphql_path(),
            playground: true,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            storage: StorageConfig::default(),
            graphql: GraphQLConfig::default(),
        }
    }
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

fn default_database() -> String {
    DEFAULT_DATABASE.to_string()
}

fn default_graphql_path() -> String {
    "/graphql".to_string()
}

fn default_true() -> bool {
    true
}

impl ServerConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply the `PORT` and `MONGODB_URI` environment variables
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(
            std::env::var("PORT").ok(),
            std::env::var("MONGODB_URI").ok(),
        )
    }

    /// Replace the listening port and/or switch storage to MongoDB.
    ///
    /// A MongoDB URI keeps the configured database name when the storage was
    /// already MongoDB, and uses the default name otherwise.
    pub fn with_overrides(
        mut self,
        port: Option<String>,
        mongodb_uri: Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(port) = port {
            let port: u16 = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT".to_string(),
                message: format!("'{}' is not a valid port", port),
            })?;
            let host = self
                .bind
                .rsplit_once(':')
                .map_or(self.bind.as_str(), |(host, _)| host);
            self.bind = format!("{}:{}", host, port);
        }

        if let Some(uri) = mongodb_uri {
            let database = match self.storage {
                StorageConfig::Mongodb { database, .. } => database,
                StorageConfig::InMemory => default_database(),
            };
            self.storage = StorageConfig::Mongodb { uri, database };
        }

        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.graphql.path.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                key: "graphql.path".to_string(),
                message: "must start with '/'".to_string(),
            });
        }
        if let StorageConfig::Mongodb { uri, database } = &self.storage {
            if uri.is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "storage.uri".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
            if database.is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "storage.database".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind, "0.0.0.0:4000");
        assert_eq!(config.storage, StorageConfig::InMemory);
        assert_eq!(config.graphql.path, "/graphql");
        assert!(config.graphql.playground);
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = ServerConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_mongodb_storage() {
        let yaml = r#"
storage:
  backend: mongodb
  uri: mongodb://localhost:27017/
"#;
        let config = ServerConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(
            config.storage,
            StorageConfig::Mongodb {
                uri: "mongodb://localhost:27017/".to_string(),
                database: "storefront".to_string(),
            }
        );
    }

    #[test]
    fn test_yaml_serialization() {
        let config = ServerConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed = ServerConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_port_override() {
        let config = ServerConfig::default()
            .with_overrides(Some("8080".to_string()), None)
            .unwrap();
        assert_eq!(config.bind, "0.0.0.0:8080");

        let err = ServerConfig::default()
            .with_overrides(Some("eighty".to_string()), None)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == "PORT"));
    }

    #[test]
    fn test_mongodb_uri_override_switches_backend() {
        let config = ServerConfig::default()
            .with_overrides(None, Some("mongodb://db:27017/".to_string()))
            .unwrap();
        assert_eq!(
            config.storage,
            StorageConfig::Mongodb {
                uri: "mongodb://db:27017/".to_string(),
                database: "storefront".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_graphql_path() {
        let err = ServerConfig::from_yaml_str("graphql:\n  path: graphql\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
