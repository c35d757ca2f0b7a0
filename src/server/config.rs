use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::{ImportClient, ImportClientBuilder, ImportError, ImportStrategy};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub strategy: ImportStrategy,
    pub timeout: Duration,
    pub platform_root: Option<Url>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            strategy: ImportStrategy::default(),
            timeout: Duration::from_secs(10),
            platform_root: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match var("IMPORT_PORT") {
            Some(v) => v.trim().parse().map_err(|source| ConfigError::ParseInt {
                name: "IMPORT_PORT".to_string(),
                source,
            })?,
            None => defaults.port,
        };

        let timeout = match var("IMPORT_TIMEOUT_SECS") {
            Some(v) => {
                let secs: u64 = v.trim().parse().map_err(|source| ConfigError::ParseInt {
                    name: "IMPORT_TIMEOUT_SECS".to_string(),
                    source,
                })?;
                if secs == 0 {
                    return Err(ConfigError::InvalidValue {
                        name: "IMPORT_TIMEOUT_SECS".to_string(),
                        message: "must be greater than zero".to_string(),
                    });
                }
                Duration::from_secs(secs)
            }
            None => defaults.timeout,
        };

        let strategy = match var("IMPORT_STRATEGY") {
            Some(v) => v
                .parse::<ImportStrategy>()
                .map_err(|e| ConfigError::InvalidValue {
                    name: "IMPORT_STRATEGY".to_string(),
                    message: e.to_string(),
                })?,
            None => defaults.strategy,
        };

        let platform_root = var("IDESTRIM_ROOT_URL")
            .map(|v| {
                Url::parse(v.trim()).map_err(|e| ConfigError::InvalidValue {
                    name: "IDESTRIM_ROOT_URL".to_string(),
                    message: e.to_string(),
                })
            })
            .transpose()?;

        Ok(Self {
            host: var("IMPORT_HOST").unwrap_or(defaults.host),
            port,
            strategy,
            timeout,
            platform_root,
        })
    }

    pub fn client_builder(&self) -> ImportClientBuilder {
        let mut builder = ImportClient::builder()
            .strategy(self.strategy)
            .timeout(self.timeout);
        if let Some(root) = &self.platform_root {
            builder = builder.platform_root(root.clone());
        }
        builder
    }

    pub fn build_client(&self) -> Result<ImportClient, ImportError> {
        self.client_builder().build()
    }
}
