//! Application configuration loaded from YAML.
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 3000
//! logging:
//!   level: info
//!   format: pretty
//! products:
//!   - name: Milk
//!     retailer: Corner Shop
//!     price: 1.29
//! ```
//!
//! Every section is optional and falls back to its defaults.

use crate::products::Product;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Values here override the `PRODUCT_SERVICE_LOG_*` environment
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    /// Records stored in the repository before serving
    pub products: Vec<Product>,
}

impl AppConfig {
    /// Read and parse a YAML configuration file
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not valid configuration.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("could not read configuration file {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("could not parse configuration file {}", path.display()))
    }

    /// # Errors
    ///
    /// Fails if `content` is not valid configuration YAML.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        // An empty document deserializes as null, which means "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).context("invalid configuration")
    }

    /// `host:port` to bind the HTTP server to
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
