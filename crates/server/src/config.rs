//! Server configuration.
//!
//! ```toml
//! bind_addr = "0.0.0.0:9000"
//!
//! [store]
//! skiplist_seed = 42
//! ```

use std::path::Path;

use domainkv_storage::StoreConfig;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default listen address
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:9000";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to. Port 0 picks a free port.
    pub bind_addr: String,
    /// Store settings
    pub store: StoreConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            store: StoreConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Override the bind address
    pub fn with_bind_addr(mut self, bind_addr: impl Into<String>) -> Self {
        self.bind_addr = bind_addr.into();
        self
    }
}
