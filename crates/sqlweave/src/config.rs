//! Connection parameters.
//!
//! Parameters are plain data: they can be built in code or read from a TOML
//! document such as
//!
//! ```toml
//! backend = "sqlite"
//! database = "var/app.db"
//! ```
//!
//! Validation of backend-specific requirements happens in
//! [`Database::new`](crate::Database::new), not here.

use crate::dialect::Backend;
use crate::error::{QbError, QbResult};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionParams {
    pub backend: Backend,
    #[serde(default, alias = "dbname")]
    pub database: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub user: Option<String>,
}

impl ConnectionParams {
    pub fn new(backend: Backend) -> Self {
        Self {
            backend,
            database: None,
            host: None,
            port: None,
            user: None,
        }
    }

    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Parse parameters from a TOML document.
    pub fn from_toml_str(raw: &str) -> QbResult<Self> {
        toml::from_str(raw)
            .map_err(|e| QbError::config(format!("failed to parse connection parameters: {e}")))
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> QbResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            QbError::config(format!("failed to read config file {}: {e}", path.display()))
        })?;
        toml::from_str(&raw).map_err(|e| {
            QbError::config(format!("failed to parse config file {}: {e}", path.display()))
        })
    }
}
