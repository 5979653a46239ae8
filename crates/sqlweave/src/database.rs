//! Per-backend database handler.
//!
//! A [`Database`] validates connection parameters for its backend, derives the
//! DSN the connection collaborator should use, and hands out query builders
//! bound to the backend's dialect. It does not open connections.

use crate::config::ConnectionParams;
use crate::dialect::{Backend, Dialect, Feature, SqliteDialect};
use crate::error::{QbError, QbResult};
use crate::qb::QueryBuilder;

#[derive(Debug, Clone)]
pub struct Database {
    params: ConnectionParams,
    dsn: String,
}

impl Database {
    /// Validate `params` and derive the DSN.
    ///
    /// SQLite and Oracle need a database name. SQLite names are made absolute
    /// by prefixing `/` when missing.
    pub fn new(mut params: ConnectionParams) -> QbResult<Self> {
        let backend = params.backend;
        if matches!(backend, Backend::Sqlite | Backend::Oracle) {
            let Some(name) = params.database.as_deref().filter(|s| !s.is_empty()) else {
                return Err(QbError::MissingRequiredParameter {
                    param: "database",
                    context: "ConnectionParams",
                });
            };
            if backend == Backend::Sqlite && !name.starts_with('/') {
                params.database = Some(format!("/{name}"));
            }
        }

        let dsn = build_dsn(&params);

        #[cfg(feature = "tracing")]
        tracing::debug!(target: "sqlweave.sql", backend = backend.name(), dsn = %dsn, "database handler opened");

        Ok(Self { params, dsn })
    }

    /// Parse TOML parameters and open a handler.
    pub fn from_toml_str(raw: &str) -> QbResult<Self> {
        Self::new(ConnectionParams::from_toml_str(raw)?)
    }

    pub fn backend(&self) -> Backend {
        self.params.backend
    }

    pub fn dialect(&self) -> &'static dyn Dialect {
        self.params.backend.dialect()
    }

    pub fn params(&self) -> &ConnectionParams {
        &self.params
    }

    /// Database name after normalization.
    pub fn database_name(&self) -> Option<&str> {
        self.params.database.as_deref()
    }

    pub fn dsn(&self) -> &str {
        &self.dsn
    }

    pub fn has_feature(&self, feature: Feature) -> bool {
        self.dialect().supports_feature(feature)
    }

    /// `UnsupportedFeature` unless the backend supports `feature`.
    pub fn require_feature(&self, feature: Feature) -> QbResult<()> {
        if self.has_feature(feature) {
            Ok(())
        } else {
            Err(QbError::UnsupportedFeature {
                backend: self.backend(),
                feature: feature.to_string(),
            })
        }
    }

    /// Functions the connection must register before queries run, as
    /// `(name, argument count)`.
    pub fn required_functions(&self) -> &'static [(&'static str, usize)] {
        match self.backend() {
            Backend::Sqlite => SqliteDialect::REQUIRED_FUNCTIONS,
            _ => &[],
        }
    }

    /// A fresh SELECT builder for this backend.
    pub fn select(&self) -> QueryBuilder {
        QueryBuilder::new(self.dialect())
    }
}

fn build_dsn(params: &ConnectionParams) -> String {
    let backend = params.backend;
    let database = params.database.as_deref().unwrap_or_default();
    if backend == Backend::Sqlite {
        return format!("sqlite:{database}");
    }

    let mut dsn = format!("{}://", backend.name());
    if let Some(user) = &params.user {
        dsn.push_str(user);
        dsn.push('@');
    }
    dsn.push_str(params.host.as_deref().unwrap_or("localhost"));
    if let Some(port) = params.port {
        dsn.push(':');
        dsn.push_str(&port.to_string());
    }
    dsn.push('/');
    dsn.push_str(database);
    dsn
}
