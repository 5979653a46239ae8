//! Backend dialects.
//!
//! A [`Dialect`] is an immutable capability descriptor plus the handful of
//! rendering decisions that differ between backend families: identifier
//! quoting, placeholders, the dummy table used for table-less SELECTs, literal
//! spelling, function translation and, most importantly, row limiting.
//!
//! Every backend has one `'static` instance, reachable through
//! [`Backend::dialect`], which can be shared freely between builders.

mod func;
mod mysql;
mod oracle;
mod postgres;
mod sqlite;
mod standard;

pub use func::Func;
pub use mysql::MySqlDialect;
pub use oracle::OracleDialect;
pub use postgres::PostgresDialect;
pub use sqlite::SqliteDialect;
pub use standard::StandardDialect;

use crate::error::QbError;
use crate::qb::limit::{self, Limit, LimitStrategy};
use crate::value::Temporal;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Backend families with a built-in dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[serde(alias = "ansi")]
    Standard,
    #[serde(alias = "postgresql", alias = "pgsql")]
    Postgres,
    #[serde(alias = "mariadb")]
    MySql,
    #[serde(alias = "sqlite3")]
    Sqlite,
    #[serde(alias = "oci")]
    Oracle,
}

impl Backend {
    /// The shared dialect instance for this backend.
    pub fn dialect(self) -> &'static dyn Dialect {
        match self {
            Backend::Standard => &StandardDialect,
            Backend::Postgres => &PostgresDialect,
            Backend::MySql => &MySqlDialect,
            Backend::Sqlite => &SqliteDialect,
            Backend::Oracle => &OracleDialect,
        }
    }

    /// Short lowercase name, as used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Backend::Standard => "standard",
            Backend::Postgres => "postgres",
            Backend::MySql => "mysql",
            Backend::Sqlite => "sqlite",
            Backend::Oracle => "oracle",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = QbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" | "ansi" => Ok(Backend::Standard),
            "postgres" | "postgresql" | "pgsql" => Ok(Backend::Postgres),
            "mysql" | "mariadb" => Ok(Backend::MySql),
            "sqlite" | "sqlite3" => Ok(Backend::Sqlite),
            "oracle" | "oci" => Ok(Backend::Oracle),
            other => Err(QbError::config(format!("unknown backend '{other}'"))),
        }
    }
}

/// Named capabilities that higher-level code may query before emitting
/// backend-exclusive statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// `DELETE` that references more than one table.
    MultiTableDelete,
    /// `UPDATE` that joins or reads from other tables.
    CrossTableUpdate,
    /// `RETURNING` on data-modifying statements.
    Returning,
}

impl Feature {
    pub fn name(self) -> &'static str {
        match self {
            Feature::MultiTableDelete => "multi-table-delete",
            Feature::CrossTableUpdate => "cross-table-update",
            Feature::Returning => "returning",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = QbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multi-table-delete" => Ok(Feature::MultiTableDelete),
            "cross-table-update" => Ok(Feature::CrossTableUpdate),
            "returning" => Ok(Feature::Returning),
            other => Err(QbError::invalid(format!("unknown feature '{other}'"))),
        }
    }
}

/// How bound parameters are spelled in rendered SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// `?`, one binding per occurrence.
    Question,
    /// `$1, $2, ...`
    Dollar,
    /// `:p1, :p2, ...`
    Colon,
}

impl PlaceholderStyle {
    /// Whether placeholders carry a number (and can therefore be repeated).
    pub fn is_numbered(self) -> bool {
        !matches!(self, PlaceholderStyle::Question)
    }

    /// Render the placeholder for the given 1-based position.
    pub fn render(self, position: usize) -> String {
        match self {
            PlaceholderStyle::Question => "?".to_string(),
            PlaceholderStyle::Dollar => format!("${position}"),
            PlaceholderStyle::Colon => format!(":p{position}"),
        }
    }
}

/// Trait for database-specific SQL generation
pub trait Dialect: Send + Sync + fmt::Debug {
    /// The backend family this dialect renders for.
    fn backend(&self) -> Backend;

    fn name(&self) -> &'static str {
        self.backend().name()
    }

    /// Quote an identifier part unconditionally.
    fn quote_identifier(&self, identifier: &str) -> String {
        format!("\"{}\"", identifier.replace('"', "\"\""))
    }

    fn placeholder_style(&self) -> PlaceholderStyle;

    /// Generate a parameter placeholder for the given 1-based position
    fn placeholder(&self, position: usize) -> String {
        self.placeholder_style().render(position)
    }

    /// Table to select from when the query declares no source, if the backend
    /// needs one.
    fn dummy_table(&self) -> Option<&'static str> {
        None
    }

    fn supports_feature(&self, feature: Feature) -> bool {
        let _ = feature;
        false
    }

    /// Feature check by name; unknown names are unsupported.
    fn supports_feature_name(&self, name: &str) -> bool {
        name.parse::<Feature>()
            .map(|f| self.supports_feature(f))
            .unwrap_or(false)
    }

    fn limit_strategy(&self) -> LimitStrategy {
        LimitStrategy::Trailing
    }

    /// Apply row limiting to a fully composed query.
    fn render_limit(&self, inner: String, limit: Limit) -> String {
        limit::apply(self.limit_strategy(), inner, limit)
    }

    /// Text placed between an expression and its alias.
    fn alias_separator(&self) -> &'static str {
        " AS "
    }

    fn render_bool(&self, value: bool) -> &'static str {
        if value { "1" } else { "0" }
    }

    /// Render a quoted string literal.
    fn escape_string(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    fn render_bytes(&self, value: &[u8]) -> String {
        format!("X'{}'", hex(value, true))
    }

    fn render_temporal(&self, kind: Temporal, text: &str) -> String {
        match kind {
            Temporal::Date => format!("DATE '{text}'"),
            Temporal::Timestamp => format!("TIMESTAMP '{text}'"),
        }
    }

    /// Translate a logical function call into this backend's spelling.
    fn render_function(&self, func: Func, args: &[String]) -> String {
        func.render_default(args)
    }
}

pub(crate) fn hex(bytes: &[u8], upper: bool) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        if upper {
            out.push_str(&format!("{b:02X}"));
        } else {
            out.push_str(&format!("{b:02x}"));
        }
    }
    out
}
