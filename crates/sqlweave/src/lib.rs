//! # sqlweave
//!
//! A dialect-portable SQL SELECT builder.
//!
//! ## Features
//!
//! - **One API, many backends**: Standard SQL, PostgreSQL, MySQL, SQLite and Oracle
//! - **Row limiting per backend**: trailing `LIMIT/OFFSET`, or a full `ROWNUM`
//!   rewrite around the finished query on Oracle
//! - **Strict clause discipline**: duplicate or empty clause calls fail at the call
//! - **Live parameters**: prepared statements re-read caller variables on every run
//! - **Feature queries**: ask a dialect whether it can do multi-table deletes,
//!   cross-table updates or `RETURNING` before emitting them
//!
//! ## Query Builder (qb)
//!
//! ```ignore
//! use sqlweave::prelude::*;
//!
//! let db = Database::new(ConnectionParams::new(Backend::Sqlite).database("app.db"))?;
//! let section = Var::new("Norway".to_string());
//!
//! let mut q = db.select();
//! let p = q.bind_var(&section);
//! q.select(["company", "SUM(employees)"])?
//!     .from(["query_test"])?
//!     .where_([Expr::eq("section", p)])?
//!     .group_by(["company"])?
//!     .limit(10)?;
//!
//! let stmt = q.prepare()?;
//! let rows = stmt.query(&client).await?;
//! section.set("Ukraine".to_string());
//! let rows = stmt.query(&client).await?;
//! ```

pub mod client;
pub mod config;
pub mod database;
pub mod dialect;
pub mod error;
pub mod ident;
pub mod prelude;
pub mod qb;
pub mod value;

pub use client::Executor;
pub use config::ConnectionParams;
pub use database::Database;
pub use dialect::{
    Backend, Dialect, Feature, Func, MySqlDialect, OracleDialect, PlaceholderStyle,
    PostgresDialect, SqliteDialect, StandardDialect,
};
pub use error::{Clause, QbError, QbResult};
pub use ident::{Ident, IdentPart};
pub use value::Value;

// Re-export qb module for easy access
pub use qb::{
    BuildState, Expr, Limit, Order, ParamToken, QueryBuilder, Statement, Var, select,
};
