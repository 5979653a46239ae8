//! SELECT query builder.
//!
//! # Features
//!
//! - **One call per clause**: `select`, `from`, `where_`, `group_by` and `having`
//!   are declared once per cycle; a second call is an error, not a merge
//! - **Dialect at render time**: quoting, placeholders, literals, function
//!   spellings and row limiting are decided by the dialect only in `build()`
//! - **Reusable**: `reset()` clears clause state, replaying the same calls
//!   renders byte-identical SQL
//! - **Live parameters**: bound accessors are re-read on every execution
//!
//! # Usage
//!
//! ```ignore
//! use sqlweave::qb::{self, Expr, Order};
//! use sqlweave::Backend;
//!
//! let mut q = qb::select(Backend::Oracle.dialect());
//! q.select(["company", "SUM(employees)"])?
//!     .from(["query_test"])?
//!     .where_([Expr::eq(1, 1)])?
//!     .group_by(["company"])?
//!     .order_by("company", Order::Desc)?
//!     .limit(1)?;
//! let sql = q.build()?;
//! ```

mod expr;
pub(crate) mod limit;
mod param;
mod render;
mod select;
mod statement;

pub use expr::{CompareOp, Expr};
pub use limit::{Limit, LimitStrategy, wrap_rownum};
pub use param::{Binding, ParamBinder, ParamToken, Var};
pub use select::{BuildState, Order, QueryBuilder};
pub use statement::Statement;

use crate::dialect::Dialect;

/// Create a SELECT builder for `dialect`.
///
/// # Example
/// ```ignore
/// let q = sqlweave::qb::select(sqlweave::Backend::Postgres.dialect());
/// ```
pub fn select(dialect: &'static dyn Dialect) -> QueryBuilder {
    QueryBuilder::new(dialect)
}

#[cfg(test)]
mod tests;
