//! Convenient imports for typical `sqlweave` usage.
//!
//! ```ignore
//! use sqlweave::prelude::*;
//! ```

pub use crate::{
    Backend, ConnectionParams, Database, Dialect, Executor, Expr, Feature, Func, Order, QbError,
    QbResult, QueryBuilder, Statement, Value, Var,
};
