//! Row limiting.
//!
//! Two strategies exist. Most backends take a trailing `LIMIT n OFFSET m`
//! fragment. Backends without native limiting (Oracle) need the complete inner
//! query as an opaque string, which is wrapped in a `ROWNUM` filter:
//!
//! ```text
//! SELECT * FROM ( SELECT a.*, ROWNUM rn FROM ( Q ) a WHERE ROWNUM <= offset+count ) WHERE rn >= offset+1
//! ```
//!
//! Both are applied only after every other clause has been rendered.

use crate::error::{QbError, QbResult};

/// Requested row window. Offsets are zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub count: u64,
    pub offset: u64,
}

impl Limit {
    pub fn new(count: u64, offset: u64) -> Self {
        Self { count, offset }
    }

    /// Validate signed user input: `count` must be positive, `offset` non-negative.
    pub fn try_new(count: i64, offset: i64) -> QbResult<Self> {
        if count <= 0 {
            return Err(QbError::invalid(format!(
                "limit count must be positive, got {count}"
            )));
        }
        if offset < 0 {
            return Err(QbError::invalid(format!(
                "limit offset must not be negative, got {offset}"
            )));
        }
        Ok(Self::new(count as u64, offset as u64))
    }

    /// First row number (1-based) inside the window.
    pub fn lower_bound(&self) -> u64 {
        self.offset + 1
    }

    /// Last row number (1-based) inside the window.
    pub fn upper_bound(&self) -> u64 {
        self.offset.saturating_add(self.count)
    }
}

/// How a dialect applies a [`Limit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitStrategy {
    /// Append `LIMIT n [OFFSET m]`.
    Trailing,
    /// Wrap the whole query in a ROWNUM window.
    Wrapping,
}

/// Apply `limit` to `inner` using `strategy`.
pub fn apply(strategy: LimitStrategy, inner: String, limit: Limit) -> String {
    match strategy {
        LimitStrategy::Trailing => trailing(inner, limit),
        LimitStrategy::Wrapping => wrap_rownum(&inner, limit),
    }
}

/// `inner LIMIT n`, plus `OFFSET m` when `m > 0`.
pub fn trailing(mut inner: String, limit: Limit) -> String {
    inner.push_str(" LIMIT ");
    inner.push_str(&limit.count.to_string());
    if limit.offset > 0 {
        inner.push_str(" OFFSET ");
        inner.push_str(&limit.offset.to_string());
    }
    inner
}

/// Nest `inner` inside a ROWNUM filter selecting rows
/// `offset + 1 ..= offset + count`.
pub fn wrap_rownum(inner: &str, limit: Limit) -> String {
    let min = limit.lower_bound();
    let max = limit.upper_bound();

    #[cfg(feature = "tracing")]
    tracing::trace!(target: "sqlweave.sql", min, max, "wrapping query in ROWNUM window");

    format!(
        "SELECT * FROM ( SELECT a.*, ROWNUM rn FROM ( {inner} ) a WHERE ROWNUM <= {max} ) WHERE rn >= {min}"
    )
}
