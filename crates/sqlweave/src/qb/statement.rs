//! Prepared statement: rendered SQL plus live bindings.

use crate::client::Executor;
use crate::error::QbResult;
use crate::qb::param::Binding;
use crate::value::Value;

/// SQL text together with its bindings in placeholder order.
///
/// The text is fixed at `prepare()` time. Values are not: every call to
/// [`Statement::values`], [`Statement::execute`] or [`Statement::query`] reads
/// each binding's accessor again.
#[derive(Clone, Debug)]
pub struct Statement {
    sql: String,
    bindings: Vec<Binding>,
}

impl Statement {
    pub(crate) fn new(sql: String, bindings: Vec<Binding>) -> Self {
        Self { sql, bindings }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Resolve the current value of every binding.
    pub fn values(&self) -> Vec<Value> {
        self.bindings.iter().map(Binding::resolve).collect()
    }

    /// Execute and return the affected row count.
    pub async fn execute<E: Executor>(&self, executor: &E) -> QbResult<u64> {
        let values = self.values();

        #[cfg(feature = "tracing")]
        tracing::debug!(target: "sqlweave.sql", sql = %self.sql, params = values.len(), "execute");

        executor.execute(&self.sql, &values).await
    }

    /// Execute and return all rows.
    pub async fn query<E: Executor>(&self, executor: &E) -> QbResult<Vec<E::Row>> {
        let values = self.values();

        #[cfg(feature = "tracing")]
        tracing::debug!(target: "sqlweave.sql", sql = %self.sql, params = values.len(), "query");

        executor.query(&self.sql, &values).await
    }
}
