//! Execution seam.
//!
//! The builder never talks to a database itself. A [`Statement`] hands its SQL
//! text and freshly resolved values to an [`Executor`], which owns the
//! connection, the transaction and row materialization.
//!
//! [`Statement`]: crate::qb::Statement

use crate::error::QbResult;
use crate::value::Value;

/// Anything that can run rendered SQL with positional values.
///
/// `params` are in placeholder order: the i-th value belongs to `$i` / `:pi`,
/// or to the i-th `?`.
pub trait Executor: Send + Sync {
    /// Row type returned by [`Executor::query`].
    type Row: Send;

    /// Execute a statement and return the number of affected rows.
    fn execute(
        &self,
        sql: &str,
        params: &[Value],
    ) -> impl std::future::Future<Output = QbResult<u64>> + Send;

    /// Execute a query and return all rows.
    fn query(
        &self,
        sql: &str,
        params: &[Value],
    ) -> impl std::future::Future<Output = QbResult<Vec<Self::Row>>> + Send;
}

#[cfg(feature = "postgres")]
mod pg {
    use super::Executor;
    use crate::error::QbResult;
    use crate::value::Value;
    use tokio_postgres::Row;
    use tokio_postgres::types::ToSql;

    fn as_params(values: &[Value]) -> Vec<&(dyn ToSql + Sync)> {
        values.iter().map(|v| v as &(dyn ToSql + Sync)).collect()
    }

    impl Executor for tokio_postgres::Client {
        type Row = Row;

        async fn execute(&self, sql: &str, params: &[Value]) -> QbResult<u64> {
            let params = as_params(params);
            Ok(tokio_postgres::Client::execute(self, sql, &params).await?)
        }

        async fn query(&self, sql: &str, params: &[Value]) -> QbResult<Vec<Row>> {
            let params = as_params(params);
            Ok(tokio_postgres::Client::query(self, sql, &params).await?)
        }
    }

    impl Executor for tokio_postgres::Transaction<'_> {
        type Row = Row;

        async fn execute(&self, sql: &str, params: &[Value]) -> QbResult<u64> {
            let params = as_params(params);
            Ok(tokio_postgres::Transaction::execute(self, sql, &params).await?)
        }

        async fn query(&self, sql: &str, params: &[Value]) -> QbResult<Vec<Row>> {
            let params = as_params(params);
            Ok(tokio_postgres::Transaction::query(self, sql, &params).await?)
        }
    }
}
