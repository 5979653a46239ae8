//! SELECT query builder with per-cycle clause validation.

use crate::dialect::Dialect;
use crate::error::{Clause, QbError, QbResult};
use crate::ident::render_name;
use crate::qb::expr::Expr;
use crate::qb::limit::Limit;
use crate::qb::param::{ParamBinder, ParamToken, Var};
use crate::qb::render::RenderCtx;
use crate::qb::statement::Statement;
use crate::value::Value;
use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;

/// Sort direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl Order {
    pub fn as_str(self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a [`QueryBuilder`].
///
/// `Empty` after construction or `reset()`, `PartiallyBuilt` once any clause is
/// declared, `Built` after a successful `build()` with no mutation since.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    Empty,
    PartiallyBuilt,
    Built,
}

/// SELECT builder bound to one dialect.
///
/// `select`, `from`, `where_`, `group_by` and `having` may each be declared
/// once per cycle; `order_by` accumulates distinct columns; `limit` is last
/// write wins. A rejected call leaves the builder untouched.
#[derive(Clone, Debug)]
pub struct QueryBuilder {
    dialect: &'static dyn Dialect,
    select: Option<Vec<Expr>>,
    from: Option<Vec<Expr>>,
    where_: Option<Expr>,
    group_by: Option<Vec<Expr>>,
    having: Option<Expr>,
    order_by: Vec<(String, Order)>,
    limit: Option<Limit>,
    /// Logical name -> real column name. Survives `reset`.
    aliases: HashMap<String, String>,
    /// Survives `reset`; bindings belong to statements, not clause state.
    binder: ParamBinder,
    built: Cell<bool>,
}

impl QueryBuilder {
    /// Create an empty builder rendering for `dialect`.
    pub fn new(dialect: &'static dyn Dialect) -> Self {
        Self {
            dialect,
            select: None,
            from: None,
            where_: None,
            group_by: None,
            having: None,
            order_by: Vec::new(),
            limit: None,
            aliases: HashMap::new(),
            binder: ParamBinder::new(),
            built: Cell::new(false),
        }
    }

    pub fn dialect(&self) -> &'static dyn Dialect {
        self.dialect
    }

    // ==================== Clauses ====================

    /// Declare the select list.
    pub fn select<I, E>(&mut self, cols: I) -> QbResult<&mut Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        let cols = collect_args(Clause::Select, cols)?;
        ensure_unset(Clause::Select, &self.select)?;
        self.select = Some(cols);
        Ok(self.touched())
    }

    /// Declare the sources (tables, subqueries, `alias()` fragments).
    pub fn from<I, E>(&mut self, sources: I) -> QbResult<&mut Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        let sources = collect_args(Clause::From, sources)?;
        ensure_unset(Clause::From, &self.from)?;
        self.from = Some(sources);
        Ok(self.touched())
    }

    /// Declare the WHERE predicate. Several predicates are ANDed.
    pub fn where_<I, E>(&mut self, predicates: I) -> QbResult<&mut Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        let predicate = conjunction(collect_args(Clause::Where, predicates)?);
        ensure_unset(Clause::Where, &self.where_)?;
        self.where_ = Some(predicate);
        Ok(self.touched())
    }

    /// Declare the GROUP BY columns.
    pub fn group_by<I, E>(&mut self, cols: I) -> QbResult<&mut Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        let cols = collect_args(Clause::GroupBy, cols)?;
        ensure_unset(Clause::GroupBy, &self.group_by)?;
        self.group_by = Some(cols);
        Ok(self.touched())
    }

    /// Declare the HAVING predicate. Several predicates are ANDed.
    pub fn having<I, E>(&mut self, predicates: I) -> QbResult<&mut Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        let predicate = conjunction(collect_args(Clause::Having, predicates)?);
        ensure_unset(Clause::Having, &self.having)?;
        self.having = Some(predicate);
        Ok(self.touched())
    }

    /// Append an ORDER BY column. Each column may appear once per cycle.
    pub fn order_by(&mut self, col: impl Into<String>, order: Order) -> QbResult<&mut Self> {
        let col = col.into();
        if col.trim().is_empty() {
            return Err(QbError::EmptyArgument {
                clause: Clause::OrderBy,
            });
        }
        if self.order_by.iter().any(|(c, _)| *c == col) {
            return Err(QbError::DuplicateClause {
                clause: Clause::OrderBy,
            });
        }
        self.order_by.push((col, order));
        Ok(self.touched())
    }

    // ==================== Pagination ====================

    /// Limit to `count` rows. Same as `limit_offset(count, 0)`.
    pub fn limit(&mut self, count: i64) -> QbResult<&mut Self> {
        self.limit_offset(count, 0)
    }

    /// Limit to `count` rows starting at zero-based `offset`. Overwrites any
    /// earlier limit.
    pub fn limit_offset(&mut self, count: i64, offset: i64) -> QbResult<&mut Self> {
        self.limit = Some(Limit::try_new(count, offset)?);
        Ok(self.touched())
    }

    /// Pagination helper. `page` is 1-based; both arguments must be >= 1.
    pub fn paginate(&mut self, page: i64, per_page: i64) -> QbResult<&mut Self> {
        if page < 1 {
            return Err(QbError::invalid(format!("page must be >= 1, got {page}")));
        }
        if per_page < 1 {
            return Err(QbError::invalid(format!(
                "per_page must be >= 1, got {per_page}"
            )));
        }
        let offset = (page - 1)
            .checked_mul(per_page)
            .ok_or_else(|| QbError::invalid(format!("page {page} overflows the row offset")))?;
        self.limit_offset(per_page, offset)
    }

    // ==================== Aliases & parameters ====================

    /// Configure the logical -> real column name table.
    pub fn set_aliases<I, K, V>(&mut self, aliases: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.aliases = aliases
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.built.set(false);
        self
    }

    pub fn aliases(&self) -> &HashMap<String, String> {
        &self.aliases
    }

    /// Render `name <sep> target` for embedding in `select`/`from`.
    ///
    /// `name` is resolved through the alias table first; the separator is the
    /// dialect's (` AS `, or a single space on Oracle).
    pub fn alias(&self, name: &str, target: &str) -> String {
        let ctx = RenderCtx::new(self.dialect, Some(&self.aliases));
        format!(
            "{}{}{}",
            ctx.column(name),
            self.dialect.alias_separator(),
            render_name(target, self.dialect)
        )
    }

    /// Register a live parameter. `accessor` runs on every execution.
    pub fn bind_param<F, V>(&mut self, accessor: F) -> ParamToken
    where
        F: Fn() -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        self.binder.bind(accessor)
    }

    /// Register a live parameter reading `var`.
    pub fn bind_var<T>(&mut self, var: &Var<T>) -> ParamToken
    where
        T: Clone + Into<Value> + Send + Sync + 'static,
    {
        self.binder.bind_var(var)
    }

    pub fn binder(&self) -> &ParamBinder {
        &self.binder
    }

    // ==================== Lifecycle ====================

    /// Clear all clause state. Aliases and bindings are kept.
    pub fn reset(&mut self) -> &mut Self {
        self.select = None;
        self.from = None;
        self.where_ = None;
        self.group_by = None;
        self.having = None;
        self.order_by.clear();
        self.limit = None;
        self.built.set(false);

        #[cfg(feature = "tracing")]
        tracing::trace!(target: "sqlweave.sql", dialect = self.dialect.name(), "query builder reset");

        self
    }

    pub fn state(&self) -> BuildState {
        if self.built.get() {
            BuildState::Built
        } else if self.has_clauses() {
            BuildState::PartiallyBuilt
        } else {
            BuildState::Empty
        }
    }

    fn has_clauses(&self) -> bool {
        self.select.is_some()
            || self.from.is_some()
            || self.where_.is_some()
            || self.group_by.is_some()
            || self.having.is_some()
            || !self.order_by.is_empty()
            || self.limit.is_some()
    }

    fn touched(&mut self) -> &mut Self {
        self.built.set(false);
        self
    }

    // ==================== Rendering ====================

    /// Render the SQL text. Repeated calls return identical strings.
    pub fn build(&self) -> QbResult<String> {
        let (sql, _) = self.render()?;
        self.built.set(true);

        #[cfg(feature = "tracing")]
        tracing::debug!(target: "sqlweave.sql", dialect = self.dialect.name(), sql = %sql, "built query");

        Ok(sql)
    }

    /// Alias for [`QueryBuilder::build`].
    pub fn get_query(&self) -> QbResult<String> {
        self.build()
    }

    /// Render and pair the SQL with its bindings in placeholder order.
    pub fn prepare(&self) -> QbResult<Statement> {
        let (sql, order) = self.render()?;
        let bindings = order
            .into_iter()
            .map(|token| {
                self.binder.get(token).cloned().ok_or_else(|| {
                    QbError::invalid(format!("parameter {token} is not bound on this builder"))
                })
            })
            .collect::<QbResult<Vec<_>>>()?;
        self.built.set(true);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "sqlweave.sql",
            dialect = self.dialect.name(),
            sql = %sql,
            params = bindings.len(),
            "prepared statement"
        );

        Ok(Statement::new(sql, bindings))
    }

    /// Single render pass; placeholder order follows the SQL text.
    fn render(&self) -> QbResult<(String, Vec<ParamToken>)> {
        let select = self.select.as_ref().ok_or(QbError::MissingClause {
            clause: Clause::Select,
        })?;
        let mut ctx = RenderCtx::new(self.dialect, Some(&self.aliases));

        let mut sql = String::from("SELECT ");
        sql.push_str(&render_list(select, &mut ctx));

        match &self.from {
            Some(sources) => {
                sql.push_str(" FROM ");
                sql.push_str(&render_list(sources, &mut ctx));
            }
            None => {
                if let Some(dummy) = self.dialect.dummy_table() {
                    sql.push_str(" FROM ");
                    sql.push_str(dummy);
                }
            }
        }

        if let Some(predicate) = &self.where_ {
            sql.push_str(" WHERE ");
            sql.push_str(&predicate.render(&mut ctx));
        }

        if let Some(cols) = &self.group_by {
            sql.push_str(" GROUP BY ");
            sql.push_str(&render_list(cols, &mut ctx));
        }

        if let Some(predicate) = &self.having {
            sql.push_str(" HAVING ");
            sql.push_str(&predicate.render(&mut ctx));
        }

        if !self.order_by.is_empty() {
            let parts: Vec<String> = self
                .order_by
                .iter()
                .map(|(col, order)| format!("{} {}", ctx.column(col), order))
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&parts.join(", "));
        }

        if let Some(limit) = self.limit {
            sql = self.dialect.render_limit(sql, limit);
        }

        Ok((sql, ctx.into_order()))
    }
}

fn collect_args<I, E>(clause: Clause, args: I) -> QbResult<Vec<Expr>>
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    let args: Vec<Expr> = args.into_iter().map(Into::into).collect();
    if args.is_empty() {
        return Err(QbError::EmptyArgument { clause });
    }
    Ok(args)
}

fn ensure_unset<T>(clause: Clause, slot: &Option<T>) -> QbResult<()> {
    if slot.is_some() {
        return Err(QbError::DuplicateClause { clause });
    }
    Ok(())
}

fn conjunction(mut predicates: Vec<Expr>) -> Expr {
    if predicates.len() == 1 {
        predicates.remove(0)
    } else {
        Expr::And(predicates)
    }
}

fn render_list(items: &[Expr], ctx: &mut RenderCtx<'_>) -> String {
    let parts: Vec<String> = items.iter().map(|e| e.render(ctx)).collect();
    parts.join(", ")
}
