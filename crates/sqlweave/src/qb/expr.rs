//! Expression layer for WHERE/HAVING predicates and select items.
//!
//! [`Expr`] is a dialect-independent tree, built bottom-up and immutable once
//! constructed. Rendering happens against a dialect: columns are alias-resolved
//! and quoted when needed, literals are escaped per type, functions are
//! translated, and bound parameters become the dialect's placeholders.
//!
//! Operands convert via `Into<Expr>`: `&str`/`String` are column references (or
//! SQL fragments such as `COUNT(*)`), numbers and booleans are literals, a
//! [`ParamToken`] is a bound parameter. Use [`Expr::lit`] for string literals.

use crate::dialect::{Dialect, Func};
use crate::ident::Ident;
use crate::qb::param::ParamToken;
use crate::qb::render::RenderCtx;
use crate::value::Value;
use std::fmt;

/// Binary comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    NotLike,
}

impl CompareOp {
    pub fn as_str(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
            CompareOp::Like => "LIKE",
            CompareOp::NotLike => "NOT LIKE",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expression node.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// AND group: all conditions must be true.
    And(Vec<Expr>),

    /// OR group: at least one condition must be true.
    Or(Vec<Expr>),

    /// NOT: negate the inner expression.
    Not(Box<Expr>),

    /// `left op right`
    Compare {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// `expr IS [NOT] NULL`
    NullCheck { expr: Box<Expr>, is_null: bool },

    /// `expr [NOT] IN (values...)`
    InList {
        expr: Box<Expr>,
        values: Vec<Expr>,
        negated: bool,
    },

    /// `expr [NOT] BETWEEN from AND to`
    Between {
        expr: Box<Expr>,
        from: Box<Expr>,
        to: Box<Expr>,
        negated: bool,
    },

    /// Logical function call, translated by the dialect.
    Func { func: Func, args: Vec<Expr> },

    /// `expr AS alias` (separator chosen by the dialect).
    Alias { expr: Box<Expr>, alias: String },

    /// Column reference or SQL fragment, alias-resolved on render.
    Column(String),

    /// Explicit identifier.
    Ident(Ident),

    /// Inline literal.
    Literal(Value),

    /// Bound parameter placeholder.
    Param(ParamToken),

    /// Raw SQL fragment, emitted verbatim.
    Raw(String),

    /// Always true.
    True,

    /// Always false.
    False,
}

impl Expr {
    /// Create an AND expression from a list of expressions.
    pub fn and(exprs: impl IntoIterator<Item = Expr>) -> Self {
        Expr::And(exprs.into_iter().collect())
    }

    /// Create an OR expression from a list of expressions.
    pub fn or(exprs: impl IntoIterator<Item = Expr>) -> Self {
        Expr::Or(exprs.into_iter().collect())
    }

    /// Create a NOT expression.
    #[allow(clippy::should_implement_trait)]
    pub fn not(expr: impl Into<Expr>) -> Self {
        Expr::Not(Box::new(expr.into()))
    }

    pub fn compare(op: CompareOp, left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Expr::Compare {
            op,
            left: Box::new(left.into()),
            right: Box::new(right.into()),
        }
    }

    /// `left = right`
    pub fn eq(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Self::compare(CompareOp::Eq, left, right)
    }

    /// `left <> right`
    pub fn neq(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Self::compare(CompareOp::Ne, left, right)
    }

    /// `left > right`
    pub fn gt(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Self::compare(CompareOp::Gt, left, right)
    }

    /// `left >= right`
    pub fn gte(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Self::compare(CompareOp::Gte, left, right)
    }

    /// `left < right`
    pub fn lt(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Self::compare(CompareOp::Lt, left, right)
    }

    /// `left <= right`
    pub fn lte(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Self::compare(CompareOp::Lte, left, right)
    }

    /// `left LIKE pattern`
    pub fn like(left: impl Into<Expr>, pattern: impl Into<Expr>) -> Self {
        Self::compare(CompareOp::Like, left, pattern)
    }

    /// `left NOT LIKE pattern`
    pub fn not_like(left: impl Into<Expr>, pattern: impl Into<Expr>) -> Self {
        Self::compare(CompareOp::NotLike, left, pattern)
    }

    /// `expr IS NULL`
    pub fn is_null(expr: impl Into<Expr>) -> Self {
        Expr::NullCheck {
            expr: Box::new(expr.into()),
            is_null: true,
        }
    }

    /// `expr IS NOT NULL`
    pub fn is_not_null(expr: impl Into<Expr>) -> Self {
        Expr::NullCheck {
            expr: Box::new(expr.into()),
            is_null: false,
        }
    }

    /// `expr IN (values...)`; an empty list is always false.
    pub fn in_list<V: Into<Expr>>(expr: impl Into<Expr>, values: impl IntoIterator<Item = V>) -> Self {
        let values: Vec<Expr> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Expr::False;
        }
        Expr::InList {
            expr: Box::new(expr.into()),
            values,
            negated: false,
        }
    }

    /// `expr NOT IN (values...)`; an empty list is always true.
    pub fn not_in<V: Into<Expr>>(expr: impl Into<Expr>, values: impl IntoIterator<Item = V>) -> Self {
        let values: Vec<Expr> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Expr::True;
        }
        Expr::InList {
            expr: Box::new(expr.into()),
            values,
            negated: true,
        }
    }

    /// `expr BETWEEN from AND to`
    pub fn between(expr: impl Into<Expr>, from: impl Into<Expr>, to: impl Into<Expr>) -> Self {
        Expr::Between {
            expr: Box::new(expr.into()),
            from: Box::new(from.into()),
            to: Box::new(to.into()),
            negated: false,
        }
    }

    /// `expr NOT BETWEEN from AND to`
    pub fn not_between(
        expr: impl Into<Expr>,
        from: impl Into<Expr>,
        to: impl Into<Expr>,
    ) -> Self {
        Expr::Between {
            expr: Box::new(expr.into()),
            from: Box::new(from.into()),
            to: Box::new(to.into()),
            negated: true,
        }
    }

    /// Function call with arbitrary arguments; no arity check.
    pub fn func<A: Into<Expr>>(func: Func, args: impl IntoIterator<Item = A>) -> Self {
        Expr::Func {
            func,
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// String concatenation of all arguments.
    pub fn concat<A: Into<Expr>>(args: impl IntoIterator<Item = A>) -> Self {
        Self::func(Func::Concat, args)
    }

    /// Remainder of `dividend / divisor`.
    pub fn modulo(dividend: impl Into<Expr>, divisor: impl Into<Expr>) -> Self {
        Self::func(Func::Mod, [dividend.into(), divisor.into()])
    }

    /// Current date/time.
    pub fn now() -> Self {
        Self::func(Func::Now, Vec::<Expr>::new())
    }

    /// MD5 hash of `expr`.
    pub fn md5(expr: impl Into<Expr>) -> Self {
        Self::func(Func::Md5, [expr.into()])
    }

    /// `expr <sep> alias`
    pub fn alias(expr: impl Into<Expr>, alias: impl Into<String>) -> Self {
        Expr::Alias {
            expr: Box::new(expr.into()),
            alias: alias.into(),
        }
    }

    /// Column reference (or SQL fragment).
    pub fn col(name: impl Into<String>) -> Self {
        Expr::Column(name.into())
    }

    /// Literal value, e.g. `Expr::lit("Norway")`.
    pub fn lit(value: impl Into<Value>) -> Self {
        Expr::Literal(value.into())
    }

    /// Raw SQL fragment.
    pub fn raw(sql: impl Into<String>) -> Self {
        Expr::Raw(sql.into())
    }

    fn is_compound(&self) -> bool {
        matches!(
            self,
            Expr::And(_)
                | Expr::Or(_)
                | Expr::Not(_)
                | Expr::Compare { .. }
                | Expr::NullCheck { .. }
                | Expr::InList { .. }
                | Expr::Between { .. }
        )
    }

    /// The group that actually renders: one-element `And`/`Or` print as their
    /// only child.
    fn flattened(&self) -> &Expr {
        match self {
            Expr::And(v) | Expr::Or(v) if v.len() == 1 => v[0].flattened(),
            _ => self,
        }
    }

    /// Render for `dialect` without an alias table (debugging helper).
    ///
    /// Placeholders are numbered from the first one found in this expression.
    pub fn to_sql(&self, dialect: &dyn Dialect) -> String {
        let mut ctx = RenderCtx::new(dialect, None);
        self.render(&mut ctx)
    }

    pub(crate) fn render(&self, ctx: &mut RenderCtx<'_>) -> String {
        match self {
            Expr::And(exprs) => render_group(exprs, " AND ", "1 = 1", ctx, |e| {
                matches!(e.flattened(), Expr::Or(v) if v.len() > 1)
            }),
            Expr::Or(exprs) => render_group(exprs, " OR ", "1 = 0", ctx, |e| {
                matches!(e.flattened(), Expr::And(v) if v.len() > 1)
            }),
            Expr::Not(inner) => format!("NOT ({})", inner.render(ctx)),
            Expr::Compare { op, left, right } => {
                let l = render_operand(left, ctx);
                let r = render_operand(right, ctx);
                format!("{l} {op} {r}")
            }
            Expr::NullCheck { expr, is_null } => {
                let e = render_operand(expr, ctx);
                if *is_null {
                    format!("{e} IS NULL")
                } else {
                    format!("{e} IS NOT NULL")
                }
            }
            Expr::InList {
                expr,
                values,
                negated,
            } => {
                let e = render_operand(expr, ctx);
                let items: Vec<String> = values.iter().map(|v| render_operand(v, ctx)).collect();
                let op = if *negated { "NOT IN" } else { "IN" };
                format!("{e} {op} ({})", items.join(", "))
            }
            Expr::Between {
                expr,
                from,
                to,
                negated,
            } => {
                let e = render_operand(expr, ctx);
                let f = render_operand(from, ctx);
                let t = render_operand(to, ctx);
                let op = if *negated { "NOT BETWEEN" } else { "BETWEEN" };
                format!("{e} {op} {f} AND {t}")
            }
            Expr::Func { func, args } => {
                let args: Vec<String> = args.iter().map(|a| render_operand(a, ctx)).collect();
                ctx.dialect.render_function(*func, &args)
            }
            Expr::Alias { expr, alias } => {
                let inner = render_operand(expr, ctx);
                let sep = ctx.dialect.alias_separator();
                format!("{inner}{sep}{}", crate::ident::render_name(alias, ctx.dialect))
            }
            Expr::Column(name) => ctx.column(name),
            Expr::Ident(ident) => ident.render(ctx.dialect),
            Expr::Literal(value) => value.to_literal(ctx.dialect),
            Expr::Param(token) => ctx.placeholder(*token),
            Expr::Raw(sql) => sql.clone(),
            Expr::True => "1 = 1".to_string(),
            Expr::False => "1 = 0".to_string(),
        }
    }
}

fn render_operand(expr: &Expr, ctx: &mut RenderCtx<'_>) -> String {
    let sql = expr.render(ctx);
    if expr.is_compound() {
        format!("({sql})")
    } else {
        sql
    }
}

fn render_group(
    exprs: &[Expr],
    sep: &str,
    empty: &str,
    ctx: &mut RenderCtx<'_>,
    needs_parens: impl Fn(&Expr) -> bool,
) -> String {
    if exprs.is_empty() {
        return empty.to_string();
    }
    let parts: Vec<String> = exprs
        .iter()
        .map(|e| {
            let sql = e.render(ctx);
            if needs_parens(e) {
                format!("({sql})")
            } else {
                sql
            }
        })
        .collect();
    parts.join(sep)
}

impl From<&str> for Expr {
    fn from(name: &str) -> Self {
        Expr::Column(name.to_string())
    }
}

impl From<String> for Expr {
    fn from(name: String) -> Self {
        Expr::Column(name)
    }
}

impl From<&String> for Expr {
    fn from(name: &String) -> Self {
        Expr::Column(name.clone())
    }
}

impl From<Ident> for Expr {
    fn from(ident: Ident) -> Self {
        Expr::Ident(ident)
    }
}

impl From<ParamToken> for Expr {
    fn from(token: ParamToken) -> Self {
        Expr::Param(token)
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::Literal(value)
    }
}

macro_rules! impl_from_literal {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Expr {
                fn from(v: $t) -> Self {
                    Expr::Literal(Value::from(v))
                }
            }
        )*
    };
}

impl_from_literal!(i8, i16, i32, i64, u8, u16, u32, f32, f64, bool);
