//! Oracle dialect.
//!
//! Oracle has no `LIMIT` clause, so it uses [`LimitStrategy::Wrapping`]: the
//! finished query is nested inside a `ROWNUM` filter. Table aliases may not use
//! `AS`, so aliases are separated by a single space.

use super::{Backend, Dialect, Func, PlaceholderStyle, hex};
use crate::qb::limit::LimitStrategy;

/// Oracle dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct OracleDialect;

impl Dialect for OracleDialect {
    fn backend(&self) -> Backend {
        Backend::Oracle
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Colon
    }

    fn dummy_table(&self) -> Option<&'static str> {
        Some("dual")
    }

    fn limit_strategy(&self) -> LimitStrategy {
        LimitStrategy::Wrapping
    }

    fn alias_separator(&self) -> &'static str {
        " "
    }

    fn render_bytes(&self, value: &[u8]) -> String {
        format!("HEXTORAW('{}')", hex(value, true))
    }

    fn render_function(&self, func: Func, args: &[String]) -> String {
        match func {
            Func::Now => "SYSDATE".to_string(),
            Func::Md5 => format!(
                "LOWER(RAWTOHEX(STANDARD_HASH({}, 'MD5')))",
                args.join(", ")
            ),
            Func::Length => Func::call("LENGTH", args),
            _ => func.render_default(args),
        }
    }
}
