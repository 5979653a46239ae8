//! PostgreSQL dialect.

use super::{Backend, Dialect, Feature, Func, PlaceholderStyle, hex};

/// PostgreSQL dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl Dialect for PostgresDialect {
    fn backend(&self) -> Backend {
        Backend::Postgres
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Dollar
    }

    fn supports_feature(&self, feature: Feature) -> bool {
        // UPDATE ... FROM, but DELETE only joins through USING.
        matches!(feature, Feature::CrossTableUpdate | Feature::Returning)
    }

    fn render_bool(&self, value: bool) -> &'static str {
        if value { "TRUE" } else { "FALSE" }
    }

    fn render_bytes(&self, value: &[u8]) -> String {
        format!("'\\x{}'", hex(value, false))
    }

    fn render_function(&self, func: Func, args: &[String]) -> String {
        match func {
            Func::Now => "NOW()".to_string(),
            Func::Length => Func::call("LENGTH", args),
            _ => func.render_default(args),
        }
    }
}
