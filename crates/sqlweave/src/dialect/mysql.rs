//! MySQL/MariaDB dialect.
//!
//! Backtick quoting, `?` placeholders, and string escaping that also doubles
//! backslashes since MySQL treats `\` as an escape character by default.

use super::{Backend, Dialect, Feature, Func, PlaceholderStyle};

/// MySQL/MariaDB dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDialect;

impl Dialect for MySqlDialect {
    fn backend(&self) -> Backend {
        Backend::MySql
    }

    fn quote_identifier(&self, identifier: &str) -> String {
        format!("`{}`", identifier.replace('`', "``"))
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Question
    }

    fn dummy_table(&self) -> Option<&'static str> {
        Some("dual")
    }

    fn supports_feature(&self, feature: Feature) -> bool {
        matches!(feature, Feature::MultiTableDelete | Feature::CrossTableUpdate)
    }

    fn escape_string(&self, value: &str) -> String {
        format!("'{}'", value.replace('\\', "\\\\").replace('\'', "''"))
    }

    fn render_function(&self, func: Func, args: &[String]) -> String {
        match func {
            // `||` is logical OR unless PIPES_AS_CONCAT is set.
            Func::Concat => Func::call("CONCAT", args),
            Func::Now => "NOW()".to_string(),
            _ => func.render_default(args),
        }
    }
}
