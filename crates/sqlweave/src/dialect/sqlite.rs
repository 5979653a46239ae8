//! SQLite dialect.
//!
//! SQLite lacks `md5()` and `now()`; the connection layer is expected to
//! register them (see [`SqliteDialect::REQUIRED_FUNCTIONS`]) before queries
//! using those functions run. `mod` and `concat` map to native operators.

use super::{Backend, Dialect, Feature, Func, PlaceholderStyle};
use crate::value::Temporal;

/// SQLite dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl SqliteDialect {
    /// Functions emitted by this dialect that must be registered on the
    /// connection, as `(name, argument count)`.
    pub const REQUIRED_FUNCTIONS: &'static [(&'static str, usize)] = &[("md5", 1), ("now", 0)];
}

impl Dialect for SqliteDialect {
    fn backend(&self) -> Backend {
        Backend::Sqlite
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Question
    }

    fn supports_feature(&self, feature: Feature) -> bool {
        matches!(feature, Feature::MultiTableDelete | Feature::CrossTableUpdate)
    }

    fn render_temporal(&self, _kind: Temporal, text: &str) -> String {
        self.escape_string(text)
    }

    fn render_function(&self, func: Func, args: &[String]) -> String {
        match func {
            Func::Mod => format!("({})", args.join(" % ")),
            Func::Now => "now()".to_string(),
            Func::Md5 => Func::call("md5", args),
            Func::Length => Func::call("LENGTH", args),
            _ => func.render_default(args),
        }
    }
}
