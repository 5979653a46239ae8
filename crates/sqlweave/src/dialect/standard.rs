//! ANSI SQL dialect.
//!
//! Used when no specific backend is targeted. Row limiting uses the trailing
//! `LIMIT n OFFSET m` form understood by most engines.

use super::{Backend, Dialect, PlaceholderStyle};

/// Generic, standards-leaning dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardDialect;

impl Dialect for StandardDialect {
    fn backend(&self) -> Backend {
        Backend::Standard
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Question
    }

    fn render_bool(&self, value: bool) -> &'static str {
        if value { "TRUE" } else { "FALSE" }
    }
}
