//! Logical SQL functions.
//!
//! Not every backend spells these the same way (`MOD(a, b)` vs `a % b`,
//! `CONCAT` vs `||`), so expressions carry a [`Func`] and each dialect decides
//! how it is rendered.

use std::fmt;

/// A function known to the expression builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Func {
    Concat,
    Mod,
    Now,
    Md5,
    Lower,
    Upper,
    Length,
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl Func {
    /// Logical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Func::Concat => "concat",
            Func::Mod => "mod",
            Func::Now => "now",
            Func::Md5 => "md5",
            Func::Lower => "lower",
            Func::Upper => "upper",
            Func::Length => "length",
            Func::Count => "count",
            Func::Sum => "sum",
            Func::Avg => "avg",
            Func::Min => "min",
            Func::Max => "max",
        }
    }

    /// Plain call syntax: `NAME(a, b)`.
    pub fn call(name: &str, args: &[String]) -> String {
        format!("{}({})", name, args.join(", "))
    }

    /// ANSI-flavoured rendering used by dialects that do not override it.
    pub fn render_default(self, args: &[String]) -> String {
        match self {
            Func::Concat => format!("({})", args.join(" || ")),
            Func::Mod => Func::call("MOD", args),
            Func::Now => "CURRENT_TIMESTAMP".to_string(),
            Func::Md5 => Func::call("MD5", args),
            Func::Length => Func::call("CHAR_LENGTH", args),
            Func::Count if args.is_empty() => "COUNT(*)".to_string(),
            _ => Func::call(&self.name().to_ascii_uppercase(), args),
        }
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
