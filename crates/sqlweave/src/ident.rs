//! SQL identifier handling.
//!
//! [`Ident`] represents a (possibly dotted) identifier such as
//! `schema.table.column`. Parts are either plain (`[A-Za-z_][A-Za-z0-9_$]*`,
//! rendered bare) or quoted (any characters except NUL, rendered through the
//! dialect's quoting rule). Both `"..."` and `` `...` `` are accepted as input
//! quotes, so the same identifier text can be rendered for any backend.
//!
//! Strings that are not identifier-shaped (`COUNT(*)`, `a.*`, `1`) are treated
//! by the builder as SQL fragments and passed through unchanged.

use crate::dialect::Dialect;
use crate::error::{QbError, QbResult};

/// A part of a SQL identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentPart {
    /// Plain identifier: matches `[A-Za-z_][A-Za-z0-9_$]*`.
    Plain(String),
    /// Quoted identifier: any characters except NUL.
    Quoted(String),
}

impl IdentPart {
    pub fn name(&self) -> &str {
        match self {
            IdentPart::Plain(s) | IdentPart::Quoted(s) => s,
        }
    }
}

/// A SQL identifier (column, table, or schema name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub parts: Vec<IdentPart>,
}

impl Ident {
    /// A single identifier that is always quoted on render.
    pub fn quoted(name: &str) -> QbResult<Self> {
        if name.is_empty() {
            return Err(QbError::invalid("Empty quoted identifier"));
        }
        if name.contains('\0') {
            return Err(QbError::invalid("Identifier cannot contain NUL character"));
        }
        Ok(Self {
            parts: vec![IdentPart::Quoted(name.to_string())],
        })
    }

    /// Parse an identifier string, supporting dotted and quoted forms.
    ///
    /// - Dotted: `schema.table.column`
    /// - Quoted: `"CamelCase"."UserTable"` or `` `CamelCase` ``
    /// - Mixed: `public."UserTable".id`
    pub fn parse(s: &str) -> QbResult<Self> {
        if s.is_empty() {
            return Err(QbError::invalid("Identifier cannot be empty"));
        }
        if s.contains('\0') {
            return Err(QbError::invalid("Identifier cannot contain NUL character"));
        }

        let mut parts = Vec::new();
        let mut chars = s.chars().peekable();

        while chars.peek().is_some() {
            if !parts.is_empty() {
                match chars.next() {
                    Some('.') if chars.peek().is_none() => {
                        return Err(QbError::invalid("Trailing '.' in identifier"));
                    }
                    Some('.') => {}
                    Some(c) => {
                        return Err(QbError::invalid(format!(
                            "Expected '.' between identifier parts, got '{c}'"
                        )));
                    }
                    None => break,
                }
            }

            if let Some(&quote) = chars.peek().filter(|c| **c == '"' || **c == '`') {
                chars.next();
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some(c) if c == quote => {
                            if chars.peek() == Some(&quote) {
                                chars.next();
                                name.push(quote);
                            } else {
                                break;
                            }
                        }
                        Some(c) => name.push(c),
                        None => return Err(QbError::invalid("Unclosed quoted identifier")),
                    }
                }
                if name.is_empty() {
                    return Err(QbError::invalid("Empty quoted identifier"));
                }
                parts.push(IdentPart::Quoted(name));
                continue;
            }

            let mut name = String::new();
            while let Some(&c) = chars.peek() {
                if c == '.' {
                    break;
                }
                let ok = if name.is_empty() {
                    c == '_' || c.is_ascii_alphabetic()
                } else {
                    c == '_' || c == '$' || c.is_ascii_alphanumeric()
                };
                if !ok {
                    return Err(QbError::invalid(format!(
                        "Invalid character in identifier: '{c}'"
                    )));
                }
                name.push(c);
                chars.next();
            }
            if name.is_empty() {
                return Err(QbError::invalid("Empty identifier segment"));
            }
            parts.push(IdentPart::Plain(name));
        }

        Ok(Self { parts })
    }

    /// Parse if `s` is identifier-shaped, `None` for any other SQL fragment.
    pub fn try_parse(s: &str) -> Option<Self> {
        Self::parse(s).ok()
    }

    /// The last part, i.e. the column name of `table.column`.
    pub fn last(&self) -> &str {
        self.parts.last().map(IdentPart::name).unwrap_or_default()
    }

    /// Render for `dialect`: plain parts bare, quoted parts quoted.
    pub fn render(&self, dialect: &dyn Dialect) -> String {
        let mut out = String::new();
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            match part {
                IdentPart::Plain(s) => out.push_str(s),
                IdentPart::Quoted(s) => out.push_str(&dialect.quote_identifier(s)),
            }
        }
        out
    }
}

/// Render `name` as an identifier when it is one, otherwise as-is.
pub fn render_name(name: &str, dialect: &dyn Dialect) -> String {
    match Ident::try_parse(name) {
        Some(ident) => ident.render(dialect),
        None => name.to_string(),
    }
}
