//! Per-render state: active dialect, alias table and placeholder order.

use crate::dialect::Dialect;
use crate::ident::render_name;
use crate::qb::param::ParamToken;
use std::collections::HashMap;

pub(crate) struct RenderCtx<'a> {
    pub(crate) dialect: &'a dyn Dialect,
    aliases: Option<&'a HashMap<String, String>>,
    /// Tokens in the order their placeholders appear in the SQL text.
    order: Vec<ParamToken>,
}

impl<'a> RenderCtx<'a> {
    pub(crate) fn new(
        dialect: &'a dyn Dialect,
        aliases: Option<&'a HashMap<String, String>>,
    ) -> Self {
        Self {
            dialect,
            aliases,
            order: Vec::new(),
        }
    }

    /// Placeholder text for `token`. Numbered styles reuse the number of an
    /// earlier occurrence; `?` records every occurrence.
    pub(crate) fn placeholder(&mut self, token: ParamToken) -> String {
        let style = self.dialect.placeholder_style();
        if style.is_numbered() {
            if let Some(idx) = self.order.iter().position(|t| *t == token) {
                return style.render(idx + 1);
            }
        }
        self.order.push(token);
        style.render(self.order.len())
    }

    /// Map a logical name through the alias table. `table.name` maps its last part.
    pub(crate) fn resolve_alias(&self, name: &str) -> String {
        let Some(aliases) = self.aliases else {
            return name.to_string();
        };
        if let Some(target) = aliases.get(name) {
            return target.clone();
        }
        if let Some((prefix, last)) = name.rsplit_once('.') {
            if let Some(target) = aliases.get(last) {
                return format!("{prefix}.{target}");
            }
        }
        name.to_string()
    }

    /// Alias-resolve and render a column reference or SQL fragment.
    pub(crate) fn column(&self, name: &str) -> String {
        render_name(&self.resolve_alias(name), self.dialect)
    }

    pub(crate) fn into_order(self) -> Vec<ParamToken> {
        self.order
    }
}
