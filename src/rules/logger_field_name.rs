//! logger-field-name
//!
//! Require SLF4J logger fields to use a consistent name. The allowed
//! names come from the `loggerNames` flag and default to `log`.

use tree_sitter::Node;

use crate::config::Config;
use crate::context::CheckContext;
use crate::diagnostic::{Diagnostic, Fix, Span};
use crate::fix::FixBuilder;
use crate::runner::Check;
use crate::utils;
use crate::{RuleCategory, RuleMeta};

const DEFAULT_NAME: &str = "log";

/// logger-field-name rule
pub struct LoggerFieldName {
    allowed: Vec<String>,
}

impl Default for LoggerFieldName {
    fn default() -> Self {
        Self {
            allowed: vec![DEFAULT_NAME.to_string()],
        }
    }
}

impl RuleMeta for LoggerFieldName {
    const NAME: &'static str = "logger-field-name";
    const ALIASES: &'static [&'static str] = &["ConsistentLoggerName"];
    const CATEGORY: RuleCategory = RuleCategory::Style;
    const DESCRIPTION: &'static str = "logger fields should use the project-wide name";
}

impl LoggerFieldName {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        match config.flag("loggerNames") {
            Some(names) if !names.is_empty() => Self {
                allowed: names.to_vec(),
            },
            _ => Self::default(),
        }
    }

    /// Renaming is only safe when the old name has a single declaration
    /// site in the file and the new name is entirely unused.
    fn rename_fix(
        &self,
        declarator_name: Node<'_>,
        old: &str,
        ctx: &CheckContext<'_>,
    ) -> Option<Fix> {
        let target = self.allowed.first()?;
        let root = ctx.source().root();
        if utils::count_declarations(root, old, ctx.source()) != 1 {
            return None;
        }
        if utils::count_code_identifiers(root, target, ctx.source()) != 0 {
            return None;
        }

        let mut builder = FixBuilder::new(ctx, format!("Rename `{old}` to `{target}`"));
        let mut sites = Vec::new();
        utils::walk(root, &mut |n| {
            if n.kind() == "identifier" && ctx.text(n) == old {
                sites.push(n);
            }
        });
        // The declaration itself is an identifier and is renamed with
        // its uses.
        debug_assert!(sites.iter().any(|n| n.id() == declarator_name.id()));
        for site in sites {
            builder = builder.replace(site, target.clone());
        }
        builder.build()
    }
}

impl Check for LoggerFieldName {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn aliases(&self) -> &'static [&'static str] {
        Self::ALIASES
    }

    fn check_field_declaration(&self, node: Node<'_>, ctx: &CheckContext<'_>) -> Vec<Diagnostic> {
        let Some(ty) = node.child_by_field_name("type") else {
            return Vec::new();
        };
        let resolved = ctx.semantic().resolve_type_node(ty, ctx.source());
        if resolved.as_deref() != Some("org.slf4j.Logger") {
            return Vec::new();
        }

        let mut diagnostics = Vec::new();
        for declarator in utils::named_children(node)
            .into_iter()
            .filter(|n| n.kind() == "variable_declarator")
        {
            let Some(name_node) = declarator.child_by_field_name("name") else {
                continue;
            };
            let name = ctx.text(name_node);
            if self.allowed.iter().any(|a| a == name) {
                continue;
            }
            let preferred = self.allowed.first().map(String::as_str).unwrap_or(DEFAULT_NAME);
            diagnostics.push(
                Diagnostic::new(
                    Self::NAME,
                    Span::of(name_node),
                    format!("Logger field `{name}` should be named `{preferred}`."),
                )
                .with_fix_opt(self.rename_fix(name_node, name, ctx)),
            );
        }
        diagnostics
    }
}
