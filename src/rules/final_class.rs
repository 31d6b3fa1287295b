//! final-class
//!
//! A class whose constructors are all private cannot be meaningfully
//! extended outside its own file; declaring it final makes that
//! explicit and lets the compiler enforce it.

use tree_sitter::Node;

use crate::config::Config;
use crate::context::CheckContext;
use crate::diagnostic::{Diagnostic, Span};
use crate::fix::FixBuilder;
use crate::runner::Check;
use crate::utils;
use crate::{RuleCategory, RuleMeta};

/// final-class rule
#[derive(Debug, Clone, Default)]
pub struct FinalClass;

impl RuleMeta for FinalClass {
    const NAME: &'static str = "final-class";
    const ALIASES: &'static [&'static str] = &["FinalClass"];
    const CATEGORY: RuleCategory = RuleCategory::Style;
    const DESCRIPTION: &'static str =
        "classes with only private constructors should be final";
}

impl FinalClass {
    pub fn new() -> Self {
        Self
    }

    pub fn from_config(_config: &Config) -> Self {
        Self::new()
    }

    /// Whether any class in the file extends `name` (nested classes can
    /// legitimately subclass an outer class with private constructors).
    fn extended_in_file(root: Node<'_>, name: &str, ctx: &CheckContext<'_>) -> bool {
        let mut extended = false;
        utils::walk(root, &mut |n| {
            if n.kind() != "class_declaration" {
                return;
            }
            let Some(superclass) = n.child_by_field_name("superclass") else {
                return;
            };
            let subclasses = utils::named_children(superclass).into_iter().any(|t| {
                let text = ctx.text(t);
                text == name
                    || text.strip_prefix(name).is_some_and(|rest| rest.starts_with('<'))
            });
            if subclasses {
                extended = true;
            }
        });
        extended
    }
}

impl Check for FinalClass {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn aliases(&self) -> &'static [&'static str] {
        Self::ALIASES
    }

    fn check_class_declaration(&self, node: Node<'_>, ctx: &CheckContext<'_>) -> Vec<Diagnostic> {
        if utils::has_modifier(node, "final", ctx.source())
            || utils::has_modifier(node, "abstract", ctx.source())
        {
            return Vec::new();
        }
        let Some(body) = node.child_by_field_name("body") else {
            return Vec::new();
        };
        let constructors: Vec<Node<'_>> = utils::named_children(body)
            .into_iter()
            .filter(|n| n.kind() == "constructor_declaration")
            .collect();
        if constructors.is_empty() {
            return Vec::new();
        }
        if !constructors
            .iter()
            .all(|c| utils::has_modifier(*c, "private", ctx.source()))
        {
            return Vec::new();
        }

        let Some(name_node) = node.child_by_field_name("name") else {
            return Vec::new();
        };
        let name = ctx.text(name_node);
        if Self::extended_in_file(ctx.source().root(), name, ctx) {
            return Vec::new();
        }

        let fix = utils::child_of_kind(node, "class").and_then(|keyword| {
            FixBuilder::new(ctx, "Declare the class final")
                .insert(keyword.start_byte(), "final ")
                .build()
        });

        vec![Diagnostic::new(
            Self::NAME,
            Span::of(name_node),
            format!("Class `{name}` has only private constructors and should be final."),
        )
        .with_fix_opt(fix)]
    }
}
