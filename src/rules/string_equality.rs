//! string-equality
//!
//! Disallow `==`/`!=` between String operands: reference equality on
//! strings compares identity, not content, and only accidentally works
//! for interned literals. Comparisons against the null literal are
//! reference checks by design and are not flagged.

use tree_sitter::Node;

use crate::config::Config;
use crate::context::CheckContext;
use crate::diagnostic::{Diagnostic, Span};
use crate::fix::FixBuilder;
use crate::matchers::{Matcher, SubtypeMatcher};
use crate::runner::Check;
use crate::{RuleCategory, RuleMeta};

/// string-equality rule
#[derive(Default)]
pub struct StringEquality;

impl RuleMeta for StringEquality {
    const NAME: &'static str = "string-equality";
    const ALIASES: &'static [&'static str] = &["StringEquality"];
    const CATEGORY: RuleCategory = RuleCategory::Correctness;
    const DESCRIPTION: &'static str = "String comparison using reference equality";
}

impl StringEquality {
    pub fn new() -> Self {
        Self
    }

    pub fn from_config(_config: &Config) -> Self {
        Self::new()
    }
}

impl Check for StringEquality {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn aliases(&self) -> &'static [&'static str] {
        Self::ALIASES
    }

    fn check_binary_expression(&self, node: Node<'_>, ctx: &CheckContext<'_>) -> Vec<Diagnostic> {
        let Some(operator) = node.child_by_field_name("operator") else {
            return Vec::new();
        };
        let op = ctx.text(operator);
        if op != "==" && op != "!=" {
            return Vec::new();
        }
        let (Some(left), Some(right)) = (
            node.child_by_field_name("left"),
            node.child_by_field_name("right"),
        ) else {
            return Vec::new();
        };

        // A null literal is never a String operand here; matching it
        // returns false rather than reasoning about the null type.
        let string = SubtypeMatcher::of("java.lang.String");
        if !string.matches(left, ctx) || !string.matches(right, ctx) {
            return Vec::new();
        }

        let replacement = if op == "==" {
            format!("Objects.equals({}, {})", ctx.text(left), ctx.text(right))
        } else {
            format!("!Objects.equals({}, {})", ctx.text(left), ctx.text(right))
        };
        let fix = FixBuilder::new(ctx, "Compare with Objects.equals")
            .replace(node, replacement)
            .add_import("java.util.Objects")
            .build();

        vec![Diagnostic::new(
            Self::NAME,
            Span::of(node),
            format!("Strings compared with `{op}` are compared by reference, not content."),
        )
        .with_help("Use Objects.equals (or String.equals) to compare string contents.")
        .with_fix_opt(fix)]
    }
}
