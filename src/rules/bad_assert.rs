//! bad-assert
//!
//! Disallow `assert` statements in production code: assertions are
//! disabled at runtime unless the JVM is started with `-ea`, so they
//! silently stop checking anything. Test code is exempt.

use tree_sitter::Node;

use crate::config::Config;
use crate::context::CheckContext;
use crate::diagnostic::{Diagnostic, Span};
use crate::fix::FixBuilder;
use crate::runner::Check;
use crate::utils;
use crate::{RuleCategory, RuleMeta};

/// bad-assert rule
#[derive(Debug, Clone, Default)]
pub struct BadAssert;

impl RuleMeta for BadAssert {
    const NAME: &'static str = "bad-assert";
    const ALIASES: &'static [&'static str] = &["BadAssert"];
    const CATEGORY: RuleCategory = RuleCategory::Correctness;
    const DESCRIPTION: &'static str =
        "assert statements are disabled at runtime; use Preconditions";
}

impl BadAssert {
    pub fn new() -> Self {
        Self
    }

    pub fn from_config(_config: &Config) -> Self {
        Self::new()
    }
}

impl Check for BadAssert {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn aliases(&self) -> &'static [&'static str] {
        Self::ALIASES
    }

    fn check_assert_statement(&self, node: Node<'_>, ctx: &CheckContext<'_>) -> Vec<Diagnostic> {
        if ctx.is_test_code() {
            return Vec::new();
        }

        let exprs = utils::named_children(node);
        let fix = match exprs.as_slice() {
            [condition] => FixBuilder::new(ctx, "Replace with Preconditions.checkState")
                .replace(
                    node,
                    format!("Preconditions.checkState({});", ctx.text(*condition)),
                )
                .add_import("com.google.common.base.Preconditions")
                .build(),
            [condition, detail] => FixBuilder::new(ctx, "Replace with Preconditions.checkState")
                .replace(
                    node,
                    format!(
                        "Preconditions.checkState({}, {});",
                        ctx.text(*condition),
                        ctx.text(*detail)
                    ),
                )
                .add_import("com.google.common.base.Preconditions")
                .build(),
            _ => None,
        };

        vec![Diagnostic::new(
            Self::NAME,
            Span::of(node),
            "assert statements are no-ops unless the JVM runs with -ea; this condition \
             is not checked in production.",
        )
        .with_help("Use Preconditions.checkState (or an explicit throw) instead.")
        .with_fix_opt(fix)]
    }
}
