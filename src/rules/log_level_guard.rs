//! log-level-guard
//!
//! Inside `if (log.isDebugEnabled())`, the guarded statements must log
//! at debug. A mismatched guard either suppresses logging that was
//! meant to happen or defeats the point of the guard entirely.

use tree_sitter::Node;

use crate::config::Config;
use crate::context::CheckContext;
use crate::diagnostic::{Diagnostic, Span};
use crate::fix::FixBuilder;
use crate::matchers::{Matcher, MethodMatcher};
use crate::runner::Check;
use crate::utils;
use crate::{RuleCategory, RuleMeta};

const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// log-level-guard rule
pub struct LogLevelGuard {
    guard: MethodMatcher,
}

impl Default for LogLevelGuard {
    fn default() -> Self {
        Self {
            guard: MethodMatcher::name_matching("is(Trace|Debug|Info|Warn|Error)Enabled")
                .on_exact("org.slf4j.Logger")
                .with_arity(0),
        }
    }
}

impl RuleMeta for LogLevelGuard {
    const NAME: &'static str = "log-level-guard";
    const ALIASES: &'static [&'static str] = &["Slf4jLevelCheck"];
    const CATEGORY: RuleCategory = RuleCategory::Correctness;
    const DESCRIPTION: &'static str =
        "level guards must match the level of the logging they guard";
}

impl LogLevelGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(_config: &Config) -> Self {
        Self::new()
    }

    /// `isDebugEnabled` -> `debug`
    fn guard_level(name: &str) -> Option<&'static str> {
        let inner = name.strip_prefix("is")?.strip_suffix("Enabled")?;
        LEVELS.iter().copied().find(|l| l.eq_ignore_ascii_case(inner))
    }

    fn enabled_check_for(level: &str) -> String {
        let mut chars = level.chars();
        let capitalized: String = chars
            .next()
            .map(|c| c.to_ascii_uppercase().to_string() + chars.as_str())
            .unwrap_or_default();
        format!("is{capitalized}Enabled")
    }

    /// Levels of logging calls on `receiver` inside the guarded block.
    fn guarded_levels<'t>(
        consequence: Node<'t>,
        receiver: &str,
        ctx: &CheckContext<'_>,
    ) -> Vec<&'static str> {
        let mut levels = Vec::new();
        utils::walk(consequence, &mut |n| {
            if n.kind() != "method_invocation" {
                return;
            }
            let same_receiver = utils::receiver(n).is_some_and(|r| ctx.text(r) == receiver);
            if !same_receiver {
                return;
            }
            if let Some(name) = utils::method_name(n, ctx.source()) {
                if let Some(level) = LEVELS.iter().copied().find(|l| *l == name) {
                    levels.push(level);
                }
            }
        });
        levels
    }
}

impl Check for LogLevelGuard {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn aliases(&self) -> &'static [&'static str] {
        Self::ALIASES
    }

    fn check_if_statement(&self, node: Node<'_>, ctx: &CheckContext<'_>) -> Vec<Diagnostic> {
        let Some(condition) = node.child_by_field_name("condition") else {
            return Vec::new();
        };
        // Only bare guards are considered; compound conditions are left
        // alone.
        let Some(call) = utils::named_children(condition).into_iter().next() else {
            return Vec::new();
        };
        if call.kind() != "method_invocation" || !self.guard.matches(call, ctx) {
            return Vec::new();
        }
        let Some(guard_name) = utils::method_name(call, ctx.source()) else {
            return Vec::new();
        };
        let Some(guard_level) = Self::guard_level(guard_name) else {
            return Vec::new();
        };
        let Some(receiver) = utils::receiver(call) else {
            return Vec::new();
        };
        let Some(consequence) = node.child_by_field_name("consequence") else {
            return Vec::new();
        };

        let levels = Self::guarded_levels(consequence, ctx.text(receiver), ctx);
        if levels.is_empty() || levels.iter().all(|l| *l == guard_level) {
            return Vec::new();
        }

        let mut distinct: Vec<&str> = levels.clone();
        distinct.sort_unstable();
        distinct.dedup();

        // A single consistent level means the guard is the odd one out
        // and can be rewritten; mixed levels need a human.
        let fix = if distinct.len() == 1 {
            call.child_by_field_name("name").and_then(|name_node| {
                FixBuilder::new(ctx, "Align the guard with the guarded level")
                    .replace(name_node, Self::enabled_check_for(distinct[0]))
                    .build()
            })
        } else {
            None
        };

        vec![Diagnostic::new(
            Self::NAME,
            Span::of(call),
            format!(
                "Guard checks {guard_name} but the guarded block logs at {}.",
                distinct.join(", ")
            ),
        )
        .with_help("The guard level should match the level of the statements it protects.")
        .with_fix_opt(fix)]
    }
}
