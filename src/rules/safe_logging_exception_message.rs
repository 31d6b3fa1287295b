//! safe-logging-exception-message
//!
//! Disallow logging an exception's message as a safe-loggable argument.
//! Exception messages routinely carry user data, so
//! `SafeArg.of(name, e.getMessage())` leaks it into safe log output.

use tree_sitter::Node;

use crate::config::Config;
use crate::context::CheckContext;
use crate::diagnostic::{Diagnostic, Span};
use crate::fix::FixBuilder;
use crate::matchers::{any_of, AnyOf, Matcher, MethodMatcher};
use crate::runner::Check;
use crate::utils;
use crate::{RuleCategory, RuleMeta};

const SAFE_ARG: &str = "com.palantir.logsafe.SafeArg";
const UNSAFE_ARG: &str = "com.palantir.logsafe.UnsafeArg";

/// safe-logging-exception-message rule
pub struct SafeLoggingExceptionMessage {
    safe_arg_of: MethodMatcher,
    message_accessor: AnyOf<MethodMatcher, MethodMatcher>,
}

impl Default for SafeLoggingExceptionMessage {
    fn default() -> Self {
        let accessor = |name| {
            MethodMatcher::named(name)
                .on_subtype_of("java.lang.Throwable")
                .with_arity(0)
        };
        Self {
            safe_arg_of: MethodMatcher::named("of").on_exact(SAFE_ARG).with_arity(2),
            message_accessor: any_of(accessor("getMessage"), accessor("getLocalizedMessage")),
        }
    }
}

impl RuleMeta for SafeLoggingExceptionMessage {
    const NAME: &'static str = "safe-logging-exception-message";
    const ALIASES: &'static [&'static str] = &["SafeLoggingExceptionMessage"];
    const CATEGORY: RuleCategory = RuleCategory::Correctness;
    const DESCRIPTION: &'static str =
        "exception messages must not be logged as safe-loggable arguments";
}

impl SafeLoggingExceptionMessage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(_config: &Config) -> Self {
        Self::new()
    }
}

impl Check for SafeLoggingExceptionMessage {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn aliases(&self) -> &'static [&'static str] {
        Self::ALIASES
    }

    fn check_method_invocation(&self, node: Node<'_>, ctx: &CheckContext<'_>) -> Vec<Diagnostic> {
        if !self.safe_arg_of.matches(node, ctx) {
            return Vec::new();
        }
        let args = utils::arguments(node);
        let value = args[1];
        // getMessage on anything that is not a resolvable Throwable is
        // left alone.
        if !self.message_accessor.matches(value, ctx) {
            return Vec::new();
        }

        let mut builder = FixBuilder::new(ctx, "Mark the argument unsafe")
            .add_import(UNSAFE_ARG);
        if let Some(receiver) = utils::receiver(node) {
            builder = builder.replace(receiver, "UnsafeArg");
        }
        // Drop the SafeArg import when this was its only use.
        if utils::count_code_identifiers(ctx.source().root(), "SafeArg", ctx.source()) == 1 {
            builder = builder.remove_import(SAFE_ARG);
        }

        vec![Diagnostic::new(
            Self::NAME,
            Span::of(node),
            "Exception messages are not safe for logging; they frequently contain \
             user-supplied values.",
        )
        .with_help("Use UnsafeArg.of for exception messages, or log the exception itself.")
        .with_fix_opt(builder.build())]
    }
}
