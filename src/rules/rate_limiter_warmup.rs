//! rate-limiter-warmup
//!
//! Disallow `RateLimiter.create(permitsPerSecond)`: without a warmup
//! period the limiter allows an initial burst of up to one second of
//! permits, which is rarely intended for protecting remote resources.

use tree_sitter::Node;

use crate::config::Config;
use crate::context::CheckContext;
use crate::diagnostic::{Diagnostic, Span};
use crate::matchers::{Matcher, MethodMatcher};
use crate::runner::Check;
use crate::{RuleCategory, RuleMeta};

/// rate-limiter-warmup rule
pub struct RateLimiterWarmup {
    create: MethodMatcher,
}

impl Default for RateLimiterWarmup {
    fn default() -> Self {
        Self {
            create: MethodMatcher::named("create")
                .on_exact("com.google.common.util.concurrent.RateLimiter")
                .with_arity(1),
        }
    }
}

impl RuleMeta for RateLimiterWarmup {
    const NAME: &'static str = "rate-limiter-warmup";
    const ALIASES: &'static [&'static str] = &["RateLimiterCreateWithoutWarmup"];
    const CATEGORY: RuleCategory = RuleCategory::Correctness;
    const DESCRIPTION: &'static str =
        "RateLimiter.create without a warmup period permits an initial burst";
}

impl RateLimiterWarmup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(_config: &Config) -> Self {
        Self::new()
    }
}

impl Check for RateLimiterWarmup {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn aliases(&self) -> &'static [&'static str] {
        Self::ALIASES
    }

    fn check_method_invocation(&self, node: Node<'_>, ctx: &CheckContext<'_>) -> Vec<Diagnostic> {
        if !self.create.matches(node, ctx) {
            return Vec::new();
        }
        // No fix: only the caller knows an appropriate warmup period.
        vec![Diagnostic::new(
            Self::NAME,
            Span::of(node),
            "RateLimiter.create(permitsPerSecond) starts with a full second of stored \
             permits, allowing an immediate burst.",
        )
        .with_help(
            "Use RateLimiter.create(permitsPerSecond, warmupPeriod) to ramp up gradually.",
        )]
    }
}
