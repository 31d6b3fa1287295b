//! throwable-print-stack-trace
//!
//! Disallow `printStackTrace()` in production code: it writes to stderr
//! outside the logging pipeline, losing context and log routing. Test
//! code is exempt.

use tree_sitter::Node;

use crate::config::Config;
use crate::context::CheckContext;
use crate::diagnostic::{Diagnostic, Span};
use crate::matchers::{Matcher, MethodMatcher};
use crate::runner::Check;
use crate::{RuleCategory, RuleMeta};

/// throwable-print-stack-trace rule
pub struct ThrowablePrintStackTrace {
    print_stack_trace: MethodMatcher,
}

impl Default for ThrowablePrintStackTrace {
    fn default() -> Self {
        Self {
            print_stack_trace: MethodMatcher::named("printStackTrace")
                .on_subtype_of("java.lang.Throwable")
                .with_arity(0),
        }
    }
}

impl RuleMeta for ThrowablePrintStackTrace {
    const NAME: &'static str = "throwable-print-stack-trace";
    const ALIASES: &'static [&'static str] = &["PrintStackTrace"];
    const CATEGORY: RuleCategory = RuleCategory::Pedantic;
    const DESCRIPTION: &'static str = "printStackTrace bypasses the logging pipeline";
}

impl ThrowablePrintStackTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(_config: &Config) -> Self {
        Self::new()
    }
}

impl Check for ThrowablePrintStackTrace {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn aliases(&self) -> &'static [&'static str] {
        Self::ALIASES
    }

    fn check_method_invocation(&self, node: Node<'_>, ctx: &CheckContext<'_>) -> Vec<Diagnostic> {
        if ctx.is_test_code() {
            return Vec::new();
        }
        if !self.print_stack_trace.matches(node, ctx) {
            return Vec::new();
        }
        // No fix: there is no logger to target that can be assumed.
        vec![Diagnostic::new(
            Self::NAME,
            Span::of(node),
            "printStackTrace writes directly to stderr, bypassing log configuration.",
        )
        .with_help("Log the exception instead, e.g. log.error(\"...\", e).")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{diags_for, lint};

    #[test]
    fn test_rule_name() {
        assert_eq!(ThrowablePrintStackTrace::NAME, "throwable-print-stack-trace");
    }

    #[test]
    fn test_flags_print_stack_trace_on_caught_exception() {
        let source = "class A {\n\
                      void f() { try { g(); } catch (RuntimeException e) { e.printStackTrace(); } }\n\
                      }\n";
        let result = lint(source);
        assert_eq!(diags_for(&result, ThrowablePrintStackTrace::NAME).len(), 1);
    }

    #[test]
    fn test_unresolved_receiver_not_flagged() {
        let source = "class A { void f() { helper.printStackTrace(); } }\n";
        let result = lint(source);
        assert!(diags_for(&result, ThrowablePrintStackTrace::NAME).is_empty());
    }

    #[test]
    fn test_exempt_in_test_code() {
        let source = "import org.junit.jupiter.api.Test;\n\
                      class T {\n\
                      @Test void f() { try { g(); } catch (RuntimeException e) { e.printStackTrace(); } }\n\
                      }\n";
        let result = lint(source);
        assert!(diags_for(&result, ThrowablePrintStackTrace::NAME).is_empty());
    }
}
