//! safe-arg-denied-names
//!
//! Flag `SafeArg.of(name, value)` when the argument name appears on the
//! configured deny-list (`deniedSafeArgNames` flag). With no flag set
//! the rule never fires.

use tree_sitter::Node;

use crate::config::Config;
use crate::context::CheckContext;
use crate::diagnostic::{Diagnostic, Span};
use crate::matchers::{Matcher, MethodMatcher};
use crate::runner::Check;
use crate::utils;
use crate::{RuleCategory, RuleMeta};

/// safe-arg-denied-names rule
pub struct SafeArgDeniedNames {
    denied: Vec<String>,
    safe_arg_of: MethodMatcher,
}

impl Default for SafeArgDeniedNames {
    fn default() -> Self {
        Self {
            denied: Vec::new(),
            safe_arg_of: MethodMatcher::named("of")
                .on_exact("com.palantir.logsafe.SafeArg")
                .with_arity(2),
        }
    }
}

impl RuleMeta for SafeArgDeniedNames {
    const NAME: &'static str = "safe-arg-denied-names";
    const ALIASES: &'static [&'static str] = &["SafeArgDenylist"];
    const CATEGORY: RuleCategory = RuleCategory::Style;
    const DESCRIPTION: &'static str =
        "SafeArg names on the configured deny-list are not allowed";
}

impl SafeArgDeniedNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            denied: config
                .flag("deniedSafeArgNames")
                .map(<[String]>::to_vec)
                .unwrap_or_default(),
            ..Self::default()
        }
    }
}

impl Check for SafeArgDeniedNames {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn aliases(&self) -> &'static [&'static str] {
        Self::ALIASES
    }

    fn check_method_invocation(&self, node: Node<'_>, ctx: &CheckContext<'_>) -> Vec<Diagnostic> {
        if self.denied.is_empty() || !self.safe_arg_of.matches(node, ctx) {
            return Vec::new();
        }
        let args = utils::arguments(node);
        let Some(name) = utils::string_literal_value(args[0], ctx.source()) else {
            return Vec::new();
        };
        if !self.denied.iter().any(|d| *d == name) {
            return Vec::new();
        }
        // No fix: whether the value is actually safe under a different
        // name is a human decision.
        vec![Diagnostic::new(
            Self::NAME,
            Span::of(args[0]),
            format!("SafeArg name `{name}` is on the deny-list for safe logging."),
        )
        .with_help("Pick a different name, or use UnsafeArg if the value is not safe.")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{diags_for, lint, lint_with};

    const SOURCE: &str = "import com.palantir.logsafe.SafeArg;\n\
                          class A { Object a = SafeArg.of(\"cause\", \"x\"); }\n";

    #[test]
    fn test_rule_name() {
        assert_eq!(SafeArgDeniedNames::NAME, "safe-arg-denied-names");
    }

    #[test]
    fn test_no_flag_means_no_op() {
        let result = lint(SOURCE);
        assert!(diags_for(&result, SafeArgDeniedNames::NAME).is_empty());
    }

    #[test]
    fn test_denied_name_flagged() {
        let config = Config::default().with_flag("deniedSafeArgNames", ["cause", "message"]);
        let result = lint_with(SOURCE, &config);
        let diags = diags_for(&result, SafeArgDeniedNames::NAME);
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("cause"));
    }

    #[test]
    fn test_other_name_not_flagged() {
        let config = Config::default().with_flag("deniedSafeArgNames", ["message"]);
        let result = lint_with(SOURCE, &config);
        assert!(diags_for(&result, SafeArgDeniedNames::NAME).is_empty());
    }

    #[test]
    fn test_non_literal_name_not_flagged() {
        let source = "import com.palantir.logsafe.SafeArg;\n\
                      class A { Object a = SafeArg.of(name, \"x\"); }\n";
        let config = Config::default().with_flag("deniedSafeArgNames", ["cause"]);
        let result = lint_with(source, &config);
        assert!(diags_for(&result, SafeArgDeniedNames::NAME).is_empty());
    }
}
