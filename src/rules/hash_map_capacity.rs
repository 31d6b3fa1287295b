//! hash-map-capacity
//!
//! Disallow `new HashMap<>(int)`: the capacity constructor sizes the
//! backing array directly, without accounting for the load factor, so a
//! map created for N entries resizes before reaching N.

use tree_sitter::Node;

use crate::config::Config;
use crate::context::CheckContext;
use crate::diagnostic::{Diagnostic, Span};
use crate::fix::FixBuilder;
use crate::matchers::{ConstructorMatcher, Matcher};
use crate::runner::Check;
use crate::utils;
use crate::{RuleCategory, RuleMeta};

/// hash-map-capacity rule
#[derive(Debug, Clone, Default)]
pub struct HashMapCapacity;

impl RuleMeta for HashMapCapacity {
    const NAME: &'static str = "hash-map-capacity";
    const ALIASES: &'static [&'static str] = &["HashMapUsage"];
    const CATEGORY: RuleCategory = RuleCategory::Pedantic;
    const DESCRIPTION: &'static str =
        "new HashMap(int) sizes the table without accounting for the load factor";
}

impl HashMapCapacity {
    pub fn new() -> Self {
        Self
    }

    pub fn from_config(_config: &Config) -> Self {
        Self::new()
    }

    /// A fix is only safe when type arguments are inferred: rewriting an
    /// explicit `new HashMap<K, V>(n)` to a factory call would drop them.
    fn type_arguments_inferred(node: Node<'_>, ctx: &CheckContext<'_>) -> bool {
        let Some(ty) = node.child_by_field_name("type") else {
            return false;
        };
        match ty.kind() {
            "type_identifier" => true,
            "generic_type" => utils::child_of_kind(ty, "type_arguments")
                .is_none_or(|args| ctx.text(args) == "<>"),
            _ => false,
        }
    }
}

impl Check for HashMapCapacity {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn aliases(&self) -> &'static [&'static str] {
        Self::ALIASES
    }

    fn check_object_creation(&self, node: Node<'_>, ctx: &CheckContext<'_>) -> Vec<Diagnostic> {
        if !ConstructorMatcher::of_exact("java.util.HashMap").matches(node, ctx) {
            return Vec::new();
        }
        let args = utils::arguments(node);

        let capacity = match args.len() {
            1 | 2 => args[0],
            _ => return Vec::new(),
        };

        let is_constant = ctx.semantic().int_constant(capacity, ctx.source()).is_some();
        if !is_constant {
            // Only flag when the argument is known to be an int; a Map
            // argument is the copy constructor, anything unresolved is
            // left alone.
            let arg_type = ctx.semantic().resolve_expression_type(capacity, ctx.source());
            if arg_type.as_deref() != Some("int") {
                return Vec::new();
            }
        }

        let diagnostic = Diagnostic::new(
            Self::NAME,
            Span::of(node),
            "HashMap was constructed with a fixed capacity; the capacity constructor \
             does not account for the load factor when sizing the table.",
        )
        .with_help(
            "Use Maps.newHashMapWithExpectedSize(expectedSize) to size for the intended \
             number of entries.",
        );

        // The rewrite is mechanical only for the single-argument constant
        // form with inferred type arguments.
        let fix = if args.len() == 1 && is_constant && Self::type_arguments_inferred(node, ctx) {
            FixBuilder::new(ctx, "Replace with Maps.newHashMapWithExpectedSize")
                .replace(
                    node,
                    format!("Maps.newHashMapWithExpectedSize({})", ctx.text(capacity)),
                )
                .add_import("com.google.common.collect.Maps")
                .build()
        } else {
            None
        };

        vec![diagnostic.with_fix_opt(fix)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{apply_first_fix, diags_for, lint};

    const IMPORT: &str = "import java.util.HashMap;\nimport java.util.Map;\n";

    #[test]
    fn test_rule_name() {
        assert_eq!(HashMapCapacity::NAME, "hash-map-capacity");
        assert_eq!(HashMapCapacity::ALIASES, &["HashMapUsage"]);
    }

    #[test]
    fn test_flags_literal_capacity() {
        let source = format!("{IMPORT}class A {{ Object m = new HashMap<>(16); }}\n");
        let result = lint(&source);
        let diags = diags_for(&result, HashMapCapacity::NAME);
        assert_eq!(diags.len(), 1);
        assert!(!diags[0].fixes.is_empty(), "constant capacity should be fixable");
    }

    #[test]
    fn test_default_constructor_not_flagged() {
        let source = format!("{IMPORT}class A {{ Object m = new HashMap<>(); }}\n");
        let result = lint(&source);
        assert!(diags_for(&result, HashMapCapacity::NAME).is_empty());
    }

    #[test]
    fn test_copy_constructor_not_flagged() {
        let source = format!(
            "{IMPORT}class A {{\n\
               void f(Map<String, String> existing) {{\n\
                 Object m = new HashMap<>(existing);\n\
               }}\n\
             }}\n"
        );
        let result = lint(&source);
        assert!(diags_for(&result, HashMapCapacity::NAME).is_empty());
    }

    #[test]
    fn test_int_variable_flagged_without_fix() {
        let source = format!(
            "{IMPORT}class A {{\n\
               void f(int size) {{ Object m = new HashMap<>(size); }}\n\
             }}\n"
        );
        let result = lint(&source);
        let diags = diags_for(&result, HashMapCapacity::NAME);
        assert_eq!(diags.len(), 1);
        assert!(diags[0].fixes.is_empty(), "non-constant capacity is not fixable");
    }

    #[test]
    fn test_load_factor_form_flagged_without_fix() {
        let source = format!("{IMPORT}class A {{ Object m = new HashMap<>(16, 0.75f); }}\n");
        let result = lint(&source);
        let diags = diags_for(&result, HashMapCapacity::NAME);
        assert_eq!(diags.len(), 1);
        assert!(diags[0].fixes.is_empty());
    }

    #[test]
    fn test_explicit_type_arguments_flagged_without_fix() {
        let source =
            format!("{IMPORT}class A {{ Object m = new HashMap<String, String>(16); }}\n");
        let result = lint(&source);
        let diags = diags_for(&result, HashMapCapacity::NAME);
        assert_eq!(diags.len(), 1);
        assert!(diags[0].fixes.is_empty());
    }

    #[test]
    fn test_unrelated_type_not_flagged() {
        let source = "import java.util.TreeMap;\nclass A { Object m = new TreeMap<>(); }\n";
        let result = lint(source);
        assert!(diags_for(&result, HashMapCapacity::NAME).is_empty());
    }

    #[test]
    fn test_fix_rewrites_to_factory_and_imports_it() {
        let source = format!("{IMPORT}class A {{ Object m = new HashMap<>(16); }}\n");
        let result = lint(&source);
        let fixed = apply_first_fix(&source, &result, HashMapCapacity::NAME);
        assert!(fixed.contains("Maps.newHashMapWithExpectedSize(16)"));
        assert!(fixed.contains("import com.google.common.collect.Maps;"));
        assert!(!fixed.contains("new HashMap<>(16)"));
    }

    #[test]
    fn test_fix_is_idempotent() {
        let source = format!("{IMPORT}class A {{ Object m = new HashMap<>(16); }}\n");
        let result = lint(&source);
        let fixed = apply_first_fix(&source, &result, HashMapCapacity::NAME);
        let rerun = lint(&fixed);
        assert!(diags_for(&rerun, HashMapCapacity::NAME).is_empty());
    }
}
