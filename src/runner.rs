//! Single-pass runner dispatching syntax nodes to all enabled checks
//!
//! The tree is walked once per file; each node kind with registered
//! callbacks is offered to every enabled check. Checks are independent
//! and order-insensitive; diagnostics suppressed via
//! `@SuppressWarnings` are dropped at the dispatch site.

use tree_sitter::Node;

use crate::config::Config;
use crate::context::CheckContext;
use crate::diagnostic::{Diagnostic, Severity};
use crate::error::Result;
use crate::registry;
use crate::semantic::Semantic;
use crate::source::SourceFile;

/// One lint rule: a set of node-kind callbacks over the check context.
///
/// Every callback defaults to "no violation"; rules override only the
/// kinds they care about. Callbacks must be side-effect free beyond the
/// diagnostics they return.
pub trait Check {
    fn name(&self) -> &'static str;

    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    fn check_method_invocation(&self, _node: Node<'_>, _ctx: &CheckContext<'_>) -> Vec<Diagnostic> {
        Vec::new()
    }

    fn check_object_creation(&self, _node: Node<'_>, _ctx: &CheckContext<'_>) -> Vec<Diagnostic> {
        Vec::new()
    }

    fn check_class_declaration(&self, _node: Node<'_>, _ctx: &CheckContext<'_>) -> Vec<Diagnostic> {
        Vec::new()
    }

    fn check_assert_statement(&self, _node: Node<'_>, _ctx: &CheckContext<'_>) -> Vec<Diagnostic> {
        Vec::new()
    }

    fn check_field_declaration(&self, _node: Node<'_>, _ctx: &CheckContext<'_>) -> Vec<Diagnostic> {
        Vec::new()
    }

    fn check_if_statement(&self, _node: Node<'_>, _ctx: &CheckContext<'_>) -> Vec<Diagnostic> {
        Vec::new()
    }

    fn check_binary_expression(&self, _node: Node<'_>, _ctx: &CheckContext<'_>) -> Vec<Diagnostic> {
        Vec::new()
    }
}

/// A check prepared for one run: the boxed rule plus its resolved
/// severity and the names accepted for suppression.
pub struct PreparedCheck {
    pub check: Box<dyn Check>,
    pub severity: Severity,
    pub suppression_names: Vec<&'static str>,
}

/// Result of linting one file
#[derive(Debug, Default)]
pub struct LintResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl LintResult {
    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn suggestion_count(&self) -> usize {
        self.count(Severity::Suggestion)
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

/// Runs all prepared checks over one file in a single traversal.
pub struct LintRunner<'a> {
    ctx: CheckContext<'a>,
    checks: Vec<PreparedCheck>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> LintRunner<'a> {
    pub fn new(ctx: CheckContext<'a>, checks: Vec<PreparedCheck>) -> Self {
        Self {
            ctx,
            checks,
            diagnostics: Vec::new(),
        }
    }

    pub fn run(mut self) -> LintResult {
        let root = self.ctx.source().root();
        let mut cursor = root.walk();
        loop {
            self.dispatch(cursor.node());
            if cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    let mut diagnostics = self.diagnostics;
                    diagnostics.sort_by_key(|d| (d.start, d.end));
                    return LintResult { diagnostics };
                }
            }
        }
    }

    fn dispatch(&mut self, node: Node<'_>) {
        let kind = node.kind();
        if !matches!(
            kind,
            "method_invocation"
                | "object_creation_expression"
                | "class_declaration"
                | "assert_statement"
                | "field_declaration"
                | "if_statement"
                | "binary_expression"
        ) {
            return;
        }
        for prepared in &self.checks {
            let found = match kind {
                "method_invocation" => prepared.check.check_method_invocation(node, &self.ctx),
                "object_creation_expression" => {
                    prepared.check.check_object_creation(node, &self.ctx)
                }
                "class_declaration" => prepared.check.check_class_declaration(node, &self.ctx),
                "assert_statement" => prepared.check.check_assert_statement(node, &self.ctx),
                "field_declaration" => prepared.check.check_field_declaration(node, &self.ctx),
                "if_statement" => prepared.check.check_if_statement(node, &self.ctx),
                "binary_expression" => prepared.check.check_binary_expression(node, &self.ctx),
                _ => Vec::new(),
            };
            if found.is_empty() {
                continue;
            }
            if self.ctx.semantic().is_suppressed(
                node,
                &prepared.suppression_names,
                self.ctx.source(),
            ) {
                continue;
            }
            let severity = prepared.severity;
            self.diagnostics
                .extend(found.into_iter().map(|d| d.with_severity(severity)));
        }
    }
}

/// Lint a file with the default configuration.
pub fn lint(source: &SourceFile) -> LintResult {
    lint_with_config(source, &Config::default())
        .unwrap_or_else(|_| unreachable!("default configuration is always valid"))
}

/// Lint a file with an explicit configuration.
///
/// Fails when the configuration names unknown rules.
pub fn lint_with_config(source: &SourceFile, config: &Config) -> Result<LintResult> {
    let checks = registry::resolve(config)?;
    let semantic = Semantic::analyze(source);
    let ctx = CheckContext::new(source, &semantic);
    Ok(LintRunner::new(ctx, checks).run())
}

/// Fixes attached to diagnostics, first fix per diagnostic, in source
/// order. Convenience for `--fix` style callers.
pub fn first_fixes(result: &LintResult) -> Vec<&crate::diagnostic::Fix> {
    result
        .diagnostics
        .iter()
        .filter_map(|d| d.fixes.first())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util;

    #[test]
    fn test_clean_file_has_no_diagnostics() {
        let result = test_util::lint(
            "package p;\n\
             import java.util.HashMap;\n\
             import java.util.Map;\n\
             class A {\n\
               private final Map<String, String> map = new HashMap<>();\n\
             }\n",
        );
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    }

    #[test]
    fn test_diagnostics_sorted_by_position() {
        let result = test_util::lint(
            "import java.util.HashMap;\n\
             class A {\n\
               Object a = new HashMap<>(16);\n\
               void f() { assert a != null; }\n\
             }\n",
        );
        assert!(result.diagnostics.len() >= 2);
        let starts: Vec<usize> = result.diagnostics.iter().map(|d| d.start).collect();
        let mut sorted = starts.clone();
        sorted.sort_unstable();
        assert_eq!(starts, sorted);
    }

    #[test]
    fn test_disabled_rule_does_not_run() {
        let config = crate::Config::default().with_disabled("hash-map-capacity");
        let result = test_util::lint_with(
            "import java.util.HashMap;\nclass A { Object a = new HashMap<>(16); }\n",
            &config,
        );
        assert!(test_util::diags_for(&result, "hash-map-capacity").is_empty());
    }

    #[test]
    fn test_severity_override_applies() {
        let config =
            crate::Config::default().with_severity("hash-map-capacity", Severity::Error);
        let result = test_util::lint_with(
            "import java.util.HashMap;\nclass A { Object a = new HashMap<>(16); }\n",
            &config,
        );
        let diags = test_util::diags_for(&result, "hash-map-capacity");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Error);
        assert!(result.has_errors());
    }

    #[test]
    fn test_unknown_rule_in_config_is_an_error() {
        let src = test_util::parse("class A {}");
        let config = crate::Config::default().with_disabled("no-such-rule");
        assert!(crate::lint_with_config(&src, &config).is_err());
    }

    #[test]
    fn test_suppression_by_stable_name_and_alias() {
        for name in ["hash-map-capacity", "HashMapUsage"] {
            let source = format!(
                "import java.util.HashMap;\n\
                 class A {{\n\
                   @SuppressWarnings(\"{name}\")\n\
                   Object a = new HashMap<>(16);\n\
                   Object b = new HashMap<>(16);\n\
                 }}\n"
            );
            let result = test_util::lint(&source);
            let diags = test_util::diags_for(&result, "hash-map-capacity");
            assert_eq!(diags.len(), 1, "suppression via {name:?} failed");
        }
    }
}
