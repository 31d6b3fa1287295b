//! Static-analysis checks for discouraged Java patterns
//!
//! This crate is a collection of independent lint rules over Java source.
//! Parsing is delegated to tree-sitter; each rule is a small visitor that
//! matches a syntax-tree shape, consults a per-file semantic index, and
//! emits a diagnostic with an optional mechanical fix. Rules can be used:
//! 1. Standalone through [`lint`]/[`lint_with_config`] for custom tooling
//! 2. Through the bundled `baseline-lint` command-line driver

pub mod config;
pub mod fix;
pub mod matchers;
pub mod registry;
pub mod rules;
pub mod runner;
pub mod semantic;
pub mod utils;
mod context;
mod diagnostic;
mod error;
mod source;

pub use config::Config;
pub use context::CheckContext;
pub use diagnostic::{Diagnostic, Fix, Replacement, Severity, Span};
pub use error::{LintError, Result};
pub use registry::{builtin_rules, find_rule, RuleEntry, RuleInfo};
pub use runner::{lint, lint_with_config, Check, LintResult, LintRunner};
pub use semantic::Semantic;
pub use source::SourceFile;

/// Rule category for baseline rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    /// Rules that detect code that is likely to be incorrect
    Correctness,
    /// Rules that suggest improvements
    Pedantic,
    /// Rules that encourage best practices
    Style,
    /// Rules that may have false positives (experimental)
    Nursery,
}

impl RuleCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleCategory::Correctness => "correctness",
            RuleCategory::Pedantic => "pedantic",
            RuleCategory::Style => "style",
            RuleCategory::Nursery => "nursery",
        }
    }
}

/// Rule metadata
pub trait RuleMeta {
    const NAME: &'static str;
    /// Backward-compatible identifiers still accepted for suppression
    /// and configuration.
    const ALIASES: &'static [&'static str] = &[];
    const CATEGORY: RuleCategory;
    const DESCRIPTION: &'static str;
}

#[cfg(test)]
pub(crate) mod test_util {
    use crate::{Config, Diagnostic, LintResult, SourceFile};

    pub fn parse(source: &str) -> SourceFile {
        SourceFile::parse("Test.java", source).expect("source should parse")
    }

    pub fn lint(source: &str) -> LintResult {
        crate::lint(&parse(source))
    }

    pub fn lint_with(source: &str, config: &Config) -> LintResult {
        crate::lint_with_config(&parse(source), config).expect("config should be valid")
    }

    pub fn diags_for<'a>(result: &'a LintResult, rule: &str) -> Vec<&'a Diagnostic> {
        result.diagnostics.iter().filter(|d| d.rule == rule).collect()
    }

    /// Apply the first fix of the first diagnostic of `rule` and return the
    /// rewritten source.
    pub fn apply_first_fix(source: &str, result: &LintResult, rule: &str) -> String {
        let diag = result
            .diagnostics
            .iter()
            .find(|d| d.rule == rule && !d.fixes.is_empty())
            .expect("expected a fixable diagnostic");
        crate::fix::apply_fix(source, &diag.fixes[0])
    }
}
