//! Fix construction and application
//!
//! A fix is a set of non-overlapping text replacements over the original
//! source, plus import adjustments resolved against the file's import
//! block. Builders that would produce overlapping edits yield no fix at
//! all; the check then reports the diagnostic without one.

use tree_sitter::Node;

use crate::context::CheckContext;
use crate::diagnostic::{Fix, Replacement, Span};

pub struct FixBuilder<'a> {
    ctx: &'a CheckContext<'a>,
    description: String,
    replacements: Vec<Replacement>,
    add_imports: Vec<String>,
    remove_imports: Vec<String>,
}

impl<'a> FixBuilder<'a> {
    pub fn new(ctx: &'a CheckContext<'a>, description: impl Into<String>) -> Self {
        Self {
            ctx,
            description: description.into(),
            replacements: Vec::new(),
            add_imports: Vec::new(),
            remove_imports: Vec::new(),
        }
    }

    /// Replace the text covered by a node.
    pub fn replace(mut self, node: Node<'_>, text: impl Into<String>) -> Self {
        self.replacements
            .push(Replacement::new(Span::of(node), text));
        self
    }

    pub fn replace_span(mut self, span: Span, text: impl Into<String>) -> Self {
        self.replacements.push(Replacement::new(span, text));
        self
    }

    pub fn insert(mut self, at: usize, text: impl Into<String>) -> Self {
        self.replacements.push(Replacement::new(Span::new(at, at), text));
        self
    }

    /// Ensure `qualified` is imported; no edit is produced when an
    /// existing import already covers it.
    pub fn add_import(mut self, qualified: impl Into<String>) -> Self {
        self.add_imports.push(qualified.into());
        self
    }

    /// Remove the import of `qualified`. Callers are responsible for
    /// ensuring the fix eliminates its last use.
    pub fn remove_import(mut self, qualified: impl Into<String>) -> Self {
        self.remove_imports.push(qualified.into());
        self
    }

    /// Validate and produce the fix, or `None` when edits overlap.
    pub fn build(self) -> Option<Fix> {
        let semantic = self.ctx.semantic();
        let source = self.ctx.source();
        let mut replacements = self.replacements;

        for qualified in &self.remove_imports {
            let Some(import) = semantic
                .imports()
                .iter()
                .find(|i| !i.is_wildcard && i.qualified == *qualified)
            else {
                continue;
            };
            let mut end = import.end;
            if source.text().as_bytes().get(end) == Some(&b'\n') {
                end += 1;
            }
            replacements.push(Replacement::new(Span::new(import.start, end), ""));
        }

        let missing: Vec<&String> = self
            .add_imports
            .iter()
            .filter(|q| !semantic.has_import(q))
            .collect();
        if !missing.is_empty() {
            // Anchor after the last import that survives the fix, so the
            // insertion never lands inside a removed span.
            let anchor = semantic
                .imports()
                .iter()
                .filter(|i| !self.remove_imports.contains(&i.qualified))
                .map(|i| i.end)
                .max();
            let block: String = missing
                .iter()
                .map(|q| format!("import {q};"))
                .collect::<Vec<_>>()
                .join("\n");
            let (at, text) = match (anchor, semantic.package_end()) {
                (Some(end), _) => (end, format!("\n{block}")),
                (None, Some(end)) => (end, format!("\n\n{block}")),
                (None, None) => (0, format!("{block}\n\n")),
            };
            replacements.push(Replacement::new(Span::new(at, at), text));
        }

        replacements.sort_by_key(|r| (r.start, r.end));
        for pair in replacements.windows(2) {
            if pair[0].overlaps(&pair[1]) {
                return None;
            }
        }

        Some(Fix {
            description: self.description,
            replacements,
        })
    }
}

/// Apply a single fix, returning the rewritten source.
pub fn apply_fix(source: &str, fix: &Fix) -> String {
    let mut result = source.to_string();
    for replacement in fix.replacements.iter().rev() {
        if replacement.end <= result.len() {
            result.replace_range(replacement.start..replacement.end, &replacement.text);
        }
    }
    result
}

/// Apply the first fix of each diagnostic, greedily skipping any fix
/// that conflicts with one already accepted. Identical replacements
/// (notably repeated import insertions) are merged. Returns the
/// rewritten source and the number of fixes applied.
pub fn apply_fixes(source: &str, fixes: &[&Fix]) -> (String, usize) {
    let mut accepted: Vec<Replacement> = Vec::new();
    let mut applied = 0;
    for fix in fixes {
        let fresh: Vec<&Replacement> = fix
            .replacements
            .iter()
            .filter(|r| !accepted.contains(r))
            .collect();
        let conflicts = fresh
            .iter()
            .any(|&r| accepted.iter().any(|a| a.overlaps(r)));
        if conflicts {
            continue;
        }
        accepted.extend(fresh.into_iter().cloned());
        applied += 1;
    }
    accepted.sort_by_key(|r| (r.start, r.end));

    let mut result = source.to_string();
    for replacement in accepted.iter().rev() {
        if replacement.end <= result.len() {
            result.replace_range(replacement.start..replacement.end, &replacement.text);
        }
    }
    (result, applied)
}
