//! Matcher primitives
//!
//! Matchers are pure predicates over a syntax node and the per-file
//! semantic context. They are total: unresolved symbols, malformed
//! shapes, and null literals all yield `false`, never a panic.

pub mod method;
pub mod types;

pub use method::{ConstructorMatcher, MethodMatcher, NamePattern, TypePredicate};

use tree_sitter::Node;

use crate::context::CheckContext;
use crate::utils;

pub trait Matcher {
    fn matches(&self, node: Node<'_>, ctx: &CheckContext<'_>) -> bool;
}

impl<F> Matcher for F
where
    F: Fn(Node<'_>, &CheckContext<'_>) -> bool,
{
    fn matches(&self, node: Node<'_>, ctx: &CheckContext<'_>) -> bool {
        self(node, ctx)
    }
}

/// Short-circuiting conjunction.
pub fn all_of<A: Matcher, B: Matcher>(a: A, b: B) -> AllOf<A, B> {
    AllOf(a, b)
}

/// Short-circuiting disjunction.
pub fn any_of<A: Matcher, B: Matcher>(a: A, b: B) -> AnyOf<A, B> {
    AnyOf(a, b)
}

pub fn not<M: Matcher>(inner: M) -> Not<M> {
    Not(inner)
}

pub struct AllOf<A, B>(A, B);

impl<A: Matcher, B: Matcher> Matcher for AllOf<A, B> {
    fn matches(&self, node: Node<'_>, ctx: &CheckContext<'_>) -> bool {
        self.0.matches(node, ctx) && self.1.matches(node, ctx)
    }
}

pub struct AnyOf<A, B>(A, B);

impl<A: Matcher, B: Matcher> Matcher for AnyOf<A, B> {
    fn matches(&self, node: Node<'_>, ctx: &CheckContext<'_>) -> bool {
        self.0.matches(node, ctx) || self.1.matches(node, ctx)
    }
}

pub struct Not<M>(M);

impl<M: Matcher> Matcher for Not<M> {
    fn matches(&self, node: Node<'_>, ctx: &CheckContext<'_>) -> bool {
        !self.0.matches(node, ctx)
    }
}

/// Matches expressions whose declared type is a subtype of `supertype`.
///
/// A null literal is never a subtype of anything here: the matcher
/// returns `false` rather than reasoning about the null type.
pub struct SubtypeMatcher {
    supertype: &'static str,
}

impl SubtypeMatcher {
    pub fn of(supertype: &'static str) -> Self {
        Self { supertype }
    }
}

impl Matcher for SubtypeMatcher {
    fn matches(&self, node: Node<'_>, ctx: &CheckContext<'_>) -> bool {
        if utils::is_null_literal(node) {
            return false;
        }
        ctx.semantic()
            .resolve_expression_type(node, ctx.source())
            .is_some_and(|ty| types::is_subtype_of(&ty, self.supertype))
    }
}

/// Matches declarations carrying an annotation with the given simple name.
pub struct AnnotationMatcher {
    name: &'static str,
}

impl AnnotationMatcher {
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }
}

impl Matcher for AnnotationMatcher {
    fn matches(&self, node: Node<'_>, ctx: &CheckContext<'_>) -> bool {
        utils::has_annotation(node, self.name, ctx.source())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::Semantic;
    use crate::source::SourceFile;

    fn with_ctx(source: &str, f: impl FnOnce(&SourceFile, &CheckContext<'_>)) {
        let src = SourceFile::parse("Test.java", source).unwrap();
        let sem = Semantic::analyze(&src);
        let ctx = CheckContext::new(&src, &sem);
        f(&src, &ctx);
    }

    fn find_kind<'t>(root: Node<'t>, kind: &str) -> Option<Node<'t>> {
        let mut found = None;
        utils::walk(root, &mut |n| {
            if found.is_none() && n.kind() == kind {
                found = Some(n);
            }
        });
        found
    }

    #[test]
    fn test_combinators_short_circuit() {
        with_ctx("class A {}", |src, ctx| {
            let node = src.root();
            let yes = |_: Node<'_>, _: &CheckContext<'_>| true;
            let boom = |_: Node<'_>, _: &CheckContext<'_>| -> bool {
                panic!("second operand must not be evaluated")
            };
            assert!(!all_of(|_: Node<'_>, _: &CheckContext<'_>| false, boom).matches(node, ctx));
            assert!(any_of(yes, boom).matches(node, ctx));
            assert!(!not(yes).matches(node, ctx));
        });
    }

    #[test]
    fn test_subtype_matcher_on_null_literal_is_false() {
        with_ctx("class A { Object x = null; }", |src, ctx| {
            let null = find_kind(src.root(), "null_literal").unwrap();
            assert!(!SubtypeMatcher::of("java.lang.Object").matches(null, ctx));
        });
    }

    #[test]
    fn test_subtype_matcher_resolves_catch_parameter() {
        with_ctx(
            "class A { void f() { try { g(); } catch (Exception e) { h(e); } } }",
            |src, ctx| {
                let mut target = None;
                utils::walk(src.root(), &mut |n| {
                    if n.kind() == "method_invocation" && src.node_text(n).starts_with("h(") {
                        target = Some(n);
                    }
                });
                let arg = utils::arguments(target.unwrap())[0];
                assert!(SubtypeMatcher::of("java.lang.Throwable").matches(arg, ctx));
                assert!(!SubtypeMatcher::of("java.lang.Error").matches(arg, ctx));
            },
        );
    }

    #[test]
    fn test_subtype_matcher_fails_closed_on_unresolved() {
        with_ctx("class A { void f() { h(mystery); } }", |src, ctx| {
            let call = find_kind(src.root(), "method_invocation").unwrap();
            let arg = utils::arguments(call)[0];
            assert!(!SubtypeMatcher::of("java.lang.Object").matches(arg, ctx));
        });
    }

    #[test]
    fn test_annotation_matcher() {
        with_ctx("class A { @Override void f() {} }", |src, ctx| {
            let method = find_kind(src.root(), "method_declaration").unwrap();
            assert!(AnnotationMatcher::named("Override").matches(method, ctx));
            assert!(!AnnotationMatcher::named("Test").matches(method, ctx));
        });
    }
}
