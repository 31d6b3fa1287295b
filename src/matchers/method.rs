//! Method and constructor matchers

use std::sync::OnceLock;

use regex::Regex;
use tree_sitter::Node;

use crate::context::CheckContext;
use crate::matchers::{types, Matcher};
use crate::utils;

/// Predicate over a resolved qualified type name.
#[derive(Debug, Clone, Copy)]
pub enum TypePredicate {
    Exact(&'static str),
    SubtypeOf(&'static str),
}

impl TypePredicate {
    pub fn test(&self, qualified: &str) -> bool {
        match self {
            TypePredicate::Exact(expected) => qualified == *expected,
            TypePredicate::SubtypeOf(supertype) => types::is_subtype_of(qualified, supertype),
        }
    }
}

/// Exact or regex-based name pattern. Regex patterns are anchored and
/// compiled once at first use; an invalid built-in pattern is a
/// programmer error and panics at first use.
pub struct NamePattern {
    pattern: &'static str,
    is_regex: bool,
    compiled: OnceLock<Regex>,
}

impl NamePattern {
    pub fn exact(pattern: &'static str) -> Self {
        Self {
            pattern,
            is_regex: false,
            compiled: OnceLock::new(),
        }
    }

    pub fn regex(pattern: &'static str) -> Self {
        Self {
            pattern,
            is_regex: true,
            compiled: OnceLock::new(),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        if !self.is_regex {
            return name == self.pattern;
        }
        self.compiled
            .get_or_init(|| {
                Regex::new(&format!("^(?:{})$", self.pattern)).expect("invalid built-in name pattern")
            })
            .is_match(name)
    }
}

/// Matches `method_invocation` nodes by owner type, method name, and
/// arity. The owner is resolved first as an expression (instance calls),
/// then as a type name (static calls); when neither resolves the matcher
/// fails closed.
pub struct MethodMatcher {
    owner: Option<TypePredicate>,
    name: NamePattern,
    arity: Option<usize>,
}

impl MethodMatcher {
    pub fn named(name: &'static str) -> Self {
        Self {
            owner: None,
            name: NamePattern::exact(name),
            arity: None,
        }
    }

    pub fn name_matching(pattern: &'static str) -> Self {
        Self {
            owner: None,
            name: NamePattern::regex(pattern),
            arity: None,
        }
    }

    pub fn on_exact(mut self, owner: &'static str) -> Self {
        self.owner = Some(TypePredicate::Exact(owner));
        self
    }

    pub fn on_subtype_of(mut self, owner: &'static str) -> Self {
        self.owner = Some(TypePredicate::SubtypeOf(owner));
        self
    }

    pub fn with_arity(mut self, arity: usize) -> Self {
        self.arity = Some(arity);
        self
    }

    fn owner_matches(&self, call: Node<'_>, ctx: &CheckContext<'_>) -> bool {
        let Some(predicate) = &self.owner else {
            return true;
        };
        let Some(recv) = utils::receiver(call) else {
            return false;
        };
        if let Some(ty) = ctx.semantic().resolve_expression_type(recv, ctx.source()) {
            return predicate.test(&ty);
        }
        if recv.kind() == "identifier" {
            if let Some(ty) = ctx.semantic().resolve_simple(ctx.text(recv)) {
                return predicate.test(&ty);
            }
        }
        // Fully-qualified static receiver written inline.
        if let TypePredicate::Exact(expected) = predicate {
            return ctx.text(recv) == *expected;
        }
        false
    }
}

impl Matcher for MethodMatcher {
    fn matches(&self, node: Node<'_>, ctx: &CheckContext<'_>) -> bool {
        if node.kind() != "method_invocation" {
            return false;
        }
        let Some(name) = utils::method_name(node, ctx.source()) else {
            return false;
        };
        if !self.name.matches(name) {
            return false;
        }
        if let Some(arity) = self.arity {
            if utils::argument_count(node) != arity {
                return false;
            }
        }
        self.owner_matches(node, ctx)
    }
}

/// Matches `object_creation_expression` nodes by created type and arity.
pub struct ConstructorMatcher {
    created: TypePredicate,
    arity: Option<usize>,
}

impl ConstructorMatcher {
    pub fn of_exact(created: &'static str) -> Self {
        Self {
            created: TypePredicate::Exact(created),
            arity: None,
        }
    }

    pub fn of_subtype(created: &'static str) -> Self {
        Self {
            created: TypePredicate::SubtypeOf(created),
            arity: None,
        }
    }

    pub fn with_arity(mut self, arity: usize) -> Self {
        self.arity = Some(arity);
        self
    }
}

impl Matcher for ConstructorMatcher {
    fn matches(&self, node: Node<'_>, ctx: &CheckContext<'_>) -> bool {
        if node.kind() != "object_creation_expression" {
            return false;
        }
        if let Some(arity) = self.arity {
            if utils::argument_count(node) != arity {
                return false;
            }
        }
        let Some(ty) = node.child_by_field_name("type") else {
            return false;
        };
        ctx.semantic()
            .resolve_type_node(ty, ctx.source())
            .is_some_and(|resolved| self.created.test(&resolved))
    }
}
