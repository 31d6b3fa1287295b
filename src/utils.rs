//! Utility functions over host syntax-tree nodes

use tree_sitter::Node;

use crate::source::SourceFile;

/// Depth-first walk over every node in the subtree, including `root`.
pub fn walk<'t>(root: Node<'t>, f: &mut impl FnMut(Node<'t>)) {
    let mut cursor = root.walk();
    loop {
        f(cursor.node());
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

/// Named children of a node, skipping comments.
pub fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|n| !is_comment(*n))
        .collect()
}

pub fn is_comment(node: Node<'_>) -> bool {
    matches!(node.kind(), "line_comment" | "block_comment")
}

/// First child (named or not) of the given kind.
pub fn child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let result = node.children(&mut cursor).find(|n| n.kind() == kind);
    result
}

/// Arguments of a `method_invocation` or `object_creation_expression`.
pub fn arguments<'t>(call: Node<'t>) -> Vec<Node<'t>> {
    call.child_by_field_name("arguments")
        .map(named_children)
        .unwrap_or_default()
}

pub fn argument_count(call: Node<'_>) -> usize {
    arguments(call).len()
}

/// Receiver expression of a `method_invocation`, if any.
pub fn receiver<'t>(call: Node<'t>) -> Option<Node<'t>> {
    call.child_by_field_name("object")
}

/// Invoked method name of a `method_invocation`.
pub fn method_name<'t>(call: Node<'t>, src: &'t SourceFile) -> Option<&'t str> {
    call.child_by_field_name("name").map(|n| src.node_text(n))
}

/// The `modifiers` node of a declaration, if present.
pub fn modifiers<'t>(decl: Node<'t>) -> Option<Node<'t>> {
    child_of_kind(decl, "modifiers")
}

/// Whether a declaration carries the given modifier keyword.
pub fn has_modifier(decl: Node<'_>, keyword: &str, src: &SourceFile) -> bool {
    let Some(mods) = modifiers(decl) else {
        return false;
    };
    let mut cursor = mods.walk();
    let result = mods
        .children(&mut cursor)
        .any(|n| src.node_text(n) == keyword);
    result
}

/// Annotation nodes attached to a declaration's modifier list.
pub fn annotations<'t>(decl: Node<'t>) -> Vec<Node<'t>> {
    let Some(mods) = modifiers(decl) else {
        return Vec::new();
    };
    let mut cursor = mods.walk();
    mods.children(&mut cursor)
        .filter(|n| matches!(n.kind(), "annotation" | "marker_annotation"))
        .collect()
}

/// Simple name of an annotation (`@foo.Bar(..)` yields `Bar`).
pub fn annotation_name<'t>(annotation: Node<'t>, src: &'t SourceFile) -> Option<&'t str> {
    let name = annotation.child_by_field_name("name")?;
    let text = src.node_text(name);
    Some(text.rsplit('.').next().unwrap_or(text))
}

/// Whether a declaration carries an annotation with the given simple name.
pub fn has_annotation(decl: Node<'_>, name: &str, src: &SourceFile) -> bool {
    annotations(decl)
        .into_iter()
        .any(|a| annotation_name(a, src) == Some(name))
}

pub fn is_null_literal(node: Node<'_>) -> bool {
    node.kind() == "null_literal"
}

/// Value of a string literal node, without the surrounding quotes.
pub fn string_literal_value(node: Node<'_>, src: &SourceFile) -> Option<String> {
    if node.kind() != "string_literal" {
        return None;
    }
    let text = src.node_text(node);
    Some(text.trim_matches('"').to_string())
}

/// Count identifier nodes with the given text outside of import
/// declarations.
pub fn count_code_identifiers(root: Node<'_>, name: &str, src: &SourceFile) -> usize {
    fn go(node: Node<'_>, name: &str, src: &SourceFile, count: &mut usize) {
        if node.kind() == "import_declaration" {
            return;
        }
        if node.kind() == "identifier" && src.node_text(node) == name {
            *count += 1;
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            go(child, name, src, count);
        }
    }
    let mut count = 0;
    go(root, name, src, &mut count);
    count
}

/// Count declaration sites (fields, locals, parameters, catch parameters,
/// for-each variables, methods, types) introducing the given name.
pub fn count_declarations(root: Node<'_>, name: &str, src: &SourceFile) -> usize {
    let mut count = 0;
    walk(root, &mut |node| {
        let declared = match node.kind() {
            "variable_declarator"
            | "formal_parameter"
            | "catch_formal_parameter"
            | "enhanced_for_statement"
            | "method_declaration"
            | "class_declaration"
            | "interface_declaration"
            | "enum_declaration" => node.child_by_field_name("name"),
            _ => None,
        };
        if let Some(n) = declared {
            if src.node_text(n) == name {
                count += 1;
            }
        }
    });
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceFile;

    fn parse(source: &str) -> SourceFile {
        SourceFile::parse("Test.java", source).unwrap()
    }

    fn find_kind<'t>(root: Node<'t>, kind: &str) -> Option<Node<'t>> {
        let mut found = None;
        walk(root, &mut |n| {
            if found.is_none() && n.kind() == kind {
                found = Some(n);
            }
        });
        found
    }

    #[test]
    fn test_arguments_and_receiver() {
        let src = parse("class A { void f() { SafeArg.of(\"x\", 1); } }");
        let call = find_kind(src.root(), "method_invocation").unwrap();
        assert_eq!(argument_count(call), 2);
        assert_eq!(method_name(call, &src), Some("of"));
        let recv = receiver(call).unwrap();
        assert_eq!(src.node_text(recv), "SafeArg");
    }

    #[test]
    fn test_modifiers_and_annotations() {
        let src = parse("class A { @Test private final int x = 1; }");
        let field = find_kind(src.root(), "field_declaration").unwrap();
        assert!(has_modifier(field, "private", &src));
        assert!(has_modifier(field, "final", &src));
        assert!(!has_modifier(field, "static", &src));
        assert!(has_annotation(field, "Test", &src));
    }

    #[test]
    fn test_qualified_annotation_name() {
        let src = parse("class A { @org.junit.jupiter.api.Test void f() {} }");
        let method = find_kind(src.root(), "method_declaration").unwrap();
        assert!(has_annotation(method, "Test", &src));
    }

    #[test]
    fn test_string_literal_value() {
        let src = parse("class A { String s = \"cause\"; }");
        let lit = find_kind(src.root(), "string_literal").unwrap();
        assert_eq!(string_literal_value(lit, &src), Some("cause".to_string()));
    }

    #[test]
    fn test_count_code_identifiers_skips_imports() {
        let src = parse(
            "import com.palantir.logsafe.SafeArg;\nclass A { Object x = SafeArg.of(\"a\", 1); }",
        );
        assert_eq!(count_code_identifiers(src.root(), "SafeArg", &src), 1);
    }

    #[test]
    fn test_count_declarations() {
        let src = parse("class A { int log; void f(int log) { int x = log; } }");
        assert_eq!(count_declarations(src.root(), "log", &src), 2);
        assert_eq!(count_declarations(src.root(), "x", &src), 1);
    }
}
