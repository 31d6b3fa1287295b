//! Per-file semantic index
//!
//! A thin, read-only view over one file's declarations: package, imports,
//! identifier-to-type resolution, test-code classification, suppression
//! lookup, and compile-time constant evaluation. This is not a
//! type-checker; resolution that fails stays failed and matchers treat it
//! as no-match.

use rustc_hash::FxHashMap;
use tree_sitter::Node;

use crate::matchers::types::JAVA_LANG_SIMPLE;
use crate::source::SourceFile;
use crate::utils;

/// Annotations marking a method as a test.
const TEST_ANNOTATIONS: &[&str] = &[
    "Test",
    "ParameterizedTest",
    "RepeatedTest",
    "TestFactory",
];

/// Import prefixes marking a file as test code.
const TEST_IMPORT_PREFIXES: &[&str] = &["org.junit", "org.testng"];

const MAX_CONST_DEPTH: u32 = 16;

/// One `import` declaration.
#[derive(Debug, Clone)]
pub struct Import {
    /// Imported name with the trailing `.*` stripped for wildcards.
    pub qualified: String,
    pub is_static: bool,
    pub is_wildcard: bool,
    /// Byte span of the whole declaration including the semicolon.
    pub start: usize,
    pub end: usize,
}

/// Read-only semantic context for one source file.
pub struct Semantic {
    package: Option<String>,
    imports: Vec<Import>,
    by_simple: FxHashMap<String, String>,
    wildcards: Vec<String>,
    test_code: bool,
    package_end: Option<usize>,
}

impl Semantic {
    pub fn analyze(src: &SourceFile) -> Self {
        let root = src.root();
        let mut package = None;
        let mut package_end = None;
        let mut imports = Vec::new();
        let mut by_simple = FxHashMap::default();
        let mut wildcards = Vec::new();

        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            match child.kind() {
                "package_declaration" => {
                    let text = src.node_text(child);
                    let name = text
                        .trim_start_matches("package")
                        .trim_end_matches(';')
                        .trim()
                        .to_string();
                    package = Some(name);
                    package_end = Some(child.end_byte());
                }
                "import_declaration" => {
                    let text = src.node_text(child);
                    let mut name = text.trim_start_matches("import").trim();
                    let is_static = name.starts_with("static ");
                    if is_static {
                        name = name.trim_start_matches("static").trim();
                    }
                    let name = name.trim_end_matches(';').trim();
                    let is_wildcard = name.ends_with(".*");
                    let qualified = name.trim_end_matches(".*").to_string();

                    if is_wildcard {
                        wildcards.push(qualified.clone());
                    } else if !is_static {
                        if let Some(simple) = qualified.rsplit('.').next() {
                            by_simple.insert(simple.to_string(), qualified.clone());
                        }
                    }
                    imports.push(Import {
                        qualified,
                        is_static,
                        is_wildcard,
                        start: child.start_byte(),
                        end: child.end_byte(),
                    });
                }
                _ => {}
            }
        }

        let test_code = detect_test_code(src, &imports);

        Self {
            package,
            imports,
            by_simple,
            wildcards,
            test_code,
            package_end,
        }
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    pub fn imports(&self) -> &[Import] {
        &self.imports
    }

    /// Whether this file is test code (JUnit/TestNG imports or a
    /// test-annotated method).
    pub fn is_test_code(&self) -> bool {
        self.test_code
    }

    /// End byte of the package declaration, if present.
    pub fn package_end(&self) -> Option<usize> {
        self.package_end
    }

    /// Whether `qualified` is already reachable without a new import.
    pub fn has_import(&self, qualified: &str) -> bool {
        if qualified.starts_with("java.lang.") {
            return true;
        }
        if self
            .imports
            .iter()
            .any(|i| !i.is_static && !i.is_wildcard && i.qualified == qualified)
        {
            return true;
        }
        match qualified.rsplit_once('.') {
            Some((pkg, _)) => self.wildcards.iter().any(|w| w == pkg),
            None => false,
        }
    }

    /// Resolve a simple type name to a qualified name through explicit
    /// imports, `java.lang` implicits, and wildcard imports over the known
    /// type set. Unknown names stay unresolved.
    pub fn resolve_simple(&self, simple: &str) -> Option<String> {
        if let Some(qualified) = self.by_simple.get(simple) {
            return Some(qualified.clone());
        }
        if JAVA_LANG_SIMPLE.contains(simple) {
            return Some(format!("java.lang.{simple}"));
        }
        for wildcard in &self.wildcards {
            let candidate = format!("{wildcard}.{simple}");
            if crate::matchers::types::is_known_type(&candidate) {
                return Some(candidate);
            }
        }
        None
    }

    /// Resolve a type node (`type_identifier`, `generic_type`, …) to a
    /// qualified name or primitive name.
    pub fn resolve_type_node(&self, node: Node<'_>, src: &SourceFile) -> Option<String> {
        match node.kind() {
            "type_identifier" => self.resolve_simple(src.node_text(node)),
            "generic_type" => {
                let inner = utils::named_children(node)
                    .into_iter()
                    .find(|n| matches!(n.kind(), "type_identifier" | "scoped_type_identifier"))?;
                self.resolve_type_node(inner, src)
            }
            "scoped_type_identifier" => {
                let text = src.node_text(node);
                if text.contains('.') {
                    Some(text.to_string())
                } else {
                    self.resolve_simple(text)
                }
            }
            "integral_type" | "floating_point_type" | "boolean_type" => {
                Some(src.node_text(node).to_string())
            }
            _ => None,
        }
    }

    /// Static type of an expression node, as far as declared types allow.
    /// Anything involving inference (method returns, lambdas, unresolved
    /// names) yields `None`.
    pub fn resolve_expression_type(&self, node: Node<'_>, src: &SourceFile) -> Option<String> {
        match node.kind() {
            "string_literal" => Some("java.lang.String".to_string()),
            "character_literal" => Some("char".to_string()),
            "true" | "false" => Some("boolean".to_string()),
            "decimal_integer_literal"
            | "hex_integer_literal"
            | "octal_integer_literal"
            | "binary_integer_literal" => Some("int".to_string()),
            "decimal_floating_point_literal" => Some("double".to_string()),
            "null_literal" => None,
            "identifier" => self.resolve_identifier_type(node, src),
            "parenthesized_expression" => {
                let inner = utils::named_children(node).into_iter().next()?;
                self.resolve_expression_type(inner, src)
            }
            "cast_expression" => {
                let ty = node.child_by_field_name("type")?;
                self.resolve_type_node(ty, src)
            }
            "object_creation_expression" => {
                let ty = node.child_by_field_name("type")?;
                self.resolve_type_node(ty, src)
            }
            "binary_expression" => {
                // String concatenation is the only operator with a stable
                // reference result type.
                let op = node.child_by_field_name("operator")?;
                if src.node_text(op) != "+" {
                    return None;
                }
                let left = node.child_by_field_name("left")?;
                let right = node.child_by_field_name("right")?;
                let string = Some("java.lang.String".to_string());
                if self.resolve_expression_type(left, src) == string
                    || self.resolve_expression_type(right, src) == string
                {
                    string
                } else {
                    None
                }
            }
            "field_access" => {
                let object = node.child_by_field_name("object")?;
                if object.kind() != "this" {
                    return None;
                }
                let field = node.child_by_field_name("field")?;
                self.resolve_field_type(node, src.node_text(field), src)
            }
            _ => None,
        }
    }

    /// Declared type of an identifier, found by walking enclosing scopes:
    /// catch parameters, method/constructor parameters, local variables
    /// declared earlier in an enclosing block, for-each variables, fields.
    fn resolve_identifier_type(&self, ident: Node<'_>, src: &SourceFile) -> Option<String> {
        let name = src.node_text(ident);
        let usage_start = ident.start_byte();

        let mut current = ident;
        while let Some(parent) = current.parent() {
            match parent.kind() {
                "catch_clause" => {
                    if let Some(param) = utils::child_of_kind(parent, "catch_formal_parameter") {
                        if let Some(ty) = self.catch_parameter_type(param, name, src) {
                            return Some(ty);
                        }
                    }
                }
                "method_declaration" | "constructor_declaration" => {
                    if let Some(params) = parent.child_by_field_name("parameters") {
                        for param in utils::named_children(params) {
                            if param.kind() != "formal_parameter" {
                                continue;
                            }
                            if self.declarator_named(param, name, src) {
                                let ty = param.child_by_field_name("type")?;
                                return self.resolve_type_node(ty, src);
                            }
                        }
                    }
                }
                "lambda_expression" => {
                    // Lambda parameter types are inferred; fail closed if
                    // the name is bound here.
                    if let Some(params) = parent.child_by_field_name("parameters") {
                        let mut bound = false;
                        utils::walk(params, &mut |n| {
                            if n.kind() == "identifier" && src.node_text(n) == name {
                                bound = true;
                            }
                        });
                        if bound {
                            return None;
                        }
                    }
                }
                "block" | "constructor_body" => {
                    for stmt in utils::named_children(parent) {
                        if stmt.kind() != "local_variable_declaration"
                            || stmt.start_byte() >= usage_start
                        {
                            continue;
                        }
                        if self.declarator_in(stmt, name, src) {
                            let ty = stmt.child_by_field_name("type")?;
                            return self.resolve_type_node(ty, src);
                        }
                    }
                }
                "enhanced_for_statement" => {
                    if self.declarator_named(parent, name, src) {
                        let ty = parent.child_by_field_name("type")?;
                        return self.resolve_type_node(ty, src);
                    }
                }
                "class_declaration" | "enum_declaration" | "interface_declaration" => {
                    if let Some(ty) = self.resolve_field_type(parent, name, src) {
                        return Some(ty);
                    }
                }
                _ => {}
            }
            current = parent;
        }
        None
    }

    fn catch_parameter_type(
        &self,
        param: Node<'_>,
        name: &str,
        src: &SourceFile,
    ) -> Option<String> {
        if !self.declarator_named(param, name, src) {
            return None;
        }
        let catch_type = utils::child_of_kind(param, "catch_type")?;
        // Multi-catch unions resolve through the first alternative.
        let first = utils::named_children(catch_type).into_iter().next()?;
        self.resolve_type_node(first, src)
    }

    /// Type of a field named `name` declared in the class enclosing `node`.
    fn resolve_field_type(&self, node: Node<'_>, name: &str, src: &SourceFile) -> Option<String> {
        let mut current = node;
        loop {
            if matches!(
                current.kind(),
                "class_declaration" | "enum_declaration" | "interface_declaration"
            ) {
                let body = current.child_by_field_name("body")?;
                for member in utils::named_children(body) {
                    if member.kind() != "field_declaration" {
                        continue;
                    }
                    if self.declarator_in(member, name, src) {
                        let ty = member.child_by_field_name("type")?;
                        return self.resolve_type_node(ty, src);
                    }
                }
                return None;
            }
            current = current.parent()?;
        }
    }

    fn declarator_named(&self, decl: Node<'_>, name: &str, src: &SourceFile) -> bool {
        decl.child_by_field_name("name")
            .is_some_and(|n| src.node_text(n) == name)
    }

    fn declarator_in(&self, decl: Node<'_>, name: &str, src: &SourceFile) -> bool {
        utils::named_children(decl)
            .into_iter()
            .filter(|n| n.kind() == "variable_declarator")
            .any(|d| self.declarator_named(d, name, src))
    }

    /// Evaluate a compile-time integer constant: literals, arithmetic over
    /// constants, and references to in-file `static final` fields.
    pub fn int_constant(&self, node: Node<'_>, src: &SourceFile) -> Option<i64> {
        self.int_constant_inner(node, src, MAX_CONST_DEPTH)
    }

    fn int_constant_inner(&self, node: Node<'_>, src: &SourceFile, depth: u32) -> Option<i64> {
        if depth == 0 {
            return None;
        }
        match node.kind() {
            "decimal_integer_literal"
            | "hex_integer_literal"
            | "octal_integer_literal"
            | "binary_integer_literal" => parse_int_literal(src.node_text(node)),
            "parenthesized_expression" => {
                let inner = utils::named_children(node).into_iter().next()?;
                self.int_constant_inner(inner, src, depth - 1)
            }
            "unary_expression" => {
                let operand = node.child_by_field_name("operand")?;
                let value = self.int_constant_inner(operand, src, depth - 1)?;
                match src.node_text(node.child_by_field_name("operator")?) {
                    "-" => value.checked_neg(),
                    "+" => Some(value),
                    _ => None,
                }
            }
            "binary_expression" => {
                let left = self.int_constant_inner(node.child_by_field_name("left")?, src, depth - 1)?;
                let right =
                    self.int_constant_inner(node.child_by_field_name("right")?, src, depth - 1)?;
                match src.node_text(node.child_by_field_name("operator")?) {
                    "+" => left.checked_add(right),
                    "-" => left.checked_sub(right),
                    "*" => left.checked_mul(right),
                    "/" => left.checked_div(right),
                    "%" => left.checked_rem(right),
                    "<<" => u32::try_from(right).ok().and_then(|r| left.checked_shl(r)),
                    ">>" => u32::try_from(right).ok().and_then(|r| left.checked_shr(r)),
                    _ => None,
                }
            }
            "identifier" => {
                let name = src.node_text(node);
                let init = find_constant_field_value(src.root(), name, src)?;
                self.int_constant_inner(init, src, depth - 1)
            }
            _ => None,
        }
    }

    /// Whether a diagnostic at `node` is suppressed via
    /// `@SuppressWarnings` on an enclosing declaration, matching any of
    /// the given rule names.
    pub fn is_suppressed(&self, node: Node<'_>, names: &[&str], src: &SourceFile) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if is_annotatable_declaration(n.kind()) {
                for annotation in utils::annotations(n) {
                    if utils::annotation_name(annotation, src) != Some("SuppressWarnings") {
                        continue;
                    }
                    let Some(args) = annotation.child_by_field_name("arguments") else {
                        continue;
                    };
                    let mut suppressed = false;
                    utils::walk(args, &mut |arg| {
                        if let Some(value) = utils::string_literal_value(arg, src) {
                            if names.iter().any(|name| *name == value) {
                                suppressed = true;
                            }
                        }
                    });
                    if suppressed {
                        return true;
                    }
                }
            }
            current = n.parent();
        }
        false
    }
}

fn is_annotatable_declaration(kind: &str) -> bool {
    matches!(
        kind,
        "class_declaration"
            | "interface_declaration"
            | "enum_declaration"
            | "method_declaration"
            | "constructor_declaration"
            | "field_declaration"
            | "local_variable_declaration"
    )
}

fn detect_test_code(src: &SourceFile, imports: &[Import]) -> bool {
    if imports.iter().any(|i| {
        TEST_IMPORT_PREFIXES
            .iter()
            .any(|p| i.qualified.starts_with(p))
    }) {
        return true;
    }
    let mut found = false;
    utils::walk(src.root(), &mut |node| {
        if found || node.kind() != "method_declaration" {
            return;
        }
        if TEST_ANNOTATIONS
            .iter()
            .any(|a| utils::has_annotation(node, a, src))
        {
            found = true;
        }
    });
    found
}

/// Initializer of an in-file `static final` field with the given name.
fn find_constant_field_value<'t>(
    root: Node<'t>,
    name: &str,
    src: &SourceFile,
) -> Option<Node<'t>> {
    let mut found = None;
    utils::walk(root, &mut |node| {
        if found.is_some() || node.kind() != "field_declaration" {
            return;
        }
        if !utils::has_modifier(node, "static", src) || !utils::has_modifier(node, "final", src) {
            return;
        }
        for declarator in utils::named_children(node)
            .into_iter()
            .filter(|n| n.kind() == "variable_declarator")
        {
            let named = declarator
                .child_by_field_name("name")
                .is_some_and(|n| src.node_text(n) == name);
            if named {
                found = declarator.child_by_field_name("value");
            }
        }
    });
    found
}

fn parse_int_literal(text: &str) -> Option<i64> {
    let cleaned: String = text.chars().filter(|c| *c != '_').collect();
    let cleaned = cleaned.trim_end_matches(['l', 'L']);
    if let Some(hex) = cleaned.strip_prefix("0x").or_else(|| cleaned.strip_prefix("0X")) {
        return i64::from_str_radix(hex, 16).ok();
    }
    if let Some(bin) = cleaned.strip_prefix("0b").or_else(|| cleaned.strip_prefix("0B")) {
        return i64::from_str_radix(bin, 2).ok();
    }
    if cleaned.len() > 1 && cleaned.starts_with('0') {
        return i64::from_str_radix(&cleaned[1..], 8).ok();
    }
    cleaned.parse().ok()
}
