//! Lint context for rule execution

use tree_sitter::Node;

use crate::semantic::Semantic;
use crate::source::SourceFile;

/// Read-only context passed to checks during linting.
pub struct CheckContext<'a> {
    source: &'a SourceFile,
    semantic: &'a Semantic,
}

impl<'a> CheckContext<'a> {
    pub fn new(source: &'a SourceFile, semantic: &'a Semantic) -> Self {
        Self { source, semantic }
    }

    pub fn source(&self) -> &'a SourceFile {
        self.source
    }

    pub fn semantic(&self) -> &'a Semantic {
        self.semantic
    }

    /// Source text covered by a node.
    pub fn text(&self, node: Node<'_>) -> &'a str {
        self.source.node_text(node)
    }

    /// Whether the file under analysis is test code.
    pub fn is_test_code(&self) -> bool {
        self.semantic.is_test_code()
    }
}
