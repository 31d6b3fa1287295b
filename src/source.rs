//! Parsed source file backed by the host grammar toolchain

use std::fs;
use std::path::{Path, PathBuf};

use tree_sitter::{Node, Parser, Tree};

use crate::error::{LintError, Result};

/// A Java source file together with its host-owned parse tree.
///
/// The tree is immutable for the duration of one analysis; checks only
/// read it. Files with recoverable syntax errors still produce a tree
/// (with error nodes); matchers fail closed around those.
pub struct SourceFile {
    path: PathBuf,
    text: String,
    tree: Tree,
    line_starts: Vec<usize>,
}

impl SourceFile {
    /// Parse `text` as Java source.
    pub fn parse(path: impl Into<PathBuf>, text: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let text = text.into();

        let mut parser = Parser::new();
        parser.set_language(tree_sitter_java::language())?;
        let tree = parser
            .parse(&text, None)
            .ok_or_else(|| LintError::Parse { path: path.clone() })?;

        let mut line_starts = vec![0];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }

        Ok(Self {
            path,
            text,
            tree,
            line_starts,
        })
    }

    /// Read and parse a file from disk.
    pub fn read(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let text = fs::read_to_string(&path).map_err(|source| LintError::Io {
            source,
            path: path.clone(),
        })?;
        Self::parse(path, text)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text covered by a node. Returns an empty string for spans
    /// that are not valid UTF-8 boundaries.
    pub fn node_text(&self, node: Node<'_>) -> &str {
        node.utf8_text(self.text.as_bytes()).unwrap_or("")
    }

    /// 1-based line and column of a byte offset.
    pub fn line_col(&self, byte: usize) -> (usize, usize) {
        let line = match self.line_starts.binary_search(&byte) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        (line + 1, byte - self.line_starts[line] + 1)
    }
}
