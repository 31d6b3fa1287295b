//! Error types for the lint library

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LintError {
    #[error("failed to read {path}: {source}")]
    Io {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("failed to parse {path}")]
    Parse { path: PathBuf },

    #[error("incompatible host grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("unknown rule name in configuration: {name}")]
    UnknownRule { name: String },
}

pub type Result<T> = std::result::Result<T, LintError>;
