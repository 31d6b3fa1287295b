//! Configuration for which rules run and how
//!
//! Loaded from TOML by the driver; library consumers can build one
//! programmatically. Absent flags default to empty, which individual
//! rules treat as no-op behavior.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::diagnostic::Severity;
use crate::error::{LintError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Stable names (or aliases) of rules to disable.
    #[serde(default)]
    pub disabled: Vec<String>,
    /// Per-rule severity overrides.
    #[serde(default)]
    pub severity: BTreeMap<String, Severity>,
    /// Named string-list flags consumed by individual rules.
    #[serde(default)]
    pub flags: FxHashMap<String, Vec<String>>,
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LintError::Io {
            source,
            path: path.to_path_buf(),
        })?;
        Self::from_toml_str(&text)
    }

    /// Values of a string-list flag, or `None` when the flag is absent.
    pub fn flag(&self, name: &str) -> Option<&[String]> {
        self.flags.get(name).map(Vec::as_slice)
    }

    pub fn with_disabled(mut self, rule: impl Into<String>) -> Self {
        self.disabled.push(rule.into());
        self
    }

    pub fn with_severity(mut self, rule: impl Into<String>, severity: Severity) -> Self {
        self.severity.insert(rule.into(), severity);
        self
    }

    pub fn with_flag(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.flags
            .insert(name.into(), values.into_iter().map(Into::into).collect());
        self
    }
}
