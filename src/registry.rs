//! Rule registry
//!
//! All rules are enumerated here explicitly; there is no reflection or
//! class-path scanning. The registry maps stable rule names (and their
//! backward-compatible aliases) to constructors taking the run
//! configuration.

use crate::config::Config;
use crate::diagnostic::Severity;
use crate::error::{LintError, Result};
use crate::rules;
use crate::runner::{Check, PreparedCheck};
use crate::{RuleCategory, RuleMeta};

/// Static metadata for one registered rule.
#[derive(Debug, Clone, Copy)]
pub struct RuleInfo {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub category: RuleCategory,
    pub default_severity: Severity,
    pub description: &'static str,
}

impl RuleInfo {
    pub fn matches_name(&self, name: &str) -> bool {
        self.name == name || self.aliases.contains(&name)
    }
}

/// One registry entry: metadata plus a configured constructor.
pub struct RuleEntry {
    pub info: RuleInfo,
    build: fn(&Config) -> Box<dyn Check>,
}

impl RuleEntry {
    pub fn construct(&self, config: &Config) -> Box<dyn Check> {
        (self.build)(config)
    }
}

fn entry<R: RuleMeta>(
    default_severity: Severity,
    build: fn(&Config) -> Box<dyn Check>,
) -> RuleEntry {
    RuleEntry {
        info: RuleInfo {
            name: R::NAME,
            aliases: R::ALIASES,
            category: R::CATEGORY,
            default_severity,
            description: R::DESCRIPTION,
        },
        build,
    }
}

/// Every built-in rule, in stable order.
pub fn builtin_rules() -> Vec<RuleEntry> {
    vec![
        entry::<rules::BadAssert>(Severity::Warning, |c| {
            Box::new(rules::BadAssert::from_config(c))
        }),
        entry::<rules::FinalClass>(Severity::Suggestion, |c| {
            Box::new(rules::FinalClass::from_config(c))
        }),
        entry::<rules::HashMapCapacity>(Severity::Suggestion, |c| {
            Box::new(rules::HashMapCapacity::from_config(c))
        }),
        entry::<rules::LogLevelGuard>(Severity::Warning, |c| {
            Box::new(rules::LogLevelGuard::from_config(c))
        }),
        entry::<rules::LoggerFieldName>(Severity::Suggestion, |c| {
            Box::new(rules::LoggerFieldName::from_config(c))
        }),
        entry::<rules::RateLimiterWarmup>(Severity::Warning, |c| {
            Box::new(rules::RateLimiterWarmup::from_config(c))
        }),
        entry::<rules::SafeArgDeniedNames>(Severity::Warning, |c| {
            Box::new(rules::SafeArgDeniedNames::from_config(c))
        }),
        entry::<rules::SafeLoggingExceptionMessage>(Severity::Warning, |c| {
            Box::new(rules::SafeLoggingExceptionMessage::from_config(c))
        }),
        entry::<rules::StringEquality>(Severity::Error, |c| {
            Box::new(rules::StringEquality::from_config(c))
        }),
        entry::<rules::ThrowablePrintStackTrace>(Severity::Warning, |c| {
            Box::new(rules::ThrowablePrintStackTrace::from_config(c))
        }),
    ]
}

/// Look up a rule by stable name or alias.
pub fn find_rule(name: &str) -> Option<RuleEntry> {
    builtin_rules().into_iter().find(|e| e.info.matches_name(name))
}

/// Build the checks enabled by `config`, with severities resolved.
///
/// Fails when the configuration names a rule that does not exist.
pub fn resolve(config: &Config) -> Result<Vec<PreparedCheck>> {
    let entries = builtin_rules();

    for name in config.disabled.iter().chain(config.severity.keys()) {
        if !entries.iter().any(|e| e.info.matches_name(name)) {
            return Err(LintError::UnknownRule { name: name.clone() });
        }
    }

    let mut prepared = Vec::new();
    for entry in entries {
        if config.disabled.iter().any(|n| entry.info.matches_name(n)) {
            continue;
        }
        let severity = config
            .severity
            .iter()
            .find(|(n, _)| entry.info.matches_name(n))
            .map(|(_, s)| *s)
            .unwrap_or(entry.info.default_severity);
        let mut suppression_names = vec![entry.info.name];
        suppression_names.extend_from_slice(entry.info.aliases);
        prepared.push(PreparedCheck {
            check: entry.construct(config),
            severity,
            suppression_names,
        });
    }
    Ok(prepared)
}
