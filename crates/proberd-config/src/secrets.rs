//! Secret placeholder substitution
//!
//! The second stage of the text-rewriting pipeline. Template expansion leaves
//! `**$NAME**` markers in the text; this module replaces each one with the
//! value of the environment variable `NAME`. A missing variable is a warning,
//! not an error: a probe fleet should still start with partially-missing
//! credentials rather than crash-loop, so the placeholder is left in place.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::logging::Logger;

/// Pattern matching the `**$NAME**` placeholders emitted by the `env_secret`
/// template function. The name excludes whitespace and `*`.
pub static PLACEHOLDER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*\$([^*\s]+)\*\*").unwrap());

/// Render the placeholder for an environment variable name.
///
/// The single coupling surface between template expansion and substitution.
pub fn placeholder_for(name: &str) -> String {
    format!("**${name}**")
}

/// Read access to named environment variables
pub trait EnvSource: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// The process environment
#[derive(Debug, Default, Clone, Copy)]
pub struct RealEnv;

impl RealEnv {
    pub fn new() -> Self {
        Self
    }
}

impl EnvSource for RealEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory environment for tests
#[derive(Debug, Default)]
pub struct MemoryEnv {
    vars: HashMap<String, String>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vars(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl EnvSource for MemoryEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Replace every placeholder whose environment variable is set and non-empty.
///
/// Placeholders for unset (or empty) variables are preserved verbatim and
/// logged as warnings. Idempotent: running the output through again changes
/// nothing, because substituted values no longer match the pattern and the
/// surviving placeholders still refer to unset variables.
pub fn substitute_placeholders(text: &str, env: &dyn EnvSource, logger: &dyn Logger) -> String {
    let mut names: Vec<&str> = Vec::new();
    for caps in PLACEHOLDER_REGEX.captures_iter(text) {
        // Exactly one capture group per match; anything else is skipped.
        if caps.len() != 2 {
            continue;
        }
        if let Some(name) = caps.get(1) {
            if !names.contains(&name.as_str()) {
                names.push(name.as_str());
            }
        }
    }

    let mut result = text.to_string();
    for name in names {
        match env.get(name) {
            Some(value) if !value.is_empty() => {
                result = result.replace(placeholder_for(name).as_str(), value.as_str());
            }
            _ => logger.warn(&format!(
                "environment variable {name} not defined, skipping substitution"
            )),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{MemoryLogger, NoOpLogger};

    #[test]
    fn test_no_placeholders_unchanged() {
        let env = MemoryEnv::new();
        let text = "probe { name: \"ping\" }";
        assert_eq!(substitute_placeholders(text, &env, &NoOpLogger::new()), text);
    }

    #[test]
    fn test_substitutes_all_occurrences() {
        let env = MemoryEnv::new().set("TOKEN", "secret123");
        let text = "a: \"**$TOKEN**\"\nb: \"**$TOKEN**\"";
        assert_eq!(
            substitute_placeholders(text, &env, &NoOpLogger::new()),
            "a: \"secret123\"\nb: \"secret123\""
        );
    }

    #[test]
    fn test_multiple_distinct_names() {
        let env = MemoryEnv::new().set("USER", "probe").set("PASS", "hunter2");
        let text = "auth: \"**$USER**:**$PASS**\"";
        assert_eq!(
            substitute_placeholders(text, &env, &NoOpLogger::new()),
            "auth: \"probe:hunter2\""
        );
    }

    #[test]
    fn test_unset_variable_preserved_with_warning() {
        let env = MemoryEnv::new();
        let logger = MemoryLogger::new();
        let text = "key: \"**$MISSING**\"";
        assert_eq!(substitute_placeholders(text, &env, &logger), text);
        let warnings = logger.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("MISSING"));
    }

    #[test]
    fn test_empty_value_treated_as_unset() {
        let env = MemoryEnv::new().set("EMPTY", "");
        let logger = MemoryLogger::new();
        let text = "key: \"**$EMPTY**\"";
        assert_eq!(substitute_placeholders(text, &env, &logger), text);
        assert_eq!(logger.warnings().len(), 1);
    }

    #[test]
    fn test_idempotent() {
        let env = MemoryEnv::new().set("A", "x");
        let text = "a: \"**$A**\" b: \"**$B**\"";
        let once = substitute_placeholders(text, &env, &NoOpLogger::new());
        let twice = substitute_placeholders(&once, &env, &NoOpLogger::new());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_malformed_markers_ignored() {
        let env = MemoryEnv::new().set("A", "x");
        // Stars without the $ prefix, or names containing whitespace, are not
        // placeholders.
        let text = "**A** **$A B** **bold**";
        assert_eq!(substitute_placeholders(text, &env, &NoOpLogger::new()), text);
    }
}
