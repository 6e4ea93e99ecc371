//! Configuration types for mvc-lint.

use crate::vocabulary::{Settings, Thresholds, Vocabulary};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration for mvc-lint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Layer naming tokens.
    #[serde(default)]
    pub naming: Vocabulary,

    /// Numeric limits.
    #[serde(default)]
    pub thresholds: Thresholds,

    /// Per-rule configurations, keyed by rule name or rule id.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled. Either its name or its id may be used
    /// as the key; a disabled entry under either wins.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str, rule_id: &str) -> bool {
        [rule_name, rule_id].iter().all(|key| {
            self.rules
                .get(*key)
                .map_or(true, |c| c.enabled.unwrap_or(true))
        })
    }

    /// Detector settings derived from the naming and threshold sections.
    #[must_use]
    pub fn settings(&self) -> Settings {
        Settings::new(self.naming.clone(), self.thresholds)
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Maximum number of compilation units analyzed in parallel.
    #[serde(default)]
    pub parallelism: Option<usize>,
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    #[diagnostic(code(mvc_lint::config::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    #[diagnostic(code(mvc_lint::config::parse))]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A naming token, vocabulary table or threshold is unusable.
    #[error("Invalid configuration value `{key}`: {message}")]
    #[diagnostic(
        code(mvc_lint::config::invalid),
        help("naming tokens must be non-empty and thresholds greater than zero")
    )]
    Invalid {
        /// Offending key.
        key: String,
        /// What is wrong with it.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.rules.is_empty());
        assert_eq!(config.thresholds.max_class_lines, 500);
        assert_eq!(config.naming.controller, "controller");
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[analyzer]
parallelism = 2

[naming]
service = "Svc"

[thresholds]
max_control_flow = 12

[rules.controller-brain]
enabled = false

[rules."RA16-001"]
enabled = false
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.analyzer.parallelism, Some(2));
        assert_eq!(config.thresholds.max_control_flow, 12);
        assert_eq!(config.thresholds.max_class_lines, 500);
        assert_eq!(config.naming.repository, "dal");
        assert!(!config.is_rule_enabled("controller-brain", "RA07-001"));
        assert!(!config.is_rule_enabled("god-class", "RA16-001"));
        assert!(config.is_rule_enabled("ambiguous-interface", "RA14-001"));

        let settings = config.settings();
        assert_eq!(settings.vocabulary.service, "svc");
    }

    #[test]
    fn test_parse_error() {
        let err = Config::parse("[thresholds]\nmax_class_lines = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
