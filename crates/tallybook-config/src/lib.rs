//! Configuration management for tallybook
//!
//! This module handles loading, validation, and management of
//! tallybook configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::{ConfigError, ConfigResult};

// ==================== Configuration Types ====================

/// Data file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding the backing file
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    /// Backing file name
    #[serde(default = "default_data_file")]
    pub file: String,
    /// Write sample transactions on first run
    #[serde(default = "default_true")]
    pub seed_sample_data: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            file: default_data_file(),
            seed_sample_data: true,
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("./data")
}

fn default_data_file() -> String {
    "budget_data.txt".to_string()
}

fn default_true() -> bool {
    true
}

/// Literal direction tokens written to the backing file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    #[serde(default = "default_income_token")]
    pub income_token: String,
    #[serde(default = "default_expense_token")]
    pub expense_token: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            income_token: default_income_token(),
            expense_token: default_expense_token(),
        }
    }
}

fn default_income_token() -> String {
    "income".to_string()
}

fn default_expense_token() -> String {
    "expense".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Data file settings
    #[serde(default)]
    pub data: DataConfig,
    /// Direction tokens
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound { path: path.display().to_string() }
            } else {
                ConfigError::IoError { path: path.display().to_string(), source: e }
            }
        })?;

        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        // An empty document means "all defaults"
        if content.trim().is_empty() {
            return Ok(Config::default());
        }

        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::InvalidYaml { message: e.to_string() })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.data.file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "data.file".to_string(),
                reason: "Backing file name must not be empty".to_string(),
            });
        }

        validate_token("ledger.income_token", &self.ledger.income_token)?;
        validate_token("ledger.expense_token", &self.ledger.expense_token)?;

        if self.ledger.income_token == self.ledger.expense_token {
            return Err(ConfigError::InvalidValue {
                field: "ledger.expense_token".to_string(),
                reason: "Income and expense tokens must differ".to_string(),
            });
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!("Log level must be one of: {}", LOG_LEVELS.join(", ")),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Get the full path to the backing file
    pub fn ledger_path(&self) -> PathBuf {
        self.data.path.join(&self.data.file)
    }
}

fn validate_token(field: &str, token: &str) -> ConfigResult<()> {
    if token.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: "Token must not be empty".to_string(),
        });
    }
    if token.contains(['\t', '\n', '\r']) || token.trim() != token {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: "Token must not contain tabs, newlines or surrounding spaces".to_string(),
        });
    }
    Ok(())
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.ledger_path(), PathBuf::from("./data/budget_data.txt"));
        assert_eq!(config.ledger.income_token, "income");
        assert_eq!(config.ledger.expense_token, "expense");
        assert!(config.data.seed_sample_data);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_template_parses() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        assert_eq!(config.data.file, "budget_data.txt");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = Config::from_yaml("ledger:\n  income_token: приход\n").unwrap();
        assert_eq!(config.ledger.income_token, "приход");
        assert_eq!(config.ledger.expense_token, "expense");
        assert_eq!(config.data.path, PathBuf::from("./data"));
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = Config::from_yaml("  \n").unwrap();
        assert_eq!(config.data.file, "budget_data.txt");
    }

    #[test]
    fn test_rejects_identical_tokens() {
        let yaml = "ledger:\n  income_token: x\n  expense_token: x\n";
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "ledger.expense_token"));
    }

    #[test]
    fn test_rejects_token_with_tab() {
        let mut config = Config::default();
        config.ledger.income_token = "in\tcome".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let err = Config::from_yaml("logging:\n  level: loud\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Config::from_yaml("data: [unterminated").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidYaml { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tallybook.yaml");
        std::fs::write(&path, "data:\n  path: /tmp/ledger\n  file: money.tsv\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.ledger_path(), PathBuf::from("/tmp/ledger/money.tsv"));
    }
}
