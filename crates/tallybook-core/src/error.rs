//! Error types for tallybook-core
//!
//! Skipped lines in the backing file are not errors (see
//! [`tallybook_parser::ParseError`]); everything here aborts the current
//! operation and is surfaced to the caller.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    IoError,
    IndexOutOfRange,
    NoValidDates,
    InvalidInput,
    ConfigError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::IoError => write!(f, "IO_ERROR"),
            ErrorCode::IndexOutOfRange => write!(f, "INDEX_OUT_OF_RANGE"),
            ErrorCode::NoValidDates => write!(f, "NO_VALID_DATES"),
            ErrorCode::InvalidInput => write!(f, "INVALID_INPUT"),
            ErrorCode::ConfigError => write!(f, "CONFIG_ERROR"),
        }
    }
}

/// Detailed error information for console and JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Operation aborted, nothing changed
    Warning,
    /// Operation failed
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Main error type for tallybook-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Index {index} is out of range (ledger has {len} transactions)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Cannot determine the current date: no transaction has a valid date")]
    NoValidDates,

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] tallybook_config::ConfigError),
}

impl CoreError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        CoreError::Io { path: path.to_path_buf(), source }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        CoreError::InvalidInput { message: message.into() }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::Io { .. } => ErrorCode::IoError,
            CoreError::IndexOutOfRange { .. } => ErrorCode::IndexOutOfRange,
            CoreError::NoValidDates => ErrorCode::NoValidDates,
            CoreError::InvalidInput { .. } => ErrorCode::InvalidInput,
            CoreError::Config(_) => ErrorCode::ConfigError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::Io { .. } => ErrorSeverity::Error,
            CoreError::IndexOutOfRange { .. } => ErrorSeverity::Warning,
            CoreError::NoValidDates => ErrorSeverity::Warning,
            CoreError::InvalidInput { .. } => ErrorSeverity::Warning,
            CoreError::Config(_) => ErrorSeverity::Critical,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::Io { path, source } => {
                details = details.with_detail(serde_json::json!({
                    "path": path.display().to_string(),
                    "io_error": source.to_string(),
                }));
                details = details.with_suggestion(
                    "Ensure the backing file and its directory are readable and writable.".to_string()
                );
            }
            CoreError::IndexOutOfRange { len, .. } => {
                details = details.with_suggestion(format!(
                    "Choose a transaction number between 1 and {}.", len
                ));
                details = details.with_suggestion(
                    "Numbers change after every edit; list the transactions again.".to_string()
                );
            }
            CoreError::NoValidDates => {
                details = details.with_suggestion(
                    "Add a transaction with a YYYY-MM-DD date.".to_string()
                );
            }
            CoreError::InvalidInput { message } => {
                details = details.with_detail(serde_json::json!({ "input_message": message }));
            }
            CoreError::Config(source) => {
                let config_details = source.to_details();
                if let Some(field) = config_details.field {
                    details = details.with_detail(serde_json::json!({ "field": field }));
                }
                for suggestion in config_details.suggestions {
                    details = details.with_suggestion(suggestion);
                }
            }
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::IoError.to_string(), "IO_ERROR");
        assert_eq!(ErrorCode::IndexOutOfRange.to_string(), "INDEX_OUT_OF_RANGE");
        assert_eq!(ErrorCode::NoValidDates.to_string(), "NO_VALID_DATES");
    }

    #[test]
    fn test_core_error_severity() {
        let error = CoreError::IndexOutOfRange { index: 5, len: 5 };
        assert_eq!(error.severity(), ErrorSeverity::Warning);

        let error = CoreError::io(Path::new("x"), std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        assert_eq!(error.severity(), ErrorSeverity::Error);
        assert_eq!(error.code(), ErrorCode::IoError);
    }

    #[test]
    fn test_error_details_index_out_of_range() {
        let details = CoreError::IndexOutOfRange { index: 7, len: 3 }.to_details();

        assert_eq!(details.code, ErrorCode::IndexOutOfRange);
        assert!(details.message.contains('7'));
        assert!(details.suggestions[0].contains("between 1 and 3"));
    }

    #[test]
    fn test_error_details_io_has_path() {
        let error = CoreError::io(
            Path::new("/data/budget_data.txt"),
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        let details = error.to_details();
        let detail = details.details.unwrap();
        assert_eq!(detail["path"], "/data/budget_data.txt");
    }

    #[test]
    fn test_from_config_error() {
        let error: CoreError = tallybook_config::ConfigError::InvalidYaml { message: "bad".to_string() }.into();
        assert_eq!(error.code(), ErrorCode::ConfigError);
        assert_eq!(error.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_config_error_details_are_kept() {
        let error: CoreError = tallybook_config::ConfigError::InvalidValue {
            field: "ledger.expense_token".to_string(),
            reason: "Income and expense tokens must differ".to_string(),
        }
        .into();
        let details = error.to_details();

        assert_eq!(details.details.unwrap()["field"], "ledger.expense_token");
        assert_eq!(details.suggestions, vec!["Income and expense tokens must differ".to_string()]);
    }
}
