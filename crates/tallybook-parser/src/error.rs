//! Error types for tallybook-parser

use thiserror::Error;

/// A line that could not be turned into a transaction.
///
/// These are never fatal: the codec skips the line and keeps going.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("line {line}: expected 6 tab-separated fields, found {found}")]
    FieldCount { line: usize, found: usize },

    #[error("line {line}: amount '{value}' is not a number")]
    InvalidAmount { line: usize, value: String },
}

impl ParseError {
    /// 1-indexed line number of the offending line
    pub fn line(&self) -> usize {
        match self {
            ParseError::FieldCount { line, .. } => *line,
            ParseError::InvalidAmount { line, .. } => *line,
        }
    }
}
