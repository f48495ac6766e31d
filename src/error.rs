//! Error types for CSV stream parsing

use thiserror::Error;

/// Result type alias for csvstream operations
pub type Result<T> = std::result::Result<T, CsvError>;

/// Errors produced while parsing or reading CSV data
///
/// Parse-level errors (`UnbalancedQuotes`, `HeaderMismatch`, `ColumnCount`)
/// are terminal for the parser instance that produced them: once one is
/// emitted, no further lines are processed. `ReadError` wraps I/O failures
/// from the file and reader adapters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CsvError {
    /// A quoted field was never closed before the end of input
    #[error("unbalanced quotes on line {line}: quoted field never closed")]
    UnbalancedQuotes {
        /// 1-based logical line number
        line: u64,
    },

    /// The first row did not match the expected header list
    #[error("header mismatch: expected {expected:?}, found {actual:?}")]
    HeaderMismatch {
        /// Normalized expected header names
        expected: Vec<String>,
        /// Normalized header names actually found
        actual: Vec<String>,
    },

    /// Strict column enforcement rejected a row with extra non-blank fields
    #[error("row {row} has {actual} columns but expected {expected}")]
    ColumnCount {
        /// 1-based number the row would have received
        row: u64,
        /// 1-based logical line number
        line: u64,
        /// Resolved header count
        expected: usize,
        /// Field count actually found
        actual: usize,
    },

    /// Failed to read from an input source
    #[error("read error: {0}")]
    ReadError(String),
}

impl CsvError {
    /// Logical line number the error occurred on, if it has one
    pub fn line(&self) -> Option<u64> {
        match self {
            CsvError::UnbalancedQuotes { line } => Some(*line),
            CsvError::ColumnCount { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// True for errors that permanently halt the parser instance
    pub fn is_terminal(&self) -> bool {
        !matches!(self, CsvError::ReadError(_))
    }
}
