//! Domain error types for the ledger
//!
//! Provides structured error types for different domains:
//! - `StoreError` for the flat-file transaction store
//! - `FormError` for entry form validation
//! - `PickerError` for picker construction from untrusted bounds
//! - `LedgerError` for startup failures in the binary

use std::path::PathBuf;
use thiserror::Error;

/// Startup errors: opening the store and taking over the terminal
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Errors related to the transaction file
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Ledger file is a directory: {0}")]
    IsDirectory(PathBuf),

    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed row on line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },
}

/// Errors raised when submitting the entry form
#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("Invalid money amount")]
    InvalidAmount,

    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}

/// Errors raised when building a picker from untrusted bounds
#[derive(Debug, Error, PartialEq)]
pub enum PickerError {
    #[error("Invalid bounds: min {min} is greater than max {max}")]
    InvalidBounds { min: i32, max: i32 },
}

/// Result type alias for LedgerError
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Result type alias for StoreError
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result type alias for FormError
pub type FormResult<T> = std::result::Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_converts_into_ledger_error() {
        let err: LedgerError = StoreError::IsDirectory(PathBuf::from("/tmp/ledger")).into();
        assert!(matches!(err, LedgerError::Store(StoreError::IsDirectory(_))));
        assert_eq!(err.to_string(), "Store error: Ledger file is a directory: /tmp/ledger");
    }

    #[test]
    fn test_form_error_messages() {
        assert_eq!(FormError::InvalidAmount.to_string(), "Invalid money amount");
        assert_eq!(FormError::EmptyField("To").to_string(), "To must not be empty");
    }
}
