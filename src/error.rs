//! Error types for delimited file reading

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, DelimError>;

/// Errors raised while opening or reading a delimited file
#[derive(Debug, Error)]
pub enum DelimError {
    /// The path is not an existing, readable regular file
    #[error("cannot open {}: {source}", path.display())]
    OpenError {
        /// Path passed to open
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// Header declares the same column twice and enumeration is disabled
    #[error("duplicate column name in header: {0}")]
    DuplicateColumn(String),

    /// Reading a line from the source failed
    #[error("read error: {0}")]
    ReadError(String),

    /// The reader has no open source
    #[error("reader is not open")]
    NotOpen,

    /// Encoding label is unknown or cannot be scanned line by line
    #[error("unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// Passthrough I/O error
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_error_names_path() {
        let err = DelimError::OpenError {
            path: PathBuf::from("missing.tsv"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("cannot open missing.tsv"));
    }

    #[test]
    fn test_duplicate_column_names_column() {
        let err = DelimError::DuplicateColumn("NAME".to_string());
        assert_eq!(err.to_string(), "duplicate column name in header: NAME");
    }
}
