//! Error types for table manipulation and table sources.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by [`Table`](crate::Table), [`TableStore`](crate::TableStore)
/// and [`TablePersistence`](crate::TablePersistence) implementations.
#[derive(Debug, Error)]
pub enum DataFileError {
    // === Table Errors ===
    /// A search or row mapping named a column the table does not have.
    #[error("column '{column}' not in this table")]
    UnknownColumn { column: String },

    /// A position did not address an existing row.
    #[error("index {position} out of bounds for table of length {len}")]
    IndexOutOfRange { position: usize, len: usize },

    /// A positional row had the wrong number of cells.
    #[error("row has {found} values but the table has {expected} columns")]
    ArityMismatch { expected: usize, found: usize },

    /// A named row did not supply a value for every column.
    #[error("row is missing a value for column '{column}'")]
    MissingColumn { column: String },

    // === Source Errors ===
    /// The source does not exist.
    #[error("could not find {path}")]
    NotFound { path: PathBuf },

    /// The source exists but is not a format any loader understands.
    #[error("{path} is not a supported file type ({reason})")]
    UnsupportedFormat { path: PathBuf, reason: String },

    /// The source could not be parsed.
    #[error("failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },

    /// The table could not be written back to its source.
    #[error("failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },

    /// Underlying filesystem failure.
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, DataFileError>;
