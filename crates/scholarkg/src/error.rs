//! Error types for the scholarkg library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for scholarkg operations.
#[derive(Debug, Error)]
pub enum ScholarError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A source table has fewer columns than its catalog entry declares.
    #[error("Table '{table}' is missing column '{column}' (found {found} columns)")]
    MissingColumn {
        table: String,
        column: String,
        found: usize,
    },

    /// Empty file or no header to read.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An author key was found in neither the author table nor the review table.
    #[error("Author '{key}' referenced by table '{table}' is neither an author nor a reviewer")]
    UnresolvedMembership { key: String, table: String },

    /// Error writing a graph or report to disk.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for scholarkg operations.
pub type Result<T> = std::result::Result<T, ScholarError>;
