//! Loaded tables and their source metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata about a loaded source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// Logical table name from the catalog.
    pub table: String,
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was read.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been loaded.
    pub fn new(
        table: impl Into<String>,
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            table: table.into(),
            file,
            path,
            hash,
            size_bytes,
            row_count,
            column_count,
            loaded_at: Utc::now(),
        }
    }
}

/// A loaded table. Rows keep the order they had in the source file.
#[derive(Debug, Clone)]
pub struct DataTable {
    /// Logical table name.
    pub name: String,
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data as trimmed strings (row-major order).
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Create a new data table.
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    /// Build a table from string slices. Mostly useful in tests.
    pub fn from_rows(name: &str, headers: &[&str], rows: &[&[&str]]) -> Self {
        Self::new(
            name,
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.trim().to_string()).collect())
                .collect(),
        )
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Get a raw cell value, including missing-value markers.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(|s| s.as_str()))
    }

    /// Get a cell value, or `None` if it is absent or a missing-value marker.
    pub fn value(&self, row: usize, col: usize) -> Option<&str> {
        self.get(row, col).filter(|v| !Self::is_null_value(v))
    }

    /// Present values of one column, one entry per row.
    pub fn column_values(&self, col: usize) -> impl Iterator<Item = Option<&str>> {
        (0..self.rows.len()).map(move |row| self.value(row, col))
    }

    /// Check if a value represents a missing/null value.
    pub fn is_null_value(value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("na")
            || trimmed.eq_ignore_ascii_case("n/a")
            || trimmed.eq_ignore_ascii_case("#n/a")
            || trimmed.eq_ignore_ascii_case("nan")
            || trimmed.eq_ignore_ascii_case("null")
            || trimmed.eq_ignore_ascii_case("none")
    }
}
