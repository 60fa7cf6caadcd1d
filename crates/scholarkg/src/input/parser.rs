//! CSV parser with positional column naming.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::catalog::TableSpec;
use super::source::{DataTable, SourceMetadata};
use crate::error::{Result, ScholarError};

/// Parser configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Field delimiter.
    pub delimiter: u8,
    /// Whether the file has a header row. Header names are discarded in
    /// favour of the catalog's column names.
    pub has_header: bool,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
            quote: b'"',
        }
    }
}

/// Reads source tables from disk.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse the file for `spec` and return the table and its metadata.
    pub fn parse_file(
        &self,
        path: impl AsRef<Path>,
        spec: &TableSpec,
    ) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();
        let io_err = |e| ScholarError::Io {
            path: path.to_path_buf(),
            source: e,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let size_bytes = file.metadata().map_err(io_err)?.len();

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(io_err)?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let table = self.parse_bytes(spec, &contents)?;

        let metadata = SourceMetadata::new(
            spec.name,
            path.to_path_buf(),
            hash,
            size_bytes,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, metadata))
    }

    /// Parse bytes directly, naming columns after `spec`.
    pub fn parse_bytes(&self, spec: &TableSpec, bytes: &[u8]) -> Result<DataTable> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(ScholarError::EmptyData(format!("table '{}' has no content", spec.name)));
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let found = if self.config.has_header {
            reader.headers()?.len()
        } else {
            spec.columns.len()
        };

        if found < spec.columns.len() {
            return Err(ScholarError::MissingColumn {
                table: spec.name.to_string(),
                column: spec.columns[found].to_string(),
                found,
            });
        }

        let headers: Vec<String> = spec.columns.iter().map(|c| c.to_string()).collect();
        let expected_cols = headers.len();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row: Vec<String> = record.iter().map(|s| s.trim().to_string()).collect();

            // Short rows read as missing values
            while row.len() < expected_cols {
                row.push(String::new());
            }
            row.truncate(expected_cols);

            rows.push(row);
        }

        Ok(DataTable::new(spec.name, headers, rows))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}
