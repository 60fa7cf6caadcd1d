//! LOAD: read every catalogued table before anything is asserted.

use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::error::{Result, ScholarError};
use crate::input::catalog::ALL_TABLES;
use crate::input::{DataTable, Parser, SourceMetadata, TableSpec};

/// All source tables of one run, keyed by catalog name.
#[derive(Debug, Clone)]
pub struct SourceTables {
    tables: IndexMap<&'static str, DataTable>,
    sources: Vec<SourceMetadata>,
}

impl SourceTables {
    /// Load every table in the catalog from `data_dir`.
    ///
    /// Any table that cannot be read fails the whole load.
    pub fn load(parser: &Parser, data_dir: &Path) -> Result<Self> {
        if !data_dir.is_dir() {
            return Err(ScholarError::Config(format!(
                "Data directory '{}' does not exist",
                data_dir.display()
            )));
        }

        let mut tables = IndexMap::with_capacity(ALL_TABLES.len());
        let mut sources = Vec::with_capacity(ALL_TABLES.len());

        for spec in ALL_TABLES {
            let path = spec.resolve(data_dir);
            let (table, source) = parser.parse_file(&path, spec)?;
            debug!(table = spec.name, file = %path.display(), hash = %source.hash, "read");
            tables.insert(spec.name, table);
            sources.push(source);
        }

        let rows: usize = tables.values().map(DataTable::row_count).sum();
        info!(tables = tables.len(), rows, "sources loaded");

        Ok(Self { tables, sources })
    }

    /// Assemble already-parsed tables. Catalog tables that are not given
    /// are present but empty.
    pub fn from_tables(tables: impl IntoIterator<Item = DataTable>) -> Self {
        let mut given: HashMap<String, DataTable> =
            tables.into_iter().map(|t| (t.name.clone(), t)).collect();

        let tables = ALL_TABLES
            .iter()
            .map(|spec| {
                let table = given.remove(spec.name).unwrap_or_else(|| empty_table(spec));
                (spec.name, table)
            })
            .collect();

        Self {
            tables,
            sources: Vec::new(),
        }
    }

    /// The loaded table for a catalog entry.
    pub fn table(&self, spec: &TableSpec) -> &DataTable {
        &self.tables[spec.name]
    }

    /// Metadata of every file read, in load order.
    pub fn sources(&self) -> &[SourceMetadata] {
        &self.sources
    }

    pub fn tables(&self) -> impl Iterator<Item = &DataTable> {
        self.tables.values()
    }
}

fn empty_table(spec: &TableSpec) -> DataTable {
    DataTable::new(
        spec.name,
        spec.columns.iter().map(|c| c.to_string()).collect(),
        Vec::new(),
    )
}
