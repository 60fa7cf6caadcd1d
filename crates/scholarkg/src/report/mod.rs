//! Run reporting: statement counts, source provenance and anomalies.

mod anomaly;

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub use anomaly::{Anomaly, AnomalyKind};

use crate::error::{Result, ScholarError};
use crate::input::SourceMetadata;
use crate::vocab::{EntityClass, ObjectProperty};

/// Everything a run learned about its inputs and outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Base namespace used for every IRI.
    pub base_url: String,
    /// Loaded source files.
    pub sources: Vec<SourceMetadata>,
    /// Entities asserted, per class tag.
    pub nodes: IndexMap<String, usize>,
    /// Node statements (type + attributes) written.
    pub node_statements: usize,
    /// Edge statements written, per predicate.
    pub edges: IndexMap<String, usize>,
    /// Size of the instance graph.
    pub abox_statements: usize,
    /// Size of the schema graph, when one was built.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tbox_statements: Option<usize>,
    /// Row-level anomalies in discovery order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub anomalies: Vec<Anomaly>,
}

impl RunReport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            started_at: Utc::now(),
            base_url: base_url.into(),
            sources: Vec::new(),
            nodes: IndexMap::new(),
            node_statements: 0,
            edges: IndexMap::new(),
            abox_statements: 0,
            tbox_statements: None,
            anomalies: Vec::new(),
        }
    }

    pub fn add_source(&mut self, source: SourceMetadata) {
        self.sources.push(source);
    }

    pub fn add_nodes(&mut self, class: EntityClass, entities: usize, statements: usize) {
        *self.nodes.entry(class.tag().to_string()).or_insert(0) += entities;
        self.node_statements += statements;
    }

    pub fn add_edges(&mut self, predicate: ObjectProperty, statements: usize) {
        *self.edges.entry(predicate.name().to_string()).or_insert(0) += statements;
    }

    pub fn record(&mut self, anomaly: Anomaly) {
        self.anomalies.push(anomaly);
    }

    pub fn extend(&mut self, anomalies: impl IntoIterator<Item = Anomaly>) {
        self.anomalies.extend(anomalies);
    }

    /// Total edge statements over all predicates.
    pub fn edge_statements(&self) -> usize {
        self.edges.values().sum()
    }

    /// Distinct source rows that lost at least one statement to a
    /// row-level anomaly. A row missing several joins counts once.
    pub fn dropped_rows(&self) -> usize {
        self.anomalies
            .iter()
            .filter(|a| a.kind.drops_row())
            .map(|a| (a.table.as_str(), a.row))
            .collect::<HashSet<_>>()
            .len()
    }

    /// Anomaly counts per kind, in kind order.
    pub fn anomalies_by_kind(&self) -> IndexMap<AnomalyKind, usize> {
        let mut counts: IndexMap<AnomalyKind, usize> = IndexMap::new();
        for a in &self.anomalies {
            *counts.entry(a.kind).or_insert(0) += 1;
        }
        counts.sort_keys();
        counts
    }

    /// Anomaly counts per table, in first-seen order.
    pub fn anomalies_by_table(&self) -> IndexMap<&str, usize> {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for a in &self.anomalies {
            *counts.entry(a.table.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Emit one warning per (table, kind) group.
    pub fn log_anomalies(&self) {
        let mut groups: IndexMap<(&str, AnomalyKind), usize> = IndexMap::new();
        for a in &self.anomalies {
            *groups.entry((a.table.as_str(), a.kind)).or_insert(0) += 1;
        }
        for ((table, kind), count) in groups {
            warn!(table, kind = kind.label(), count, "rows with anomalies");
        }
    }

    /// Save the report as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    ScholarError::Persistence(format!(
                        "Failed to create directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let file = File::create(path).map_err(|e| {
            ScholarError::Persistence(format!(
                "Failed to create file '{}': {}",
                path.display(),
                e
            ))
        })?;

        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Load a report saved by [`RunReport::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ScholarError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}
