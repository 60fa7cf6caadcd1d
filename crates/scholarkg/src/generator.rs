//! Main Generator struct and public API.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, ScholarError};
use crate::graph::{Graph, GraphFormat, Namespace, write_graph, write_graphs};
use crate::input::{Parser, ParserConfig};
use crate::pipeline::Pipeline;
use crate::report::RunReport;
use crate::vocab::schema_graph;

/// Configuration for a generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Namespace every entity, class and property IRI lives under.
    pub base_url: String,
    /// Directory holding `nodes/` and `edges/`.
    pub data_dir: PathBuf,
    /// Directory the graphs are written to.
    pub output_dir: PathBuf,
    /// File stem of the instance graph; the extension follows `format`.
    pub abox_file: String,
    /// File stem of the schema graph.
    pub tbox_file: String,
    pub format: GraphFormat,
    pub parser: ParserConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://SDM.org/Lab2/".to_string(),
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("output"),
            abox_file: "ABOX".to_string(),
            tbox_file: "TBOX".to_string(),
            format: GraphFormat::default(),
            parser: ParserConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load a configuration from a JSON file. Absent fields keep their
    /// defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ScholarError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content)
            .map_err(|e| ScholarError::Config(format!("Invalid config '{}': {}", path.display(), e)))
    }

    /// Where the instance graph is written.
    pub fn abox_path(&self) -> PathBuf {
        self.output_path(&self.abox_file)
    }

    /// Where the schema graph is written.
    pub fn tbox_path(&self) -> PathBuf {
        self.output_path(&self.tbox_file)
    }

    fn output_path(&self, stem: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", stem, self.format.extension()))
    }
}

/// The knowledge-graph generator.
pub struct Generator {
    config: GeneratorConfig,
    parser: Parser,
}

impl Generator {
    /// Create a new Generator with default configuration.
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    /// Create a Generator with custom configuration.
    pub fn with_config(config: GeneratorConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        Self { config, parser }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The configured base namespace.
    pub fn namespace(&self) -> Result<Namespace> {
        Namespace::new(self.config.base_url.as_str())
    }

    /// Build the schema graph in memory.
    pub fn build_tbox(&self) -> Result<Graph> {
        Ok(schema_graph(&self.namespace()?))
    }

    /// Run LOAD, NODES and EDGES and return the instance graph with its
    /// report. Nothing is written.
    pub fn build_abox(&self) -> Result<(Graph, RunReport)> {
        let ns = self.namespace()?;
        let (graph, report) = Pipeline::load(ns, &self.parser, &self.config.data_dir)?
            .assert_nodes()
            .assert_edges()?
            .finish();
        Ok((graph, report))
    }

    /// Validate the inputs by building the instance graph without writing it.
    pub fn check(&self) -> Result<RunReport> {
        let (_, report) = self.build_abox()?;
        Ok(report)
    }

    /// Write the schema graph. Returns its statement count.
    pub fn generate_tbox(&self) -> Result<usize> {
        let ns = self.namespace()?;
        let tbox = schema_graph(&ns);
        let path = self.config.tbox_path();
        write_graph(&tbox, &ns, self.config.format, &path)?;
        info!(path = %path.display(), statements = tbox.len(), "schema graph written");
        Ok(tbox.len())
    }

    /// Build and write the instance graph.
    pub fn generate_abox(&self) -> Result<RunReport> {
        let ns = self.namespace()?;
        let (abox, report) = self.build_abox()?;
        let path = self.config.abox_path();
        write_graph(&abox, &ns, self.config.format, &path)?;
        info!(path = %path.display(), statements = abox.len(), "instance graph written");
        Ok(report)
    }

    /// Build and serialize both graphs, then move both into place. A
    /// failure before the final renames leaves the output directory
    /// untouched.
    pub fn generate(&self) -> Result<RunReport> {
        let ns = self.namespace()?;
        let tbox = schema_graph(&ns);
        let (abox, mut report) = self.build_abox()?;
        report.tbox_statements = Some(tbox.len());

        let tbox_path = self.config.tbox_path();
        let abox_path = self.config.abox_path();
        write_graphs(
            &ns,
            self.config.format,
            &[(&tbox, tbox_path.as_path()), (&abox, abox_path.as_path())],
        )?;

        info!(
            tbox = %tbox_path.display(),
            abox = %abox_path.display(),
            tbox_statements = tbox.len(),
            abox_statements = abox.len(),
            "graphs written"
        );
        Ok(report)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = GeneratorConfig::default();
        assert_eq!(config.abox_path(), Path::new("output/ABOX.ttl"));
        assert_eq!(config.tbox_path(), Path::new("output/TBOX.ttl"));
    }

    #[test]
    fn test_extension_follows_format() {
        let config = GeneratorConfig {
            format: GraphFormat::NTriples,
            ..Default::default()
        };
        assert_eq!(config.abox_path(), Path::new("output/ABOX.nt"));
    }

    #[test]
    fn test_partial_json_config_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"base_url": "http://example.org/kg", "format": "ntriples"}"#).unwrap();

        let config = GeneratorConfig::from_json_file(&path).unwrap();
        assert_eq!(config.base_url, "http://example.org/kg");
        assert_eq!(config.format, GraphFormat::NTriples);
        assert_eq!(config.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let generator = Generator::with_config(GeneratorConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        });
        assert!(matches!(generator.build_tbox(), Err(ScholarError::Config(_))));
    }

    #[test]
    fn test_generate_keeps_previous_tbox_when_abox_cannot_be_staged() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        for spec in crate::input::catalog::ALL_TABLES {
            let path = spec.resolve(&data);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, format!("{}\n", spec.columns.join(","))).unwrap();
        }
        let output = dir.path().join("output");
        fs::create_dir_all(&output).unwrap();
        fs::write(output.join("TBOX.ttl"), "previous run\n").unwrap();
        fs::write(output.join("blocked"), "").unwrap();

        let generator = Generator::with_config(GeneratorConfig {
            data_dir: data,
            output_dir: output.clone(),
            abox_file: "blocked/ABOX".to_string(),
            ..Default::default()
        });

        assert!(generator.generate().is_err());
        assert_eq!(fs::read_to_string(output.join("TBOX.ttl")).unwrap(), "previous run\n");
    }

    #[test]
    fn test_config_equality_covers_parser() {
        let mut other = GeneratorConfig::default();
        assert_eq!(other, GeneratorConfig::default());
        other.parser.delimiter = b'\t';
        assert_ne!(other, GeneratorConfig::default());
    }

    #[test]
    fn test_generate_tbox_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let generator = Generator::with_config(GeneratorConfig {
            output_dir: dir.path().to_path_buf(),
            ..Default::default()
        });

        let statements = generator.generate_tbox().unwrap();
        let written = fs::read_to_string(dir.path().join("TBOX.ttl")).unwrap();
        assert!(statements > 0);
        assert!(written.starts_with("@prefix : <https://SDM.org/Lab2/> ."));
    }
}
