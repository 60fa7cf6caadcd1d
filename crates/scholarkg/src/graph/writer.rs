//! Graph serialization: N-Triples and Turtle.
//!
//! Output is written through a temporary file in the destination directory
//! and renamed into place, so a failed run never leaves a partial file.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use super::accumulator::Graph;
use super::namespace::{Namespace, RDF, RDF_TYPE, RDFS, XSD};
use super::term::{Term, Triple, escape_literal};
use crate::error::{Result, ScholarError};

/// Output serialization format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphFormat {
    #[default]
    Turtle,
    NTriples,
}

impl GraphFormat {
    /// Conventional file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            GraphFormat::Turtle => "ttl",
            GraphFormat::NTriples => "nt",
        }
    }
}

impl FromStr for GraphFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "turtle" | "ttl" => Ok(GraphFormat::Turtle),
            "ntriples" | "n-triples" | "nt" => Ok(GraphFormat::NTriples),
            _ => Err(format!("Unknown format: {}. Use turtle or ntriples.", s)),
        }
    }
}

impl std::fmt::Display for GraphFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphFormat::Turtle => write!(f, "turtle"),
            GraphFormat::NTriples => write!(f, "ntriples"),
        }
    }
}

/// N-Triples format handler.
pub struct NTriples;

impl NTriples {
    /// Write every triple on its own line, in insertion order.
    pub fn write<W: Write>(graph: &Graph, mut writer: W) -> std::io::Result<()> {
        for triple in graph.triples() {
            writeln!(writer, "{}", triple.to_ntriples())?;
        }
        Ok(())
    }
}

/// Turtle format handler.
pub struct Turtle;

impl Turtle {
    /// Write the graph with `@prefix` declarations, grouping statements by
    /// subject in first-seen order.
    pub fn write<W: Write>(graph: &Graph, ns: &Namespace, mut writer: W) -> std::io::Result<()> {
        let prefixes = prefixes(ns);
        for (prefix, iri) in &prefixes {
            writeln!(writer, "@prefix {}: <{}> .", prefix, iri)?;
        }
        writeln!(writer)?;

        let mut by_subject: IndexMap<&str, Vec<&Triple>> = IndexMap::new();
        for triple in graph.triples() {
            by_subject.entry(triple.subject.as_str()).or_default().push(triple);
        }

        for (subject, triples) in by_subject {
            write!(writer, "{}", format_iri(subject, &prefixes))?;
            for (i, triple) in triples.iter().enumerate() {
                let predicate = if triple.predicate == RDF_TYPE {
                    "a".to_string()
                } else {
                    format_iri(&triple.predicate, &prefixes)
                };
                let object = format_object(&triple.object, &prefixes);
                if i == 0 {
                    write!(writer, " {} {}", predicate, object)?;
                } else {
                    write!(writer, " ;\n    {} {}", predicate, object)?;
                }
            }
            writeln!(writer, " .\n")?;
        }

        Ok(())
    }

    /// Convert to string.
    pub fn to_string(graph: &Graph, ns: &Namespace) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail
        let _ = Self::write(graph, ns, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// A serialized graph sitting in a temporary file next to its destination.
pub struct StagedGraph {
    tmp: NamedTempFile,
    path: PathBuf,
}

impl StagedGraph {
    /// Serialize `graph` into a temporary file in `path`'s directory.
    pub fn new(graph: &Graph, ns: &Namespace, format: GraphFormat, path: &Path) -> Result<Self> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| ScholarError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let tmp = NamedTempFile::new_in(dir).map_err(|e| ScholarError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;

        {
            let mut writer = BufWriter::new(tmp.as_file());
            let written = match format {
                GraphFormat::Turtle => Turtle::write(graph, ns, &mut writer),
                GraphFormat::NTriples => NTriples::write(graph, &mut writer),
            };
            written.and_then(|_| writer.flush()).map_err(|e| {
                ScholarError::Persistence(format!("Failed to write '{}': {}", path.display(), e))
            })?;
        }

        Ok(Self {
            tmp,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rename the temporary file onto its destination.
    pub fn commit(self) -> Result<()> {
        let path = self.path;
        self.tmp.persist(&path).map_err(|e| {
            ScholarError::Persistence(format!("Failed to move graph into '{}': {}", path.display(), e))
        })?;
        Ok(())
    }
}

/// Serialize `graph` to `path` in `format`, atomically.
pub fn write_graph(graph: &Graph, ns: &Namespace, format: GraphFormat, path: &Path) -> Result<()> {
    StagedGraph::new(graph, ns, format, path)?.commit()
}

/// Serialize every graph before renaming any of them into place. A
/// serialization failure leaves all destinations untouched; dropped
/// temporaries are removed.
pub fn write_graphs(ns: &Namespace, format: GraphFormat, outputs: &[(&Graph, &Path)]) -> Result<()> {
    let staged = outputs
        .iter()
        .map(|(graph, path)| StagedGraph::new(graph, ns, format, path))
        .collect::<Result<Vec<_>>>()?;
    for graph in staged {
        graph.commit()?;
    }
    Ok(())
}

/// Prefixes in declaration order. The empty prefix is the base namespace.
fn prefixes(ns: &Namespace) -> Vec<(&'static str, String)> {
    vec![
        ("", ns.base().to_string()),
        ("rdf", RDF.to_string()),
        ("rdfs", RDFS.to_string()),
        ("xsd", XSD.to_string()),
    ]
}

/// Format an IRI, compacting with a prefix if possible.
fn format_iri(iri: &str, prefixes: &[(&str, String)]) -> String {
    for (prefix, base) in prefixes {
        if let Some(local) = iri.strip_prefix(base.as_str()) {
            if is_valid_local_name(local) {
                return format!("{}:{}", prefix, local);
            }
        }
    }
    format!("<{}>", iri)
}

fn format_object(term: &Term, prefixes: &[(&str, String)]) -> String {
    match term {
        Term::Iri { iri } => format_iri(iri, prefixes),
        Term::Literal { lexical, datatype } => format!(
            "\"{}\"^^xsd:{}",
            escape_literal(lexical),
            datatype.xsd_name()
        ),
    }
}

/// Conservative check for a Turtle local name.
fn is_valid_local_name(s: &str) -> bool {
    let Some(first) = s.chars().next() else {
        return false;
    };
    (first.is_ascii_alphanumeric() || first == '_')
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::LiteralType;

    fn sample() -> (Graph, Namespace) {
        let ns = Namespace::new("http://example.org/kg/").unwrap();
        let mut graph = Graph::new();
        graph.insert_link(&ns.term("paper_P1"), RDF_TYPE, &ns.term("paper"));
        graph.insert(Triple::new(
            ns.term("paper_P1"),
            ns.term("pages"),
            Term::literal("12", LiteralType::Integer),
        ));
        graph.insert_link(&ns.term("paper_P1"), &ns.term("cites"), &ns.term("paper_P2"));
        (graph, ns)
    }

    #[test]
    fn test_turtle_groups_by_subject() {
        let (graph, ns) = sample();
        let out = Turtle::to_string(&graph, &ns);

        assert!(out.starts_with("@prefix : <http://example.org/kg/> ."));
        assert!(out.contains(":paper_P1 a :paper ;\n    :pages \"12\"^^xsd:integer ;\n    :cites :paper_P2 ."));
    }

    #[test]
    fn test_turtle_falls_back_to_full_iri() {
        let ns = Namespace::new("http://example.org/kg/").unwrap();
        let mut graph = Graph::new();
        graph.insert_link("http://other.org/x.y", RDF_TYPE, &ns.term("paper"));

        let out = Turtle::to_string(&graph, &ns);
        assert!(out.contains("<http://other.org/x.y> a :paper ."));
    }

    #[test]
    fn test_ntriples_one_line_per_triple() {
        let (graph, _) = sample();
        let mut buf = Vec::new();
        NTriples::write(&graph, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();

        assert_eq!(out.lines().count(), 3);
        assert!(out.lines().all(|l| l.ends_with(" .")));
    }

    #[test]
    fn test_write_graph_creates_file() {
        let (graph, ns) = sample();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("ABOX.nt");

        write_graph(&graph, &ns, GraphFormat::NTriples, &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 3);
        // Only the final file remains in the directory
        assert_eq!(fs::read_dir(path.parent().unwrap()).unwrap().count(), 1);
    }

    #[test]
    fn test_failed_staging_leaves_every_destination_untouched() {
        let (graph, ns) = sample();
        let dir = tempfile::tempdir().unwrap();
        let tbox = dir.path().join("TBOX.nt");
        fs::write(&tbox, "previous run\n").unwrap();
        // A file where the second graph's directory should be
        fs::write(dir.path().join("blocked"), "").unwrap();
        let abox = dir.path().join("blocked").join("ABOX.nt");

        let err = write_graphs(&ns, GraphFormat::NTriples, &[(&graph, &tbox), (&graph, &abox)]);

        assert!(matches!(err, Err(ScholarError::Io { .. })));
        assert_eq!(fs::read_to_string(&tbox).unwrap(), "previous run\n");
        // The first temporary was cleaned up
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_write_graphs_writes_all() {
        let (graph, ns) = sample();
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.nt");
        let b = dir.path().join("b.nt");

        write_graphs(&ns, GraphFormat::NTriples, &[(&graph, &a), (&graph, &b)]).unwrap();

        assert_eq!(fs::read_to_string(&a).unwrap(), fs::read_to_string(&b).unwrap());
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("ttl".parse::<GraphFormat>().unwrap(), GraphFormat::Turtle);
        assert_eq!("nt".parse::<GraphFormat>().unwrap(), GraphFormat::NTriples);
        assert!("xml".parse::<GraphFormat>().is_err());
    }
}
