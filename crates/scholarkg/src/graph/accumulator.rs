//! Append-only triple accumulator.

use indexmap::IndexSet;

use super::namespace::RDF_TYPE;
use super::term::{Term, Triple};

/// An append-only set of triples owned by one run.
///
/// Insertion order is preserved so that serializing the same input twice
/// produces byte-identical output. Re-asserting an existing triple is a no-op.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    triples: IndexSet<Triple>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a triple. Returns `false` if it was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        self.triples.insert(triple)
    }

    /// Add a triple whose object is an IRI.
    pub fn insert_link(&mut self, subject: &str, predicate: &str, object: &str) -> bool {
        self.insert(Triple::new(subject, predicate, Term::iri(object)))
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    /// Triples in insertion order.
    pub fn triples(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Distinct subjects in first-seen order.
    pub fn subjects(&self) -> IndexSet<&str> {
        self.triples.iter().map(|t| t.subject.as_str()).collect()
    }

    /// Subjects carrying an `rdf:type` statement for `class_iri`.
    pub fn instances_of<'a>(&'a self, class_iri: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.triples.iter().filter_map(move |t| {
            (t.predicate == RDF_TYPE && t.object.as_iri() == Some(class_iri))
                .then_some(t.subject.as_str())
        })
    }

    /// Triples with the given predicate.
    pub fn with_predicate<'a>(&'a self, predicate: &'a str) -> impl Iterator<Item = &'a Triple> + 'a {
        self.triples.iter().filter(move |t| t.predicate == predicate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_insert_is_noop() {
        let mut graph = Graph::new();
        assert!(graph.insert_link("s", "p", "o"));
        assert!(!graph.insert_link("s", "p", "o"));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut graph = Graph::new();
        graph.insert_link("b", "p", "o");
        graph.insert_link("a", "p", "o");

        let subjects: Vec<_> = graph.subjects().into_iter().collect();
        assert_eq!(subjects, vec!["b", "a"]);
    }

    #[test]
    fn test_instances_of() {
        let mut graph = Graph::new();
        graph.insert_link("x", RDF_TYPE, "C");
        graph.insert_link("y", RDF_TYPE, "D");
        graph.insert_link("z", "other", "C");

        let found: Vec<_> = graph.instances_of("C").collect();
        assert_eq!(found, vec!["x"]);
    }
}
