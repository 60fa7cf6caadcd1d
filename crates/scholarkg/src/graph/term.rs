//! RDF terms and triples.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::namespace::XSD;
use crate::vocab::LiteralType;

/// The object position of a triple: either an IRI or a typed literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Term {
    Iri { iri: String },
    Literal { lexical: String, datatype: LiteralType },
}

impl Term {
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri { iri: iri.into() }
    }

    pub fn literal(lexical: impl Into<String>, datatype: LiteralType) -> Self {
        Term::Literal {
            lexical: lexical.into(),
            datatype,
        }
    }

    /// The IRI, if this term is one.
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri { iri } => Some(iri),
            Term::Literal { .. } => None,
        }
    }

    /// N-Triples rendering of the term.
    pub fn to_ntriples(&self) -> String {
        match self {
            Term::Iri { iri } => format!("<{}>", iri),
            Term::Literal { lexical, datatype } => format!(
                "\"{}\"^^<{}{}>",
                escape_literal(lexical),
                XSD,
                datatype.xsd_name()
            ),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ntriples())
    }
}

/// A (subject, predicate, object) statement. Subject and predicate are IRIs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: impl Into<String>, predicate: impl Into<String>, object: Term) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object,
        }
    }

    /// Convert to N-Triples format.
    ///
    /// ```rust
    /// use scholarkg::graph::{Term, Triple};
    ///
    /// let t = Triple::new("http://ex.org/a", "http://ex.org/cites", Term::iri("http://ex.org/b"));
    /// assert_eq!(t.to_ntriples(), "<http://ex.org/a> <http://ex.org/cites> <http://ex.org/b> .");
    /// ```
    pub fn to_ntriples(&self) -> String {
        format!(
            "<{}> <{}> {} .",
            self.subject,
            self.predicate,
            self.object.to_ntriples()
        )
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.subject, self.predicate, self.object)
    }
}

/// Escape a literal's lexical form for N-Triples and Turtle string syntax.
pub fn escape_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}
