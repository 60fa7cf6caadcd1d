//! Namespaces used to build IRIs.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScholarError};

pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDF_PROPERTY: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Property";
pub const RDFS_CLASS: &str = "http://www.w3.org/2000/01/rdf-schema#Class";
pub const RDFS_SUBCLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
pub const RDFS_SUBPROPERTY_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subPropertyOf";
pub const RDFS_DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";
pub const RDFS_RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";

/// Base namespace every class, property and entity IRI is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    base: String,
}

impl Namespace {
    /// Create a namespace from a base URL.
    ///
    /// A base that does not end in `/` or `#` gets a `/` appended so local
    /// names never run into the last path segment.
    pub fn new(base: impl Into<String>) -> Result<Self> {
        let mut base = base.into().trim().to_string();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ScholarError::Config(format!(
                "base URL must be an http(s) URL, got '{}'",
                base
            )));
        }
        if base.chars().any(forbidden_in_iri) {
            return Err(ScholarError::Config(format!(
                "base URL contains characters not allowed in an IRI: '{}'",
                base
            )));
        }
        if !base.ends_with('/') && !base.ends_with('#') {
            base.push('/');
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Full IRI for a local name.
    pub fn term(&self, local: &str) -> String {
        format!("{}{}", self.base, local)
    }
}

/// Characters an N-Triples or Turtle IRI reference may not contain.
fn forbidden_in_iri(c: char) -> bool {
    c.is_whitespace() || c.is_control() || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_added() {
        let ns = Namespace::new("https://SDM.org/Lab2").unwrap();
        assert_eq!(ns.base(), "https://SDM.org/Lab2/");
        assert_eq!(ns.term("paper_P1"), "https://SDM.org/Lab2/paper_P1");
    }

    #[test]
    fn test_hash_base_kept() {
        let ns = Namespace::new("http://example.org/onto#").unwrap();
        assert_eq!(ns.term("writes"), "http://example.org/onto#writes");
    }

    #[test]
    fn test_rejects_non_http_base() {
        assert!(Namespace::new("example.org").is_err());
        assert!(Namespace::new("http://exa mple.org/").is_err());
    }

    #[test]
    fn test_rejects_characters_illegal_in_iri_references() {
        for base in [
            "http://example.org/{kg}/",
            "http://example.org/a|b/",
            "http://example.org/a^b/",
            "http://example.org/a`b/",
            "http://example.org\\kg/",
        ] {
            assert!(
                matches!(Namespace::new(base), Err(ScholarError::Config(_))),
                "{base}"
            );
        }
        assert!(Namespace::new("http://example.org/kg?v=1#").is_ok());
    }
}
