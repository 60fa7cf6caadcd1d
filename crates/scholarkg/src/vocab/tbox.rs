//! Schema (TBOX) graph generation.

use tracing::{debug, info};

use super::class::EntityClass;
use super::property::{DatatypeProperty, ObjectProperty};
use crate::graph::namespace::{
    RDF_PROPERTY, RDF_TYPE, RDFS_CLASS, RDFS_DOMAIN, RDFS_RANGE, RDFS_SUBCLASS_OF,
    RDFS_SUBPROPERTY_OF, XSD,
};
use crate::graph::{Graph, Namespace};

/// Assert every class and property declaration into `graph`.
///
/// Returns the number of new statements.
pub fn assert_schema(graph: &mut Graph, ns: &Namespace) -> usize {
    info!("Asserting schema declarations");
    let before = graph.len();

    for class in EntityClass::ALL {
        let iri = ns.term(class.tag());
        graph.insert_link(&iri, RDF_TYPE, RDFS_CLASS);
        if let Some(parent) = class.superclass() {
            graph.insert_link(&iri, RDFS_SUBCLASS_OF, &ns.term(parent.tag()));
        }
    }
    debug!(classes = EntityClass::ALL.len(), "classes asserted");

    for prop in DatatypeProperty::ALL {
        let iri = ns.term(prop.name());
        graph.insert_link(&iri, RDF_TYPE, RDF_PROPERTY);
        graph.insert_link(&iri, RDFS_DOMAIN, &ns.term(prop.domain().tag()));
        graph.insert_link(&iri, RDFS_RANGE, &format!("{}{}", XSD, prop.range().xsd_name()));
    }
    debug!(properties = DatatypeProperty::ALL.len(), "datatype properties asserted");

    for prop in ObjectProperty::ALL {
        let iri = ns.term(prop.name());
        graph.insert_link(&iri, RDF_TYPE, RDF_PROPERTY);
        if let Some(parent) = prop.super_property() {
            graph.insert_link(&iri, RDFS_SUBPROPERTY_OF, &ns.term(parent.name()));
        }
        graph.insert_link(&iri, RDFS_DOMAIN, &ns.term(prop.domain().tag()));
        graph.insert_link(&iri, RDFS_RANGE, &ns.term(prop.range().tag()));
    }
    debug!(properties = ObjectProperty::ALL.len(), "object properties asserted");

    graph.len() - before
}

/// Build a fresh schema graph.
pub fn schema_graph(ns: &Namespace) -> Graph {
    let mut graph = Graph::new();
    assert_schema(&mut graph, ns);
    graph
}
