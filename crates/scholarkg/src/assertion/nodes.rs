//! Node assertion: one type statement plus one statement per present
//! attribute, for every row that has an identifier.

use tracing::debug;

use super::Asserter;
use crate::graph::namespace::RDF_TYPE;
use crate::graph::{Term, Triple};
use crate::identity::IdentityIndex;
use crate::input::DataTable;
use crate::report::{Anomaly, AnomalyKind};
use crate::vocab::DatatypeProperty;

/// What one node assertion call wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeOutcome {
    /// Entities that received a type statement.
    pub entities: usize,
    /// New statements, type statements included.
    pub statements: usize,
}

impl Asserter<'_> {
    /// Assert the nodes of `table`.
    ///
    /// `ids` must have been minted from this table's rows. Each
    /// `(property, column)` pair is independent: a missing cell only loses
    /// that one statement, and a value that does not fit the property's
    /// datatype is reported and skipped.
    pub fn assert_nodes(
        &mut self,
        table: &DataTable,
        ids: &IdentityIndex,
        properties: &[(DatatypeProperty, &str)],
    ) -> NodeOutcome {
        let class_iri = self.ns.term(ids.class().tag());
        let columns: Vec<(DatatypeProperty, Option<usize>)> = properties
            .iter()
            .map(|&(prop, column)| (prop, table.column_index(column)))
            .collect();

        let mut outcome = NodeOutcome::default();

        for (row, id) in ids.minted() {
            let subject = id.iri(self.ns);
            outcome.entities += 1;
            if self.graph.insert_link(&subject, RDF_TYPE, &class_iri) {
                outcome.statements += 1;
            }

            for &(prop, col) in &columns {
                let Some(raw) = col.and_then(|c| table.value(row, c)) else {
                    continue;
                };

                let datatype = prop.range();
                let Some(lexical) = datatype.normalize(raw) else {
                    self.anomalies.push(
                        Anomaly::new(
                            AnomalyKind::InvalidLiteral,
                            &table.name,
                            row,
                            prop.name(),
                            format!("'{}' is not a valid xsd:{}", raw, datatype.xsd_name()),
                        )
                        .with_value(Some(raw.to_string())),
                    );
                    continue;
                };

                let triple = Triple::new(
                    subject.clone(),
                    self.ns.term(prop.name()),
                    Term::literal(lexical, datatype),
                );
                if self.graph.insert(triple) {
                    outcome.statements += 1;
                }
            }
        }

        debug!(
            table = %table.name,
            class = %ids.class(),
            entities = outcome.entities,
            statements = outcome.statements,
            "nodes asserted"
        );
        outcome
    }
}
