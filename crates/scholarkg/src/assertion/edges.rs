//! Edge assertion over joined rows.

use tracing::debug;

use super::Asserter;
use crate::error::Result;
use crate::identity::{AuthorRoles, Identifier, IdentityIndex};
use crate::input::DataTable;
use crate::report::Anomaly;
use crate::vocab::ObjectProperty;

/// How one side of an edge row is joined to a minted entity.
#[derive(Debug, Clone, Copy)]
pub enum Endpoint<'a> {
    /// The column's value is a natural key of a minted table.
    Key {
        column: &'a str,
        index: &'a IdentityIndex,
    },
    /// The column's value is an author key; it resolves to the reviewer
    /// node when the author has written a review.
    Author {
        column: &'a str,
        roles: &'a AuthorRoles,
    },
    /// The edge table is itself minted (reviews): the row's own identifier.
    Row {
        label: &'a str,
        index: &'a IdentityIndex,
    },
    /// An identifier fixed per row when the row itself was minted.
    Bound {
        label: &'a str,
        ids: &'a [Option<Identifier>],
    },
}

/// Result of resolving one side of one row.
enum Resolved<'a> {
    Found(Vec<&'a Identifier>),
    Missing(Anomaly),
}

impl<'a> Endpoint<'a> {
    /// Resolve this side for `row` of `table`.
    ///
    /// Only an author key that is neither an author nor a reviewer is an
    /// error; everything else that fails to match is a row-level miss.
    fn resolve(&self, table: &DataTable, row: usize) -> Result<Resolved<'a>> {
        let (column, found) = match *self {
            Endpoint::Row { label, index } => {
                return Ok(match index.get(row) {
                    Some(id) => Resolved::Found(vec![id]),
                    None => Resolved::Missing(Anomaly::join_miss(&table.name, row, label, None)),
                });
            }
            Endpoint::Bound { label, ids } => {
                return Ok(match ids.get(row).and_then(Option::as_ref) {
                    Some(id) => Resolved::Found(vec![id]),
                    None => Resolved::Missing(Anomaly::join_miss(&table.name, row, label, None)),
                });
            }
            Endpoint::Key { column, index } => match cell(table, row, column) {
                Some(key) => (column, (key, index.lookup(key))),
                None => return Ok(missing(table, row, column)),
            },
            Endpoint::Author { column, roles } => match cell(table, row, column) {
                Some(key) => (column, (key, roles.lookup(key, &table.name)?)),
                None => return Ok(missing(table, row, column)),
            },
        };

        let (key, ids) = found;
        Ok(if ids.is_empty() {
            Resolved::Missing(Anomaly::join_miss(&table.name, row, column, Some(key)))
        } else {
            Resolved::Found(ids)
        })
    }
}

fn cell<'t>(table: &'t DataTable, row: usize, column: &str) -> Option<&'t str> {
    table.column_index(column).and_then(|c| table.value(row, c))
}

fn missing<'a>(table: &DataTable, row: usize, column: &str) -> Resolved<'a> {
    Resolved::Missing(Anomaly::join_miss(&table.name, row, column, None))
}

/// What one edge assertion call wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeOutcome {
    /// Rows that produced at least one statement.
    pub joined_rows: usize,
    /// Rows dropped because an endpoint was missing.
    pub dropped_rows: usize,
    /// New statements.
    pub statements: usize,
}

impl Asserter<'_> {
    /// Assert `predicate` for the given rows of `table`.
    ///
    /// A row emits one statement per (subject, object) pair its keys join
    /// to, so a key repeated in the target table fans out to every match.
    /// A row where either side is missing emits nothing and is reported.
    pub fn assert_edges<I>(
        &mut self,
        table: &DataTable,
        rows: I,
        subject: Endpoint<'_>,
        predicate: ObjectProperty,
        object: Endpoint<'_>,
    ) -> Result<EdgeOutcome>
    where
        I: IntoIterator<Item = usize>,
    {
        let predicate_iri = self.ns.term(predicate.name());
        let mut outcome = EdgeOutcome::default();

        for row in rows {
            let subjects = subject.resolve(table, row)?;
            let objects = object.resolve(table, row)?;

            let (subjects, objects) = match (subjects, objects) {
                (Resolved::Found(s), Resolved::Found(o)) => (s, o),
                (s, o) => {
                    for miss in [s, o] {
                        if let Resolved::Missing(anomaly) = miss {
                            self.anomalies.push(anomaly.with_predicate(predicate.name()));
                        }
                    }
                    outcome.dropped_rows += 1;
                    continue;
                }
            };

            outcome.joined_rows += 1;
            for s in &subjects {
                let subject_iri = s.iri(self.ns);
                for o in &objects {
                    if self.graph.insert_link(&subject_iri, &predicate_iri, &o.iri(self.ns)) {
                        outcome.statements += 1;
                    }
                }
            }
        }

        debug!(
            table = %table.name,
            predicate = predicate.name(),
            joined = outcome.joined_rows,
            dropped = outcome.dropped_rows,
            statements = outcome.statements,
            "edges asserted"
        );
        Ok(outcome)
    }

    /// Assert `predicate` for every row of `table`.
    pub fn assert_all_edges(
        &mut self,
        table: &DataTable,
        subject: Endpoint<'_>,
        predicate: ObjectProperty,
        object: Endpoint<'_>,
    ) -> Result<EdgeOutcome> {
        self.assert_edges(table, 0..table.row_count(), subject, predicate, object)
    }
}
