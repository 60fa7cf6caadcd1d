//! EDGES: join edge tables against minted identities.

use tracing::info;

use super::entities::Entities;
use super::load::SourceTables;
use crate::assertion::{Asserter, Endpoint};
use crate::error::Result;
use crate::identity::{AuthorRoles, IdentityIndex};
use crate::input::DataTable;
use crate::input::catalog::{
    AFFILIATION_MEMBERSHIP, AUTHORSHIP, CITATIONS, CONFERENCE_COMMUNITY, EDITION_CONFERENCE,
    JOURNAL_COMMUNITY, PAPER_EDITIONS, PAPER_KEYWORDS, PAPER_VOLUMES, REVIEW, TableSpec,
    VOLUME_JOURNAL,
};
use crate::report::{Anomaly, AnomalyKind, RunReport};
use crate::vocab::{ObjectProperty, parse_bool};

fn key<'a>(column: &'a str, index: &'a IdentityIndex) -> Endpoint<'a> {
    Endpoint::Key { column, index }
}

fn author<'a>(column: &'a str, roles: &'a AuthorRoles) -> Endpoint<'a> {
    Endpoint::Author { column, roles }
}

/// Assert every edge, adding per-predicate counts to `report`.
///
/// Fails only when an author key is unknown to both author groups.
pub fn assert_relations(
    tables: &SourceTables,
    entities: &Entities,
    asserter: &mut Asserter<'_>,
    report: &mut RunReport,
) -> Result<()> {
    assert_authorship(tables.table(&AUTHORSHIP), entities, asserter, report)?;

    let review_row = Endpoint::Row {
        label: "review",
        index: &entities.reviews,
    };

    let plan: [(&TableSpec, Endpoint<'_>, ObjectProperty, Endpoint<'_>); 11] = [
        (&REVIEW, author("name_author", &entities.roles), ObjectProperty::WritesR, review_row),
        (
            &REVIEW,
            review_row,
            ObjectProperty::About,
            Endpoint::Bound {
                label: "csv_id_paper",
                ids: &entities.review_papers,
            },
        ),
        (
            &AFFILIATION_MEMBERSHIP,
            author("name_author", &entities.roles),
            ObjectProperty::BelongsToA,
            key("name_affiliation", &entities.affiliations),
        ),
        (
            &PAPER_KEYWORDS,
            key("csv_id_paper", &entities.papers),
            ObjectProperty::RelatesTo,
            key("name_keyword", &entities.keywords),
        ),
        (
            &CITATIONS,
            key("subject_csv_id_paper", &entities.papers),
            ObjectProperty::Cites,
            key("object_csv_id_paper", &entities.papers),
        ),
        (
            &PAPER_VOLUMES,
            key("csv_id_paper", &entities.papers),
            ObjectProperty::PublishedInV,
            key("name_compilation", &entities.volumes),
        ),
        (
            &PAPER_EDITIONS,
            key("csv_id_paper", &entities.papers),
            ObjectProperty::PublishedInE,
            key("csv_id_edition", &entities.editions),
        ),
        (
            &VOLUME_JOURNAL,
            key("name_compilation", &entities.volumes),
            ObjectProperty::BelongsToJ,
            key("name_venue", &entities.journals),
        ),
        (
            &EDITION_CONFERENCE,
            key("csv_id_edition", &entities.editions),
            ObjectProperty::BelongsToC,
            key("name_venue", &entities.conferences),
        ),
        (
            &CONFERENCE_COMMUNITY,
            key("name_venue", &entities.conferences),
            ObjectProperty::CIn,
            key("name_community", &entities.communities),
        ),
        (
            &JOURNAL_COMMUNITY,
            key("name_venue", &entities.journals),
            ObjectProperty::JIn,
            key("name_community", &entities.communities),
        ),
    ];

    for (spec, subject, predicate, object) in plan {
        let outcome = asserter.assert_all_edges(tables.table(spec), subject, predicate, object)?;
        report.add_edges(predicate, outcome.statements);
    }

    info!(statements = report.edge_statements(), "edges asserted");
    Ok(())
}

/// Authorship rows split on `main_author`: corresponding authors get
/// `is_corresponding_author`, the rest `writes`. A missing flag reads as
/// not corresponding; a flag that is not a boolean drops the row.
fn assert_authorship(
    table: &DataTable,
    entities: &Entities,
    asserter: &mut Asserter<'_>,
    report: &mut RunReport,
) -> Result<()> {
    let flag = table.column_index("main_author");
    let mut corresponding = Vec::new();
    let mut plain = Vec::new();

    for row in 0..table.row_count() {
        let Some(raw) = flag.and_then(|c| table.value(row, c)) else {
            plain.push(row);
            continue;
        };
        match parse_bool(raw) {
            Some(true) => corresponding.push(row),
            Some(false) => plain.push(row),
            None => asserter.record(
                Anomaly::new(
                    AnomalyKind::InvalidFlag,
                    &table.name,
                    row,
                    "main_author",
                    format!("'{}' is not a boolean; row dropped", raw),
                )
                .with_value(Some(raw.to_string())),
            ),
        }
    }

    let writer = author("name_author", &entities.roles);
    let paper = key("csv_id_paper", &entities.papers);

    for (rows, predicate) in [
        (plain, ObjectProperty::Writes),
        (corresponding, ObjectProperty::IsCorrespondingAuthor),
    ] {
        let outcome = asserter.assert_edges(table, rows, writer, predicate, paper)?;
        report.add_edges(predicate, outcome.statements);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Graph, Namespace};

    fn run(tables: &SourceTables) -> (Graph, RunReport) {
        let ns = Namespace::new("http://example.org/kg/").unwrap();
        let mut graph = Graph::new();
        let mut report = RunReport::new(ns.base());
        let mut anomalies = Vec::new();
        let entities = Entities::mint(tables, &mut anomalies);
        report.extend(anomalies);

        let mut asserter = Asserter::new(&mut graph, &ns);
        entities.assert_nodes(tables, &mut asserter, &mut report);
        assert_relations(tables, &entities, &mut asserter, &mut report).unwrap();
        report.extend(asserter.take_anomalies());
        (graph, report)
    }

    fn base_tables(authorship: &[&[&str]]) -> SourceTables {
        SourceTables::from_tables([
            DataTable::from_rows(
                "paper",
                &["csv_id_paper", "name_paper", "DOI", "abstract", "pages"],
                &[&["P1", "Graphs", "", "", ""]],
            ),
            DataTable::from_rows("author", &["name_author"], &[&["Ada"], &["Bob"]]),
            DataTable::from_rows(
                "authorship",
                &["csv_id_paper", "name_author", "main_author"],
                authorship,
            ),
        ])
    }

    #[test]
    fn test_main_author_flag_selects_predicate() {
        let (_, report) = run(&base_tables(&[&["P1", "Ada", "True"], &["P1", "Bob", "False"]]));
        assert_eq!(report.edges["is_corresponding_author"], 1);
        assert_eq!(report.edges["writes"], 1);
    }

    #[test]
    fn test_invalid_flag_drops_row() {
        let (_, report) = run(&base_tables(&[&["P1", "Ada", "maybe"]]));
        assert_eq!(report.edges["writes"], 0);
        assert_eq!(report.edges["is_corresponding_author"], 0);
        assert_eq!(report.anomalies_by_kind()[&AnomalyKind::InvalidFlag], 1);
    }

    #[test]
    fn test_unknown_paper_drops_authorship_row() {
        let (graph, report) = run(&base_tables(&[&["P404", "Ada", "false"]]));
        assert_eq!(report.edges["writes"], 0);
        assert_eq!(report.anomalies_by_kind()[&AnomalyKind::JoinMiss], 1);
        assert!(
            graph
                .triples()
                .all(|t| t.object.as_iri().is_none_or(|o| !o.contains("P404")))
        );
    }

    #[test]
    fn test_every_predicate_is_reported() {
        let (_, report) = run(&base_tables(&[]));
        assert_eq!(report.edges.len(), 13);
    }
}
