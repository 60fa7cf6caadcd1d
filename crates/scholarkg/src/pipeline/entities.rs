//! NODES: mint every entity, then assert type and attribute statements.

use tracing::info;

use super::load::SourceTables;
use crate::assertion::Asserter;
use crate::identity::{AuthorRoles, Identifier, IdentifierMinter, IdentityIndex, Membership};
use crate::input::DataTable;
use crate::input::catalog::{
    AFFILIATION, AUTHOR, COMMUNITY, CONFERENCE, EDITION, JOURNAL, KEYWORD, PAPER, REVIEW, VOLUME,
};
use crate::report::{Anomaly, RunReport};
use crate::vocab::{DatatypeProperty as P, EntityClass};

type PropertyMap = &'static [(P, &'static str)];

const PAPER_PROPERTIES: PropertyMap = &[
    (P::NamePaper, "name_paper"),
    (P::Doi, "DOI"),
    (P::Abstract, "abstract"),
    (P::Pages, "pages"),
];
const AUTHOR_PROPERTIES: PropertyMap = &[(P::NameAuthor, "name_author")];
const REVIEW_PROPERTIES: PropertyMap = &[(P::Content, "content"), (P::Approves, "approves")];
const AFFILIATION_PROPERTIES: PropertyMap = &[
    (P::AffiliationType, "type"),
    (P::NameAffiliation, "name_affiliation"),
];
const KEYWORD_PROPERTIES: PropertyMap = &[(P::NameKeyword, "name_keyword")];
const VENUE_PROPERTIES: PropertyMap = &[(P::NameVenue, "name_venue")];
const VOLUME_PROPERTIES: PropertyMap = &[(P::NameCompilation, "name_compilation"), (P::Year, "year")];
const EDITION_PROPERTIES: PropertyMap = &[
    (P::NameCompilation, "name_compilation"),
    (P::Year, "year"),
    (P::Location, "location"),
];
const COMMUNITY_PROPERTIES: PropertyMap = &[(P::NameCommunity, "name_community")];

/// Every identity minted in a run.
///
/// Built once from the full source tables; the edge phase only reads it.
#[derive(Debug, Clone)]
pub struct Entities {
    pub papers: IdentityIndex,
    pub roles: AuthorRoles,
    /// One row per distinct reviewer key, for the reviewer nodes.
    pub reviewer_table: DataTable,
    /// Indexed by review table row.
    pub reviews: IdentityIndex,
    /// The paper each minted review is about, by review table row.
    pub review_papers: Vec<Option<Identifier>>,
    pub affiliations: IdentityIndex,
    pub keywords: IdentityIndex,
    pub journals: IdentityIndex,
    pub conferences: IdentityIndex,
    pub volumes: IdentityIndex,
    pub editions: IdentityIndex,
    pub communities: IdentityIndex,
}

impl Entities {
    /// Mint identities for every node table, recording rows without a key.
    ///
    /// Author membership is settled here, before any edge exists.
    pub fn mint(tables: &SourceTables, anomalies: &mut Vec<Anomaly>) -> Self {
        let papers = mint_keyed(tables.table(&PAPER), "csv_id_paper", EntityClass::Paper, anomalies);

        let authors = tables.table(&AUTHOR);
        let reviews = tables.table(&REVIEW);
        let membership = Membership::new(
            present(authors, "name_author").into_iter().flatten(),
            present(reviews, "name_author").into_iter().flatten(),
        );
        record_missing(authors, "name_author", anomalies);
        let roles = AuthorRoles::new(membership, present(authors, "name_author"));

        let reviewer_table = DataTable::new(
            "reviewer",
            vec!["name_author".to_string()],
            roles
                .membership()
                .reviewers()
                .iter()
                .map(|k| vec![k.clone()])
                .collect(),
        );

        let (review_ids, review_papers) = mint_reviews(reviews, &papers, &roles, anomalies);

        Self {
            reviews: review_ids,
            review_papers,
            affiliations: mint_keyed(
                tables.table(&AFFILIATION),
                "name_affiliation",
                EntityClass::Affiliation,
                anomalies,
            ),
            keywords: mint_keyed(tables.table(&KEYWORD), "name_keyword", EntityClass::Keyword, anomalies),
            journals: mint_keyed(tables.table(&JOURNAL), "name_venue", EntityClass::Journal, anomalies),
            conferences: mint_keyed(
                tables.table(&CONFERENCE),
                "name_venue",
                EntityClass::Conference,
                anomalies,
            ),
            volumes: mint_keyed(tables.table(&VOLUME), "name_compilation", EntityClass::Volume, anomalies),
            editions: mint_keyed(tables.table(&EDITION), "csv_id_edition", EntityClass::Edition, anomalies),
            communities: mint_keyed(
                tables.table(&COMMUNITY),
                "name_community",
                EntityClass::Community,
                anomalies,
            ),
            papers,
            roles,
            reviewer_table,
        }
    }

    /// Node tables with their identities and attribute columns, in
    /// assertion order.
    fn node_tables<'a>(
        &'a self,
        tables: &'a SourceTables,
    ) -> [(&'a DataTable, &'a IdentityIndex, PropertyMap); 11] {
        [
            (tables.table(&PAPER), &self.papers, PAPER_PROPERTIES),
            (tables.table(&AUTHOR), self.roles.authors(), AUTHOR_PROPERTIES),
            (&self.reviewer_table, self.roles.reviewers(), AUTHOR_PROPERTIES),
            (tables.table(&REVIEW), &self.reviews, REVIEW_PROPERTIES),
            (tables.table(&AFFILIATION), &self.affiliations, AFFILIATION_PROPERTIES),
            (tables.table(&KEYWORD), &self.keywords, KEYWORD_PROPERTIES),
            (tables.table(&JOURNAL), &self.journals, VENUE_PROPERTIES),
            (tables.table(&CONFERENCE), &self.conferences, VENUE_PROPERTIES),
            (tables.table(&VOLUME), &self.volumes, VOLUME_PROPERTIES),
            (tables.table(&EDITION), &self.editions, EDITION_PROPERTIES),
            (tables.table(&COMMUNITY), &self.communities, COMMUNITY_PROPERTIES),
        ]
    }

    /// Assert every node, adding per-class counts to `report`.
    pub fn assert_nodes(
        &self,
        tables: &SourceTables,
        asserter: &mut Asserter<'_>,
        report: &mut RunReport,
    ) {
        for (table, ids, properties) in self.node_tables(tables) {
            let outcome = asserter.assert_nodes(table, ids, properties);
            report.add_nodes(ids.class(), outcome.entities, outcome.statements);
        }

        info!(
            entities = report.nodes.values().sum::<usize>(),
            statements = report.node_statements,
            "nodes asserted"
        );
    }
}

/// Present key values of `column`, one entry per row.
fn present<'t>(table: &'t DataTable, column: &str) -> Vec<Option<&'t str>> {
    match table.column_index(column) {
        Some(col) => table.column_values(col).collect(),
        None => vec![None; table.row_count()],
    }
}

fn record_missing(table: &DataTable, column: &str, anomalies: &mut Vec<Anomaly>) {
    for (row, key) in present(table, column).iter().enumerate() {
        if key.is_none() {
            anomalies.push(Anomaly::missing_key(&table.name, row, column));
        }
    }
}

fn mint_keyed(
    table: &DataTable,
    column: &str,
    class: EntityClass,
    anomalies: &mut Vec<Anomaly>,
) -> IdentityIndex {
    record_missing(table, column, anomalies);
    IdentifierMinter::new(class).mint(present(table, column))
}

/// Mint review identities from (paper, reviewer) composite keys, and
/// return the paper each review was bound to.
///
/// A review whose paper was never minted has no identity; a paper key that
/// matches several papers is bound to the first of them, and `about` uses
/// that same paper.
fn mint_reviews(
    reviews: &DataTable,
    papers: &IdentityIndex,
    roles: &AuthorRoles,
    anomalies: &mut Vec<Anomaly>,
) -> (IdentityIndex, Vec<Option<Identifier>>) {
    let paper_keys = present(reviews, "csv_id_paper");
    let reviewer_keys = present(reviews, "name_author");

    let bound: Vec<Option<(String, Identifier)>> = paper_keys
        .iter()
        .zip(&reviewer_keys)
        .enumerate()
        .map(|(row, (&paper, &reviewer))| {
            let (Some(paper), Some(reviewer)) = (paper, reviewer) else {
                let column = if paper.is_none() { "csv_id_paper" } else { "name_author" };
                anomalies.push(Anomaly::missing_key(&reviews.name, row, column));
                return None;
            };

            let Some(paper_id) = papers.lookup(paper).into_iter().next() else {
                anomalies.push(Anomaly::join_miss(&reviews.name, row, "csv_id_paper", Some(paper)));
                return None;
            };

            roles
                .reviewers()
                .lookup(reviewer)
                .into_iter()
                .next()
                .map(|reviewer_id| (Identifier::composite_key(paper_id, reviewer_id), paper_id.clone()))
        })
        .collect();

    let ids = IdentifierMinter::new(EntityClass::Review)
        .mint(bound.iter().map(|b| b.as_ref().map(|(key, _)| key.as_str())));
    let papers = bound.into_iter().map(|b| b.map(|(_, paper)| paper)).collect();
    (ids, papers)
}
