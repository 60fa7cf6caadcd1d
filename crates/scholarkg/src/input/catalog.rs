//! The fixed set of source tables a run reads.

use std::path::{Path, PathBuf};

/// Location and column layout of one source table.
///
/// Columns are named by position; the file's own header row is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    /// Logical table name, used in logs and anomaly reports.
    pub name: &'static str,
    /// Path relative to the data directory.
    pub path: &'static str,
    /// Column names in file order.
    pub columns: &'static [&'static str],
}

impl TableSpec {
    /// Resolve the table's file under a data directory.
    pub fn resolve(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.path)
    }
}

pub const PAPER: TableSpec = TableSpec {
    name: "paper",
    path: "nodes/Node_paper.csv",
    columns: &["csv_id_paper", "name_paper", "DOI", "abstract", "pages"],
};

pub const AUTHOR: TableSpec = TableSpec {
    name: "author",
    path: "nodes/Node_author.csv",
    columns: &["name_author"],
};

pub const REVIEW: TableSpec = TableSpec {
    name: "review",
    path: "edges/Edge_paper_author_reviews.csv",
    columns: &["csv_id_paper", "name_author", "content", "approves"],
};

pub const AFFILIATION: TableSpec = TableSpec {
    name: "affiliation",
    path: "nodes/Node_affiliation.csv",
    columns: &["type", "name_affiliation"],
};

pub const KEYWORD: TableSpec = TableSpec {
    name: "keyword",
    path: "nodes/Node_keywords.csv",
    columns: &["name_keyword"],
};

pub const JOURNAL: TableSpec = TableSpec {
    name: "journal",
    path: "nodes/Node_journals.csv",
    columns: &["name_venue"],
};

pub const CONFERENCE: TableSpec = TableSpec {
    name: "conference",
    path: "nodes/Node_conference.csv",
    columns: &["name_venue"],
};

pub const VOLUME: TableSpec = TableSpec {
    name: "volume",
    path: "nodes/Node_volumes.csv",
    columns: &["name_compilation", "year"],
};

pub const EDITION: TableSpec = TableSpec {
    name: "edition",
    path: "nodes/Node_edition.csv",
    columns: &[
        "csv_id_edition",
        "name_compilation",
        "edition_num",
        "year",
        "location",
    ],
};

pub const COMMUNITY: TableSpec = TableSpec {
    name: "community",
    path: "nodes/Node_community.csv",
    columns: &["name_community"],
};

pub const AUTHORSHIP: TableSpec = TableSpec {
    name: "authorship",
    path: "edges/Edge_papers_author.csv",
    columns: &["csv_id_paper", "name_author", "main_author"],
};

pub const AFFILIATION_MEMBERSHIP: TableSpec = TableSpec {
    name: "affiliation_membership",
    path: "edges/Edge_affiliation_author.csv",
    columns: &["name_author", "name_affiliation"],
};

pub const PAPER_KEYWORDS: TableSpec = TableSpec {
    name: "paper_keywords",
    path: "edges/Edge_paper_keywords.csv",
    columns: &["csv_id_paper", "name_keyword"],
};

pub const CITATIONS: TableSpec = TableSpec {
    name: "citations",
    path: "edges/Edge_paper_paper.csv",
    columns: &["subject_csv_id_paper", "object_csv_id_paper"],
};

pub const PAPER_VOLUMES: TableSpec = TableSpec {
    name: "paper_volumes",
    path: "edges/Edge_paper_volumes.csv",
    columns: &["csv_id_paper", "name_compilation", "short_volume"],
};

pub const PAPER_EDITIONS: TableSpec = TableSpec {
    name: "paper_editions",
    path: "edges/Edge_papers_edition.csv",
    columns: &["csv_id_paper", "csv_id_edition"],
};

pub const VOLUME_JOURNAL: TableSpec = TableSpec {
    name: "volume_journal",
    path: "edges/Edge_volumes_journal.csv",
    columns: &["name_compilation", "name_venue"],
};

pub const EDITION_CONFERENCE: TableSpec = TableSpec {
    name: "edition_conference",
    path: "edges/Edge_edition_conference.csv",
    columns: &["csv_id_edition", "name_venue"],
};

pub const CONFERENCE_COMMUNITY: TableSpec = TableSpec {
    name: "conference_community",
    path: "edges/Edge_conference_community.csv",
    columns: &["name_venue", "name_community"],
};

pub const JOURNAL_COMMUNITY: TableSpec = TableSpec {
    name: "journal_community",
    path: "edges/Edge_journal_community.csv",
    columns: &["name_venue", "name_community"],
};

/// Every table a run loads, in load order.
pub const ALL_TABLES: &[TableSpec] = &[
    PAPER,
    AUTHOR,
    REVIEW,
    AFFILIATION,
    KEYWORD,
    JOURNAL,
    CONFERENCE,
    VOLUME,
    EDITION,
    COMMUNITY,
    AUTHORSHIP,
    AFFILIATION_MEMBERSHIP,
    PAPER_KEYWORDS,
    CITATIONS,
    PAPER_VOLUMES,
    PAPER_EDITIONS,
    VOLUME_JOURNAL,
    EDITION_CONFERENCE,
    CONFERENCE_COMMUNITY,
    JOURNAL_COMMUNITY,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_names_are_unique() {
        let names: HashSet<_> = ALL_TABLES.iter().map(|t| t.name).collect();
        assert_eq!(names.len(), ALL_TABLES.len());
    }

    #[test]
    fn test_resolve_joins_data_dir() {
        let path = PAPER.resolve(Path::new("data"));
        assert_eq!(path, Path::new("data/nodes/Node_paper.csv"));
    }
}
