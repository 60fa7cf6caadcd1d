//! Integration tests for scholarkg.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use scholarkg::graph::namespace::RDF_TYPE;
use scholarkg::graph::Term;
use scholarkg::input::TableSpec;
use scholarkg::input::catalog::{self, ALL_TABLES};
use scholarkg::{
    AnomalyKind, Generator, GeneratorConfig, Graph, GraphFormat, RunReport, ScholarError,
};

const BASE: &str = "http://example.org/kg/";

/// A data directory with every catalogued table present.
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    /// Every table with a header and no rows.
    fn empty() -> Self {
        let fixture = Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        };
        for spec in ALL_TABLES {
            fixture.write(spec, "");
        }
        fixture
    }

    /// A small but complete bibliography.
    fn standard() -> Self {
        Self::empty()
            .with(
                &catalog::PAPER,
                "P1,Graph Mining,10.1/a,\"Mining, graphs\",12\n\
                 P2,Triple Stores,,,\n\
                 P3,Knowledge Bases,10.1/c,,7.0\n",
            )
            .with(&catalog::AUTHOR, "Jane Smith\nJane Smith\nAda Lovelace\nBob\n")
            .with(
                &catalog::REVIEW,
                "P1,Carol,Looks good,true\n\
                 P2,Bob,Needs work,false\n",
            )
            .with(&catalog::AFFILIATION, "University,MIT\nCompany,ACME\n")
            .with(&catalog::KEYWORD, "graphs\nrdf\n")
            .with(&catalog::JOURNAL, "JDB\n")
            .with(&catalog::CONFERENCE, "ISWC\n")
            .with(&catalog::VOLUME, "JDB Vol 1,2020\n")
            .with(&catalog::EDITION, "E1,ISWC 2021,20,2021,Online\n")
            .with(&catalog::COMMUNITY, "Semantic Web\n")
            .with(
                &catalog::AUTHORSHIP,
                "P1,Jane Smith,true\n\
                 P2,Ada Lovelace,false\n\
                 P3,Bob,false\n\
                 P404,Ada Lovelace,true\n",
            )
            .with(&catalog::AFFILIATION_MEMBERSHIP, "Ada Lovelace,MIT\nBob,ACME\n")
            .with(&catalog::PAPER_KEYWORDS, "P1,graphs\nP2,rdf\n")
            .with(&catalog::CITATIONS, "P1,P2\nP2,P3\n")
            .with(&catalog::PAPER_VOLUMES, "P1,JDB Vol 1,V1\n")
            .with(&catalog::PAPER_EDITIONS, "P2,E1\nP3,E1\n")
            .with(&catalog::VOLUME_JOURNAL, "JDB Vol 1,JDB\n")
            .with(&catalog::EDITION_CONFERENCE, "E1,ISWC\n")
            .with(&catalog::CONFERENCE_COMMUNITY, "ISWC,Semantic Web\n")
            .with(&catalog::JOURNAL_COMMUNITY, "JDB,Semantic Web\n")
    }

    fn with(self, spec: &TableSpec, rows: &str) -> Self {
        self.write(spec, rows);
        self
    }

    fn write(&self, spec: &TableSpec, rows: &str) {
        let path = spec.resolve(&self.data_dir());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, format!("{}\n{}", spec.columns.join(","), rows)).unwrap();
    }

    fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    fn output_dir(&self) -> PathBuf {
        self.dir.path().join("output")
    }

    fn config(&self) -> GeneratorConfig {
        GeneratorConfig {
            base_url: BASE.to_string(),
            data_dir: self.data_dir(),
            output_dir: self.output_dir(),
            ..Default::default()
        }
    }

    fn generator(&self) -> Generator {
        Generator::with_config(self.config())
    }

    fn build(&self) -> (Graph, RunReport) {
        self.generator().build_abox().expect("Build failed")
    }
}

fn iri(local: &str) -> String {
    format!("{}{}", BASE, local)
}

fn instances(graph: &Graph, class: &str) -> Vec<String> {
    let class = iri(class);
    graph.instances_of(&class).map(str::to_string).collect()
}

fn edges(graph: &Graph, predicate: &str) -> Vec<(String, String)> {
    let predicate = iri(predicate);
    graph
        .with_predicate(&predicate)
        .filter_map(|t| Some((t.subject.clone(), t.object.as_iri()?.to_string())))
        .collect()
}

// =============================================================================
// Identity
// =============================================================================

#[test]
fn test_duplicate_author_names_get_ordinals() {
    let (graph, _) = Fixture::standard().build();

    let authors = instances(&graph, "author");
    assert!(authors.contains(&iri("author0_Jane_Smith")));
    assert!(authors.contains(&iri("author1_Jane_Smith")));
    assert!(authors.contains(&iri("author_Ada_Lovelace")));
    assert!(!authors.iter().any(|a| a.ends_with("author_Jane_Smith")));
}

#[test]
fn test_repeated_key_fans_out_to_every_match() {
    let (graph, report) = Fixture::standard().build();

    let corresponding = edges(&graph, "is_corresponding_author");
    assert_eq!(
        corresponding,
        vec![
            (iri("author0_Jane_Smith"), iri("paper_P1")),
            (iri("author1_Jane_Smith"), iri("paper_P1")),
        ]
    );
    assert_eq!(report.edges["is_corresponding_author"], 2);
}

#[test]
fn test_review_identity_is_composite() {
    let (graph, _) = Fixture::standard().build();

    let reviews = instances(&graph, "review");
    assert_eq!(
        reviews,
        vec![
            iri("review_paper_P1_reviewer_Carol"),
            iri("review_paper_P2_reviewer_Bob"),
        ]
    );

    let about = edges(&graph, "about");
    assert!(about.contains(&(iri("review_paper_P2_reviewer_Bob"), iri("paper_P2"))));
}

#[test]
fn test_review_is_about_the_paper_it_is_named_after() {
    let (graph, report) = Fixture::standard()
        .with(
            &catalog::PAPER,
            "P1,Graph Mining,,,\n\
             P1,Graph Mining Revisited,,,\n\
             P2,Triple Stores,,,\n\
             P3,Knowledge Bases,,,\n",
        )
        .build();

    let about: Vec<_> = edges(&graph, "about")
        .into_iter()
        .filter(|(review, _)| review.ends_with("reviewer_Carol"))
        .collect();
    assert_eq!(
        about,
        vec![(iri("review_paper0_P1_reviewer_Carol"), iri("paper0_P1"))]
    );
    assert_eq!(report.edges["about"], 2);
}

// =============================================================================
// Membership
// =============================================================================

#[test]
fn test_reviewer_only_key_is_reviewer() {
    let (graph, _) = Fixture::standard().build();

    let reviewers = instances(&graph, "reviewer");
    assert!(reviewers.contains(&iri("reviewer_Carol")));
    assert!(!instances(&graph, "author").iter().any(|a| a.contains("Carol")));

    let writes_r = edges(&graph, "writes_r");
    assert!(writes_r.contains(&(iri("reviewer_Carol"), iri("review_paper_P1_reviewer_Carol"))));
}

#[test]
fn test_author_who_reviews_is_only_a_reviewer() {
    let (graph, _) = Fixture::standard().build();

    assert!(instances(&graph, "reviewer").contains(&iri("reviewer_Bob")));
    assert!(!instances(&graph, "author").contains(&iri("author_Bob")));

    // Bob's authorship and affiliation point at the reviewer node
    assert!(edges(&graph, "writes").contains(&(iri("reviewer_Bob"), iri("paper_P3"))));
    assert!(edges(&graph, "belongs_to_a").contains(&(iri("reviewer_Bob"), iri("affiliation_ACME"))));
}

#[test]
fn test_author_and_reviewer_sets_are_disjoint() {
    let (graph, _) = Fixture::standard().build();

    let authors: HashSet<_> = instances(&graph, "author").into_iter().collect();
    let reviewers: HashSet<_> = instances(&graph, "reviewer").into_iter().collect();
    assert!(authors.is_disjoint(&reviewers));
    // Jane Smith twice, Ada; Carol and Bob
    assert_eq!(authors.len() + reviewers.len(), 5);
}

#[test]
fn test_unknown_author_aborts_without_output() {
    let fixture = Fixture::standard().with(
        &catalog::AFFILIATION_MEMBERSHIP,
        "Ada Lovelace,MIT\nNobody,ACME\n",
    );

    let err = fixture.generator().generate().unwrap_err();
    assert!(matches!(err, ScholarError::UnresolvedMembership { ref key, .. } if key == "Nobody"));
    assert!(!fixture.output_dir().exists());
}

// =============================================================================
// Joins and anomalies
// =============================================================================

#[test]
fn test_authorship_with_unknown_paper_is_dropped() {
    let (graph, report) = Fixture::standard().build();

    assert!(graph.triples().all(|t| !t.to_ntriples().contains("P404")));

    let misses: Vec<_> = report
        .anomalies
        .iter()
        .filter(|a| a.kind == AnomalyKind::JoinMiss)
        .collect();
    assert_eq!(misses.len(), 1);
    assert_eq!(misses[0].table, "authorship");
    assert_eq!(misses[0].row, 3);
    assert_eq!(misses[0].value.as_deref(), Some("P404"));
}

#[test]
fn test_review_of_unknown_paper_counts_as_one_dropped_row() {
    let (graph, report) = Fixture::standard()
        .with(
            &catalog::REVIEW,
            "P1,Carol,Looks good,true\n\
             P2,Bob,Needs work,false\n\
             P9,Carol,Lost,true\n",
        )
        .build();

    let review_misses = report
        .anomalies
        .iter()
        .filter(|a| a.table == "review" && a.row == 2)
        .count();
    assert!(review_misses > 1);
    // The P404 authorship row and the P9 review row
    assert_eq!(report.dropped_rows(), 2);
    assert_eq!(instances(&graph, "review").len(), 2);
}

#[test]
fn test_every_edge_endpoint_is_a_typed_node() {
    let (graph, _) = Fixture::standard().build();

    let typed: HashSet<&str> = graph
        .triples()
        .filter(|t| t.predicate == RDF_TYPE)
        .map(|t| t.subject.as_str())
        .collect();

    for t in graph.triples().filter(|t| t.predicate != RDF_TYPE) {
        if let Some(object) = t.object.as_iri() {
            assert!(typed.contains(t.subject.as_str()), "untyped subject {}", t.subject);
            assert!(typed.contains(object), "untyped object {}", object);
        }
    }
}

#[test]
fn test_edge_counts() {
    let (_, report) = Fixture::standard().build();

    let expected = [
        ("writes", 2),
        ("is_corresponding_author", 2),
        ("writes_r", 2),
        ("about", 2),
        ("belongs_to_a", 2),
        ("relates_to", 2),
        ("cites", 2),
        ("published_in_v", 1),
        ("published_in_e", 2),
        ("belongs_to_j", 1),
        ("belongs_to_c", 1),
        ("c_in", 1),
        ("j_in", 1),
    ];
    for (predicate, count) in expected {
        assert_eq!(report.edges[predicate], count, "{}", predicate);
    }
}

#[test]
fn test_missing_values_produce_no_statements() {
    let (graph, _) = Fixture::standard().build();

    let p2 = iri("paper_P2");
    let p2_predicates: Vec<_> = graph
        .triples()
        .filter(|t| t.subject == p2)
        .map(|t| t.predicate.as_str())
        .collect();
    assert!(p2_predicates.contains(&iri("name_paper").as_str()));
    assert!(!p2_predicates.contains(&iri("DOI").as_str()));
    assert!(!p2_predicates.contains(&iri("pages").as_str()));

    assert!(graph.triples().all(|t| match &t.object {
        Term::Literal { lexical, .. } => !lexical.is_empty(),
        Term::Iri { .. } => true,
    }));
}

#[test]
fn test_literals_are_typed() {
    let (graph, _) = Fixture::standard().build();

    let pages: Vec<_> = graph
        .with_predicate(&iri("pages"))
        .map(|t| t.object.to_ntriples())
        .collect();
    assert!(pages.contains(&"\"7\"^^<http://www.w3.org/2001/XMLSchema#integer>".to_string()));

    let approves: Vec<_> = graph
        .with_predicate(&iri("approves"))
        .map(|t| t.object.to_ntriples())
        .collect();
    assert!(approves.contains(&"\"true\"^^<http://www.w3.org/2001/XMLSchema#boolean>".to_string()));
}

#[test]
fn test_unkeyed_node_row_is_reported() {
    let fixture = Fixture::standard().with(&catalog::KEYWORD, "graphs\nNA\nrdf\n");
    let (_, report) = fixture.build();

    let missing: Vec<_> = report
        .anomalies
        .iter()
        .filter(|a| a.kind == AnomalyKind::MissingKey)
        .collect();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].table, "keyword");
}

// =============================================================================
// Output
// =============================================================================

#[test]
fn test_generate_writes_both_graphs() {
    let fixture = Fixture::standard();
    let report = fixture.generator().generate().expect("Generate failed");

    let abox = fs::read_to_string(fixture.output_dir().join("ABOX.ttl")).unwrap();
    let tbox = fs::read_to_string(fixture.output_dir().join("TBOX.ttl")).unwrap();

    assert!(abox.contains(":author0_Jane_Smith a :author"));
    assert!(tbox.contains(":reviewer a rdfs:Class"));
    assert_eq!(report.sources.len(), ALL_TABLES.len());
    assert!(report.tbox_statements.unwrap() > 0);
}

#[test]
fn test_output_is_byte_identical_across_runs() {
    let fixture = Fixture::standard();
    let first_dir = fixture.dir.path().join("first");
    let second_dir = fixture.dir.path().join("second");

    for out in [&first_dir, &second_dir] {
        Generator::with_config(GeneratorConfig {
            output_dir: out.clone(),
            ..fixture.config()
        })
        .generate()
        .expect("Generate failed");
    }

    for file in ["ABOX.ttl", "TBOX.ttl"] {
        let first = fs::read(first_dir.join(file)).unwrap();
        let second = fs::read(second_dir.join(file)).unwrap();
        assert_eq!(first, second, "{} differs between runs", file);
    }
}

#[test]
fn test_ntriples_output() {
    let fixture = Fixture::standard();
    let generator = Generator::with_config(GeneratorConfig {
        format: GraphFormat::NTriples,
        ..fixture.config()
    });
    let report = generator.generate_abox().expect("Generate failed");

    let abox = fs::read_to_string(fixture.output_dir().join("ABOX.nt")).unwrap();
    assert_eq!(abox.lines().count(), report.abox_statements);
    assert!(abox.lines().all(|l| l.starts_with('<') && l.ends_with(" .")));
}

#[test]
fn test_missing_table_fails_before_output() {
    let fixture = Fixture::standard();
    fs::remove_file(catalog::CITATIONS.resolve(&fixture.data_dir())).unwrap();

    let err = fixture.generator().generate().unwrap_err();
    assert!(matches!(err, ScholarError::Io { .. }));
    assert!(!fixture.output_dir().exists());
}

#[test]
fn test_check_writes_nothing() {
    let fixture = Fixture::standard();
    let report = fixture.generator().check().expect("Check failed");

    assert!(report.abox_statements > 0);
    assert!(!fixture.output_dir().exists());
}

#[test]
fn test_report_roundtrip() {
    let fixture = Fixture::standard();
    let report = fixture.generator().check().expect("Check failed");

    let path = fixture.dir.path().join("report.json");
    report.save(&path).unwrap();
    let loaded = RunReport::load(&path).unwrap();

    assert_eq!(loaded.anomalies, report.anomalies);
    assert_eq!(loaded.edges, report.edges);
}
