//! scholarkg: bibliographic knowledge-graph generator.
//!
//! Turns a fixed set of CSV tables (papers, authors, reviews, venues,
//! affiliations, keywords, compilations, communities and the relationships
//! between them) into two RDF graphs: a schema graph (TBOX) and an instance
//! graph (ABOX).
//!
//! # Core Principles
//!
//! - **Collision-safe identity**: every row gets its own identifier, even
//!   when natural keys repeat
//! - **Closed world**: edges only ever connect entities that were minted;
//!   rows that do not join are dropped and reported
//! - **Deterministic**: identical inputs give byte-identical outputs
//! - **All-or-nothing**: output files are only written after every phase
//!   has succeeded
//!
//! # Example
//!
//! ```no_run
//! use scholarkg::{Generator, GeneratorConfig};
//!
//! let generator = Generator::with_config(GeneratorConfig {
//!     data_dir: "data".into(),
//!     ..Default::default()
//! });
//! let report = generator.generate().unwrap();
//!
//! println!("Statements: {}", report.abox_statements);
//! println!("Anomalies: {}", report.anomalies.len());
//! ```

pub mod assertion;
pub mod error;
pub mod graph;
pub mod identity;
pub mod input;
pub mod pipeline;
pub mod report;
pub mod vocab;

mod generator;

pub use crate::generator::{Generator, GeneratorConfig};
pub use error::{Result, ScholarError};
pub use graph::{Graph, GraphFormat, Namespace, Triple};
pub use identity::{Identifier, IdentifierMinter, IdentityIndex, clean_key};
pub use input::{DataTable, SourceMetadata};
pub use report::{Anomaly, AnomalyKind, RunReport};
pub use vocab::{DatatypeProperty, EntityClass, ObjectProperty};
