//! Triples, the run's triple accumulator, and serialization.

mod accumulator;
pub mod namespace;
mod term;
mod writer;

pub use accumulator::Graph;
pub use namespace::Namespace;
pub use term::{Term, Triple};
pub use writer::{GraphFormat, NTriples, StagedGraph, Turtle, write_graph, write_graphs};
