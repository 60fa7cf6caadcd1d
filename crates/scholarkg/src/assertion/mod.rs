//! Node and edge assertion into the run's graph.
//!
//! An [`Asserter`] borrows the run's [`Graph`] exclusively and collects the
//! row-level anomalies it runs into. Node assertion only needs minted
//! identities; edge assertion resolves both endpoints of every row through
//! [`Endpoint`]s and drops rows where either side is missing.

mod edges;
mod nodes;

pub use edges::{Endpoint, EdgeOutcome};
pub use nodes::NodeOutcome;

use crate::graph::{Graph, Namespace};
use crate::report::Anomaly;

/// Writes node and edge statements for one run.
pub struct Asserter<'g> {
    graph: &'g mut Graph,
    ns: &'g Namespace,
    anomalies: Vec<Anomaly>,
}

impl<'g> Asserter<'g> {
    pub fn new(graph: &'g mut Graph, ns: &'g Namespace) -> Self {
        Self {
            graph,
            ns,
            anomalies: Vec::new(),
        }
    }

    pub fn namespace(&self) -> &Namespace {
        self.ns
    }

    pub fn graph(&self) -> &Graph {
        self.graph
    }

    /// Record an anomaly found outside node/edge assertion proper.
    pub fn record(&mut self, anomaly: Anomaly) {
        self.anomalies.push(anomaly);
    }

    pub fn anomalies(&self) -> &[Anomaly] {
        &self.anomalies
    }

    /// Hand the collected anomalies over, leaving none behind.
    pub fn take_anomalies(&mut self) -> Vec<Anomaly> {
        std::mem::take(&mut self.anomalies)
    }
}
