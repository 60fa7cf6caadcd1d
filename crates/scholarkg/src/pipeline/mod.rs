//! The instance-graph run: LOAD → NODES → EDGES.
//!
//! Each phase consumes the previous one, so edges cannot be asserted
//! before every table they join against has been minted, and a finished
//! run cannot be re-entered. The graph and report travel with the run and
//! are only handed out at the end.

mod entities;
mod load;
mod relations;

use std::path::Path;

use tracing::info;

pub use entities::Entities;
pub use load::SourceTables;

use crate::assertion::Asserter;
use crate::error::Result;
use crate::graph::{Graph, Namespace};
use crate::input::Parser;
use crate::report::RunReport;

/// Tables are loaded; nothing is minted yet.
pub struct Loaded {
    tables: SourceTables,
}

/// Every entity is minted and its node statements asserted.
pub struct Identified {
    tables: SourceTables,
    entities: Entities,
}

/// Edges are asserted; the graph is complete.
pub struct Asserted {
    entities: Entities,
}

/// One run of the instance graph engine, in phase `S`.
pub struct Pipeline<S> {
    ns: Namespace,
    graph: Graph,
    report: RunReport,
    state: S,
}

impl Pipeline<Loaded> {
    /// LOAD every catalogued table from `data_dir`.
    pub fn load(ns: Namespace, parser: &Parser, data_dir: &Path) -> Result<Self> {
        info!(data_dir = %data_dir.display(), "loading sources");
        let tables = SourceTables::load(parser, data_dir)?;
        Ok(Self::from_tables(ns, tables))
    }

    /// Start a run from tables that are already in memory.
    pub fn from_tables(ns: Namespace, tables: SourceTables) -> Self {
        let mut report = RunReport::new(ns.base());
        for source in tables.sources() {
            report.add_source(source.clone());
        }

        Self {
            ns,
            graph: Graph::new(),
            report,
            state: Loaded { tables },
        }
    }

    /// NODES: settle membership, mint every identity and assert nodes.
    pub fn assert_nodes(mut self) -> Pipeline<Identified> {
        let Loaded { tables } = self.state;

        let mut anomalies = Vec::new();
        let entities = Entities::mint(&tables, &mut anomalies);
        self.report.extend(anomalies);

        let mut asserter = Asserter::new(&mut self.graph, &self.ns);
        entities.assert_nodes(&tables, &mut asserter, &mut self.report);
        self.report.extend(asserter.take_anomalies());

        Pipeline {
            ns: self.ns,
            graph: self.graph,
            report: self.report,
            state: Identified { tables, entities },
        }
    }
}

impl Pipeline<Identified> {
    pub fn entities(&self) -> &Entities {
        &self.state.entities
    }

    /// EDGES: join every edge table against the minted identities.
    pub fn assert_edges(mut self) -> Result<Pipeline<Asserted>> {
        let Identified { tables, entities } = self.state;

        let mut asserter = Asserter::new(&mut self.graph, &self.ns);
        relations::assert_relations(&tables, &entities, &mut asserter, &mut self.report)?;
        self.report.extend(asserter.take_anomalies());

        self.report.abox_statements = self.graph.len();
        self.report.log_anomalies();
        info!(
            statements = self.report.abox_statements,
            anomalies = self.report.anomalies.len(),
            "instance graph complete"
        );

        Ok(Pipeline {
            ns: self.ns,
            graph: self.graph,
            report: self.report,
            state: Asserted { entities },
        })
    }
}

impl Pipeline<Asserted> {
    pub fn entities(&self) -> &Entities {
        &self.state.entities
    }

    /// Hand out the finished graph and its report.
    pub fn finish(self) -> (Graph, RunReport) {
        (self.graph, self.report)
    }
}

impl<S> Pipeline<S> {
    pub fn namespace(&self) -> &Namespace {
        &self.ns
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn report(&self) -> &RunReport {
        &self.report
    }
}
