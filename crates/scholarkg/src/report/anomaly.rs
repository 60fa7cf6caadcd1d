//! Row-level data-quality anomalies found during a run.

use serde::{Deserialize, Serialize};

/// Kind of anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    /// A node row without its identifying key.
    MissingKey,
    /// An edge row whose key matched no minted identifier.
    JoinMiss,
    /// A flag column that does not read as a boolean.
    InvalidFlag,
    /// A literal that does not fit its property's datatype.
    InvalidLiteral,
}

impl AnomalyKind {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            AnomalyKind::MissingKey => "Missing key",
            AnomalyKind::JoinMiss => "Join miss",
            AnomalyKind::InvalidFlag => "Invalid flag",
            AnomalyKind::InvalidLiteral => "Invalid literal",
        }
    }

    /// Whether the anomaly cost a whole row (as opposed to one statement).
    pub fn drops_row(&self) -> bool {
        !matches!(self, AnomalyKind::InvalidLiteral)
    }
}

/// One anomaly, tied to a source row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub kind: AnomalyKind,
    /// Logical table name.
    pub table: String,
    /// Row index (0-based, excluding header).
    pub row: usize,
    /// Column involved.
    pub column: String,
    /// Predicate whose statement was lost, for edge anomalies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicate: Option<String>,
    /// Offending value, if there was one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub message: String,
}

impl Anomaly {
    pub fn new(
        kind: AnomalyKind,
        table: impl Into<String>,
        row: usize,
        column: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            table: table.into(),
            row,
            column: column.into(),
            predicate: None,
            value: None,
            message: message.into(),
        }
    }

    pub fn missing_key(table: &str, row: usize, column: &str) -> Self {
        Self::new(
            AnomalyKind::MissingKey,
            table,
            row,
            column,
            format!("row has no '{}' value and was skipped", column),
        )
    }

    pub fn join_miss(table: &str, row: usize, column: &str, value: Option<&str>) -> Self {
        let message = match value {
            Some(v) => format!("'{}' = '{}' matches no minted entity; row dropped", column, v),
            None => format!("'{}' is missing; row dropped", column),
        };
        Self::new(AnomalyKind::JoinMiss, table, row, column, message)
            .with_value(value.map(str::to_string))
    }

    pub fn with_value(mut self, value: Option<String>) -> Self {
        self.value = value;
        self
    }

    pub fn with_predicate(mut self, predicate: impl Into<String>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }
}
