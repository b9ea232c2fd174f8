//! Schema application results and their JSON envelopes.

use serde::{Deserialize, Serialize};

/// Tables whose row counts are reported after a schema run.
pub const STAT_TABLES: [&str; 2] = ["categories", "users"];

/// Message returned alongside a successful apply.
pub const APPLY_SUCCESS_MESSAGE: &str = "Schema applied successfully!";

/// Row counts of the seed tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaStats {
    pub categories: i64,
    pub users: i64,
}

/// Outcome of one successful schema run. Only produced when the whole
/// sequence succeeds; there is no partial report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyReport {
    /// Tables in the `public` schema, ascending by name.
    pub tables: Vec<String>,
    pub stats: SchemaStats,
}

impl ApplyReport {
    /// Build a report, normalizing the table order.
    pub fn new(mut tables: Vec<String>, stats: SchemaStats) -> Self {
        tables.sort();
        Self { tables, stats }
    }
}

/// `POST /api/apply-schema` success body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplySchemaResponse {
    pub success: bool,
    pub message: String,
    pub tables: Vec<String>,
    pub stats: SchemaStats,
}

impl From<ApplyReport> for ApplySchemaResponse {
    fn from(report: ApplyReport) -> Self {
        Self {
            success: true,
            message: APPLY_SUCCESS_MESSAGE.to_string(),
            tables: report.tables,
            stats: report.stats,
        }
    }
}

/// `GET /api/db-status` body. Failures are reported as data, never as an HTTP error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbStatus {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tables: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DbStatus {
    pub fn connected(tables: Vec<String>) -> Self {
        Self {
            connected: true,
            tables: Some(tables),
            error: None,
        }
    }

    pub fn disconnected(error: impl Into<String>) -> Self {
        Self {
            connected: false,
            tables: None,
            error: Some(error.into()),
        }
    }
}
