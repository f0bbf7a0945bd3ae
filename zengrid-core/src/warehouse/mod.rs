//! Warehouse access — trait, structured errors, and the fixed read queries.
//!
//! The `Warehouse` trait abstracts over the cloud warehouse so the refresh
//! pipeline can be driven by the real Snowflake client, or by an in-test
//! stand-in. A client is constructed at the start of a refresh pass and
//! dropped at the end; nothing is cached between passes.

pub mod config;
pub mod queries;
pub mod snowflake;

use thiserror::Error;

pub use config::{ConfigError, WarehouseConfig};
pub use queries::{
    fetch_forecast_history, fetch_forecast_summaries, fetch_market_history, FORECAST_HISTORY_SQL,
    FORECAST_SUMMARY_SQL, MARKET_HISTORY_SQL,
};
pub use snowflake::SnowflakeClient;

/// Structured error types for warehouse operations.
///
/// These are designed to be displayable in both CLI and TUI contexts; the
/// dashboard surfaces them as section-level failure messages, never panics.
#[derive(Debug, Error)]
pub enum WarehouseError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("query failed: {0}")]
    QueryFailed(String),

    #[error("response format changed: {0}")]
    ResponseFormat(String),

    #[error("warehouse session is closed")]
    SessionClosed,
}

/// A raw query result: column names plus rows of nullable string cells,
/// exactly as the warehouse wire format delivers them.
#[derive(Debug, Clone)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl QueryResult {
    /// Index of a column by case-insensitive name.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
    }

    /// Cell value at (row, column index), treating absent cells as NULL.
    pub fn cell<'a>(&'a self, row: &'a [Option<String>], idx: usize) -> Option<&'a str> {
        row.get(idx).and_then(|v| v.as_deref())
    }
}

/// Read-only access to the warehouse.
pub trait Warehouse {
    /// Human-readable name of this warehouse backend.
    fn name(&self) -> &str;

    /// Execute one read-only statement and return the raw result.
    fn query(&self, sql: &str) -> Result<QueryResult, WarehouseError>;

    /// Whether the session is currently usable.
    fn is_available(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_lookup_is_case_insensitive() {
        let result = QueryResult {
            columns: vec!["DATE".into(), "SYMBOL".into()],
            rows: vec![],
        };
        assert_eq!(result.column("date"), Some(0));
        assert_eq!(result.column("Symbol"), Some(1));
        assert_eq!(result.column("HIT"), None);
    }

    #[test]
    fn cell_treats_short_rows_as_null() {
        let result = QueryResult {
            columns: vec!["A".into(), "B".into()],
            rows: vec![],
        };
        let row = vec![Some("x".to_string())];
        assert_eq!(result.cell(&row, 0), Some("x"));
        assert_eq!(result.cell(&row, 1), None);
    }
}
