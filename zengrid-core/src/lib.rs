//! ZenGrid Core — domain records, warehouse access, artifact resolution.
//!
//! This crate contains everything the dashboards need to get data:
//! - Domain types (forecast, market, summary, backtest, corpus, news records)
//! - The `Warehouse` trait with the fixed read-only queries and the
//!   Snowflake client implementation
//! - Secret configuration loading for the warehouse connection
//! - Latest-artifact resolution and the CSV/JSON artifact parsers
//!
//! No aggregation lives here; that is `zengrid-runner`'s job.

pub mod artifacts;
pub mod domain;
pub mod warehouse;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: data types that cross the TUI worker channel
    /// are Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::ForecastRecord>();
        require_sync::<domain::ForecastRecord>();
        require_send::<domain::ForecastBias>();
        require_sync::<domain::ForecastBias>();
        require_send::<domain::MarketRecord>();
        require_sync::<domain::MarketRecord>();
        require_send::<domain::ForecastSummaryRecord>();
        require_sync::<domain::ForecastSummaryRecord>();
        require_send::<domain::BacktestRecord>();
        require_sync::<domain::BacktestRecord>();
        require_send::<domain::CorpusEntry>();
        require_sync::<domain::CorpusEntry>();
        require_send::<domain::NewsFeedResult>();
        require_sync::<domain::NewsFeedResult>();

        require_send::<warehouse::WarehouseError>();
        require_sync::<warehouse::WarehouseError>();
        require_send::<warehouse::WarehouseConfig>();
        require_sync::<warehouse::WarehouseConfig>();
        require_send::<warehouse::QueryResult>();
        require_sync::<warehouse::QueryResult>();

        require_send::<artifacts::ArtifactKind>();
        require_sync::<artifacts::ArtifactKind>();
        require_send::<artifacts::ArtifactFile>();
        require_sync::<artifacts::ArtifactFile>();
        require_send::<artifacts::BacktestFile>();
        require_sync::<artifacts::BacktestFile>();
        require_send::<artifacts::NewsReport>();
        require_sync::<artifacts::NewsReport>();
    }
}
