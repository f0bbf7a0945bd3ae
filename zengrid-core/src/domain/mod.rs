//! Domain record types shared by the warehouse and artifact loaders.
//!
//! Every type here is read-only from the dashboard's point of view: records
//! are produced by the external forecasting system or by the export jobs,
//! loaded fresh on each refresh pass, and never mutated or written back.

pub mod backtest;
pub mod corpus;
pub mod forecast;
pub mod market;
pub mod news;

pub use backtest::BacktestRecord;
pub use corpus::CorpusEntry;
pub use forecast::{parse_hit, ForecastBias, ForecastRecord, ForecastSummaryRecord};
pub use market::{MarketRecord, INSTRUMENTS};
pub use news::{FeedStatus, NewsAnalysis, NewsFeedResult};
