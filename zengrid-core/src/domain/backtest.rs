//! Historical backtest result records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::forecast::ForecastBias;

/// One row of an exported backtest results file.
///
/// The export job writes additional diagnostic columns that vary between
/// versions; only the three the dashboard aggregates over are kept. `hit`
/// is None when the source cell was null or unparseable — the aggregation
/// layer counts those as misses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestRecord {
    pub date: NaiveDate,
    pub bias: ForecastBias,
    pub hit: Option<bool>,
}

impl BacktestRecord {
    /// Hit flag with the null-as-miss policy applied.
    pub fn hit_or_miss(&self) -> bool {
        self.hit.unwrap_or(false)
    }
}
