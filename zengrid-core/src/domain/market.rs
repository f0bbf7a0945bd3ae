//! Daily market data records.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The fixed instrument set tracked by the daily market data table.
pub const INSTRUMENTS: [&str; 4] = ["SPX", "NDX", "RUT", "VIX"];

/// One row of daily market data: close prices for the fixed instrument set.
///
/// A close is None when the warehouse row held NULL for that instrument
/// (holiday, late load, or a partial trading day).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketRecord {
    pub date: NaiveDate,
    pub closes: BTreeMap<String, Option<f64>>,
}

impl MarketRecord {
    /// Close for one instrument, if the row carried it.
    pub fn close(&self, instrument: &str) -> Option<f64> {
        self.closes.get(instrument).copied().flatten()
    }
}
