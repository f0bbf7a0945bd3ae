//! Learning corpus entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::forecast::ForecastBias;

/// One entry of the exported learning corpus — the accumulated history an
/// external adaptive-parameter system trains on.
///
/// Corpus exports have grown fields over time; unknown fields are ignored
/// and the optional ones default so old files keep loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusEntry {
    pub date: NaiveDate,
    #[serde(alias = "forecast_bias")]
    pub bias: ForecastBias,
    #[serde(default)]
    pub hit: Option<bool>,
    #[serde(default)]
    pub price_change_pct: Option<f64>,
    #[serde(default)]
    pub level_breach: Option<bool>,
}
