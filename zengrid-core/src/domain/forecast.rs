//! Forecast postmortem and summary records.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Directional bias issued by the external forecasting system.
///
/// Unknown labels are preserved rather than rejected — the warehouse has
/// grown new categories before and the dashboard should keep rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ForecastBias {
    Bullish,
    Bearish,
    Neutral,
    Other(String),
}

impl ForecastBias {
    /// Parse a bias label case-insensitively.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "bullish" => ForecastBias::Bullish,
            "bearish" => ForecastBias::Bearish,
            "neutral" => ForecastBias::Neutral,
            _ => ForecastBias::Other(label.trim().to_string()),
        }
    }

    /// Display label, lowercase like the warehouse stores it.
    pub fn label(&self) -> &str {
        match self {
            ForecastBias::Bullish => "bullish",
            ForecastBias::Bearish => "bearish",
            ForecastBias::Neutral => "neutral",
            ForecastBias::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for ForecastBias {
    fn from(s: String) -> Self {
        ForecastBias::parse(&s)
    }
}

impl From<ForecastBias> for String {
    fn from(b: ForecastBias) -> String {
        b.label().to_string()
    }
}

impl std::fmt::Display for ForecastBias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the forecast postmortem table: what was predicted, what
/// happened, and whether the bias matched the outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub date: NaiveDate,
    pub symbol: String,
    pub bias: ForecastBias,
    pub actual_close: Option<f64>,
    pub hit: bool,
    pub loaded_at: Option<NaiveDateTime>,
}

/// One row of the forecast summary table: the levels and pricing context
/// published alongside a forecast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastSummaryRecord {
    pub date: NaiveDate,
    pub symbol: String,
    pub bias: ForecastBias,
    pub support_levels: Vec<f64>,
    pub resistance_levels: Vec<f64>,
    pub atm_straddle: Option<f64>,
    pub notes: String,
}

/// Parse a hit/miss flag as the warehouse and export jobs write it.
///
/// Accepts true/false, t/f, yes/no, y/n, and 1/0 in any case. Returns None
/// for null, empty, or unrecognized values; the aggregation layer counts
/// those as misses.
pub fn parse_hit(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bias_parse_case_insensitive() {
        assert_eq!(ForecastBias::parse("Bullish"), ForecastBias::Bullish);
        assert_eq!(ForecastBias::parse("BEARISH"), ForecastBias::Bearish);
        assert_eq!(ForecastBias::parse(" neutral "), ForecastBias::Neutral);
    }

    #[test]
    fn bias_parse_preserves_unknown_labels() {
        let b = ForecastBias::parse("choppy");
        assert_eq!(b, ForecastBias::Other("choppy".into()));
        assert_eq!(b.label(), "choppy");
    }

    #[test]
    fn bias_serde_roundtrip() {
        let json = serde_json::to_string(&ForecastBias::Bullish).unwrap();
        assert_eq!(json, "\"bullish\"");
        let back: ForecastBias = serde_json::from_str("\"BULLISH\"").unwrap();
        assert_eq!(back, ForecastBias::Bullish);
    }

    #[test]
    fn hit_parse_accepted_spellings() {
        for v in ["true", "TRUE", "t", "Yes", "y", "1"] {
            assert_eq!(parse_hit(v), Some(true), "{v}");
        }
        for v in ["false", "FALSE", "f", "No", "n", "0"] {
            assert_eq!(parse_hit(v), Some(false), "{v}");
        }
    }

    #[test]
    fn hit_parse_rejects_garbage_and_null() {
        assert_eq!(parse_hit(""), None);
        assert_eq!(parse_hit("NULL"), None);
        assert_eq!(parse_hit("maybe"), None);
    }
}
