//! Backtest results CSV reader.

use std::path::Path;

use chrono::NaiveDate;

use serde::{Deserialize, Serialize};

use super::ArtifactError;
use crate::domain::{parse_hit, BacktestRecord, ForecastBias};

/// A parsed backtest export.
///
/// `has_hit_column` is false for legacy exports that predate the hit flag;
/// the accuracy sections are skipped for those files rather than failing
/// the refresh pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestFile {
    pub records: Vec<BacktestRecord>,
    pub has_hit_column: bool,
}

/// Read a backtest results CSV.
///
/// Header-driven: extra diagnostic columns are ignored, the bias column may
/// be named `forecast_bias` or `bias`, and rows with an unreadable date are
/// dropped. Only a missing date or bias column is fatal.
pub fn read_backtest_csv(path: &Path) -> Result<BacktestFile, ArtifactError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| ArtifactError::Csv {
        path: path.display().to_string(),
        source,
    })?;

    let headers = reader
        .headers()
        .map_err(|source| ArtifactError::Csv {
            path: path.display().to_string(),
            source,
        })?
        .clone();

    let find = |names: &[&str]| {
        headers
            .iter()
            .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
    };

    let date_idx = find(&["date"]).ok_or(ArtifactError::MissingColumn {
        path: path.display().to_string(),
        column: "date",
    })?;
    let bias_idx = find(&["forecast_bias", "bias"]).ok_or(ArtifactError::MissingColumn {
        path: path.display().to_string(),
        column: "forecast_bias",
    })?;
    let hit_idx = find(&["forecast_hit", "hit"]);

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|source| ArtifactError::Csv {
            path: path.display().to_string(),
            source,
        })?;
        let Some(date) = row
            .get(date_idx)
            .and_then(|v| NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d").ok())
        else {
            continue;
        };
        let Some(bias_raw) = row.get(bias_idx).map(str::trim).filter(|v| !v.is_empty()) else {
            continue;
        };
        let hit = hit_idx
            .and_then(|i| row.get(i))
            .and_then(parse_hit);

        records.push(BacktestRecord {
            date,
            bias: ForecastBias::parse(bias_raw),
            hit,
        });
    }

    Ok(BacktestFile {
        records,
        has_hit_column: hit_idx.is_some(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ForecastBias;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_standard_export() {
        let file = write_csv(
            "date,forecast_bias,forecast_hit,pnl,notes\n\
             2025-07-30,bullish,TRUE,1.2,ok\n\
             2025-07-31,bearish,FALSE,-0.4,\n\
             2025-08-01,neutral,TRUE,0.1,gap day\n",
        );
        let parsed = read_backtest_csv(file.path()).unwrap();
        assert!(parsed.has_hit_column);
        assert_eq!(parsed.records.len(), 3);
        assert_eq!(parsed.records[0].bias, ForecastBias::Bullish);
        assert_eq!(parsed.records[0].hit, Some(true));
        assert_eq!(parsed.records[1].hit, Some(false));
    }

    #[test]
    fn legacy_file_without_hit_column() {
        let file = write_csv(
            "date,bias\n\
             2025-07-30,bullish\n\
             2025-07-31,bearish\n",
        );
        let parsed = read_backtest_csv(file.path()).unwrap();
        assert!(!parsed.has_hit_column);
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].hit, None);
    }

    #[test]
    fn null_hit_values_stay_none() {
        let file = write_csv(
            "date,forecast_bias,forecast_hit\n\
             2025-07-30,bullish,\n\
             2025-07-31,bearish,NULL\n\
             2025-08-01,neutral,1\n",
        );
        let parsed = read_backtest_csv(file.path()).unwrap();
        assert_eq!(parsed.records[0].hit, None);
        assert_eq!(parsed.records[1].hit, None);
        assert_eq!(parsed.records[2].hit, Some(true));
        // The null-as-miss policy is applied at aggregation time.
        assert!(!parsed.records[0].hit_or_miss());
    }

    #[test]
    fn unreadable_dates_are_dropped() {
        let file = write_csv(
            "date,forecast_bias,forecast_hit\n\
             not-a-date,bullish,TRUE\n\
             2025-08-01,bullish,TRUE\n",
        );
        let parsed = read_backtest_csv(file.path()).unwrap();
        assert_eq!(parsed.records.len(), 1);
    }

    #[test]
    fn missing_bias_column_is_fatal() {
        let file = write_csv("date,forecast_hit\n2025-08-01,TRUE\n");
        let err = read_backtest_csv(file.path()).unwrap_err();
        assert!(err.to_string().contains("forecast_bias"));
    }
}
