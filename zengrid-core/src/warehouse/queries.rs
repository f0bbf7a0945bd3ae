//! The fixed read-only queries and their row mappers.
//!
//! Queries are static: no user-supplied filters, literal row limits, newest
//! rows first. Mappers look columns up by name so a reordered SELECT or an
//! extra warehouse column cannot silently shift values.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};

use super::{QueryResult, Warehouse, WarehouseError};
use crate::domain::{
    parse_hit, ForecastBias, ForecastRecord, ForecastSummaryRecord, MarketRecord, INSTRUMENTS,
};

/// Forecast postmortem: predicted bias vs. realized outcome, newest first.
pub const FORECAST_HISTORY_SQL: &str = "SELECT DATE, SYMBOL, FORECAST_BIAS, ACTUAL_CLOSE, HIT, \
     LOAD_TIMESTAMP FROM FORECAST_POSTMORTEM ORDER BY DATE DESC LIMIT 100";

/// Daily closes for the fixed instrument set, newest first.
pub const MARKET_HISTORY_SQL: &str = "SELECT DATE, SPX_CLOSE, NDX_CLOSE, RUT_CLOSE, VIX_CLOSE \
     FROM DAILY_MARKET_DATA ORDER BY DATE DESC LIMIT 100";

/// Published forecast summaries (levels, straddle, notes), newest first.
pub const FORECAST_SUMMARY_SQL: &str = "SELECT DATE, SYMBOL, FORECAST_BIAS, SUPPORT_LEVELS, \
     RESISTANCE_LEVELS, ATM_STRADDLE, NOTES FROM FORECAST_SUMMARY ORDER BY DATE DESC LIMIT 50";

/// Fetch the forecast postmortem rows.
pub fn fetch_forecast_history(
    wh: &dyn Warehouse,
) -> Result<Vec<ForecastRecord>, WarehouseError> {
    let result = wh.query(FORECAST_HISTORY_SQL)?;
    let date_idx = require_column(&result, "DATE")?;
    let symbol_idx = require_column(&result, "SYMBOL")?;
    let bias_idx = require_column(&result, "FORECAST_BIAS")?;
    let hit_idx = require_column(&result, "HIT")?;
    let close_idx = result.column("ACTUAL_CLOSE");
    let loaded_idx = result.column("LOAD_TIMESTAMP");

    let mut records = Vec::with_capacity(result.rows.len());
    for row in &result.rows {
        // Rows with an unreadable date or symbol are dropped rather than
        // failing the whole section.
        let Some(date) = result.cell(row, date_idx).and_then(parse_date) else {
            continue;
        };
        let Some(symbol) = result.cell(row, symbol_idx) else {
            continue;
        };
        let bias = result
            .cell(row, bias_idx)
            .map(ForecastBias::parse)
            .unwrap_or(ForecastBias::Neutral);
        // NULL or non-boolean HIT counts as a miss.
        let hit = result
            .cell(row, hit_idx)
            .and_then(parse_hit)
            .unwrap_or(false);
        let actual_close = close_idx
            .and_then(|i| result.cell(row, i))
            .and_then(parse_f64);
        let loaded_at = loaded_idx
            .and_then(|i| result.cell(row, i))
            .and_then(parse_timestamp);

        records.push(ForecastRecord {
            date,
            symbol: symbol.to_string(),
            bias,
            actual_close,
            hit,
            loaded_at,
        });
    }
    Ok(records)
}

/// Fetch the daily market data rows.
pub fn fetch_market_history(wh: &dyn Warehouse) -> Result<Vec<MarketRecord>, WarehouseError> {
    let result = wh.query(MARKET_HISTORY_SQL)?;
    let date_idx = require_column(&result, "DATE")?;

    let close_columns: Vec<(&str, Option<usize>)> = INSTRUMENTS
        .iter()
        .map(|inst| (*inst, result.column(&format!("{inst}_CLOSE"))))
        .collect();

    let mut records = Vec::with_capacity(result.rows.len());
    for row in &result.rows {
        let Some(date) = result.cell(row, date_idx).and_then(parse_date) else {
            continue;
        };
        let mut closes = BTreeMap::new();
        for (inst, idx) in &close_columns {
            let value = idx.and_then(|i| result.cell(row, i)).and_then(parse_f64);
            closes.insert(inst.to_string(), value);
        }
        records.push(MarketRecord { date, closes });
    }
    Ok(records)
}

/// Fetch the forecast summary rows.
pub fn fetch_forecast_summaries(
    wh: &dyn Warehouse,
) -> Result<Vec<ForecastSummaryRecord>, WarehouseError> {
    let result = wh.query(FORECAST_SUMMARY_SQL)?;
    let date_idx = require_column(&result, "DATE")?;
    let symbol_idx = require_column(&result, "SYMBOL")?;
    let bias_idx = require_column(&result, "FORECAST_BIAS")?;
    let support_idx = result.column("SUPPORT_LEVELS");
    let resistance_idx = result.column("RESISTANCE_LEVELS");
    let straddle_idx = result.column("ATM_STRADDLE");
    let notes_idx = result.column("NOTES");

    let mut records = Vec::with_capacity(result.rows.len());
    for row in &result.rows {
        let Some(date) = result.cell(row, date_idx).and_then(parse_date) else {
            continue;
        };
        let Some(symbol) = result.cell(row, symbol_idx) else {
            continue;
        };
        records.push(ForecastSummaryRecord {
            date,
            symbol: symbol.to_string(),
            bias: result
                .cell(row, bias_idx)
                .map(ForecastBias::parse)
                .unwrap_or(ForecastBias::Neutral),
            support_levels: support_idx
                .and_then(|i| result.cell(row, i))
                .map(parse_levels)
                .unwrap_or_default(),
            resistance_levels: resistance_idx
                .and_then(|i| result.cell(row, i))
                .map(parse_levels)
                .unwrap_or_default(),
            atm_straddle: straddle_idx
                .and_then(|i| result.cell(row, i))
                .and_then(parse_f64),
            notes: notes_idx
                .and_then(|i| result.cell(row, i))
                .unwrap_or("")
                .to_string(),
        });
    }
    Ok(records)
}

fn require_column(result: &QueryResult, name: &str) -> Result<usize, WarehouseError> {
    result
        .column(name)
        .ok_or_else(|| WarehouseError::ResponseFormat(format!("missing column {name}")))
}

/// Parse a DATE cell: ISO dates as written, or the wire format's
/// days-since-epoch integer.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    let days: i64 = trimmed.parse().ok()?;
    NaiveDate::from_ymd_opt(1970, 1, 1)?.checked_add_signed(chrono::Duration::days(days))
}

/// Parse a TIMESTAMP cell: ISO datetimes, or epoch seconds (fractional ok).
fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(ts);
        }
    }
    let secs: f64 = trimmed.parse().ok()?;
    chrono::DateTime::from_timestamp(secs as i64, 0).map(|dt| dt.naive_utc())
}

fn parse_f64(value: &str) -> Option<f64> {
    value.trim().parse().ok()
}

/// Parse a comma-separated level list ("5450.0, 5425.5") into numbers,
/// dropping fragments that do not parse.
fn parse_levels(value: &str) -> Vec<f64> {
    value
        .split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect()
}
