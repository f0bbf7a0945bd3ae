//! Deterministic demo data.
//!
//! Generates a full set of dashboard sources so the TUI and CLI can run
//! without warehouse credentials or exported artifact files. Seeded from
//! BLAKE3 of a fixed label, so every run (and every test) sees the same
//! numbers. Data is anchored to a fixed reference date rather than the
//! clock for the same reason.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use zengrid_core::artifacts::{BacktestFile, NewsReport};
use zengrid_core::domain::{
    BacktestRecord, CorpusEntry, FeedStatus, ForecastBias, ForecastRecord, ForecastSummaryRecord,
    MarketRecord, NewsAnalysis, NewsFeedResult, INSTRUMENTS,
};

use crate::snapshot::{DashboardSources, LoadedArtifact, SourceState};

/// Reference "today" for the generated series.
const DEMO_ANCHOR: (i32, u32, u32) = (2025, 8, 1);

fn seeded_rng(label: &str) -> StdRng {
    StdRng::from_seed(*blake3::hash(label.as_bytes()).as_bytes())
}

fn anchor() -> NaiveDate {
    let (y, m, d) = DEMO_ANCHOR;
    NaiveDate::from_ymd_opt(y, m, d).expect("valid demo anchor date")
}

/// The trailing `n` weekdays ending at the anchor, ascending.
fn trading_days(n: usize) -> Vec<NaiveDate> {
    let mut days = Vec::with_capacity(n);
    let mut current = anchor();
    while days.len() < n {
        if !matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
            days.push(current);
        }
        current -= chrono::Duration::days(1);
    }
    days.reverse();
    days
}

fn random_bias(rng: &mut StdRng) -> ForecastBias {
    match rng.gen_range(0..3) {
        0 => ForecastBias::Bullish,
        1 => ForecastBias::Bearish,
        _ => ForecastBias::Neutral,
    }
}

/// Hit probability per bias; bullish calls land more often in the demo so
/// the breakdown panel shows a spread.
fn hit_probability(bias: &ForecastBias) -> f64 {
    match bias {
        ForecastBias::Bullish => 0.62,
        ForecastBias::Bearish => 0.55,
        _ => 0.48,
    }
}

fn demo_forecasts() -> Vec<ForecastRecord> {
    let mut rng = seeded_rng("zengrid-demo-forecasts");
    let days = trading_days(30);
    let mut records = Vec::new();
    let mut closes: BTreeMap<&str, f64> = BTreeMap::new();
    closes.insert("SPX", 5400.0);
    closes.insert("NDX", 19600.0);
    closes.insert("RUT", 2210.0);

    for day in &days {
        for symbol in ["SPX", "NDX", "RUT"] {
            let bias = random_bias(&mut rng);
            let hit = rng.gen_bool(hit_probability(&bias));
            let close = closes.get_mut(symbol).expect("seeded symbol");
            *close *= 1.0 + rng.gen_range(-0.012..0.012);
            records.push(ForecastRecord {
                date: *day,
                symbol: symbol.to_string(),
                bias,
                actual_close: Some((*close * 100.0).round() / 100.0),
                hit,
                loaded_at: day.and_hms_opt(21, 5, 0),
            });
        }
    }
    // Warehouse order: newest first.
    records.reverse();
    records
}

fn demo_market() -> Vec<MarketRecord> {
    let mut rng = seeded_rng("zengrid-demo-market");
    let days = trading_days(100);
    let mut levels: BTreeMap<&str, f64> = BTreeMap::new();
    levels.insert("SPX", 5250.0);
    levels.insert("NDX", 18900.0);
    levels.insert("RUT", 2150.0);
    levels.insert("VIX", 16.0);

    let mut records = Vec::new();
    for day in &days {
        let mut closes = BTreeMap::new();
        for inst in INSTRUMENTS {
            let level = levels.get_mut(inst).expect("seeded instrument");
            *level *= 1.0 + rng.gen_range(-0.015..0.015);
            // Late loads leave the occasional NULL close.
            let value = if rng.gen_bool(0.03) {
                None
            } else {
                Some((*level * 100.0).round() / 100.0)
            };
            closes.insert(inst.to_string(), value);
        }
        records.push(MarketRecord { date: *day, closes });
    }
    records.reverse();
    records
}

fn demo_summaries() -> Vec<ForecastSummaryRecord> {
    let mut rng = seeded_rng("zengrid-demo-summaries");
    let days = trading_days(25);
    let notes = [
        "watching the overnight gap",
        "straddle rich ahead of CPI",
        "levels unchanged from prior session",
        "breadth weak under the surface",
        "vol crush expected after the print",
    ];

    let mut records = Vec::new();
    for day in &days {
        for symbol in ["SPX", "NDX"] {
            let pivot: f64 = if symbol == "SPX" {
                rng.gen_range(5300.0..5600.0)
            } else {
                rng.gen_range(19000.0..20500.0)
            };
            records.push(ForecastSummaryRecord {
                date: *day,
                symbol: symbol.to_string(),
                bias: random_bias(&mut rng),
                support_levels: vec![
                    (pivot * 0.99 * 4.0).round() / 4.0,
                    (pivot * 0.985 * 4.0).round() / 4.0,
                ],
                resistance_levels: vec![
                    (pivot * 1.01 * 4.0).round() / 4.0,
                    (pivot * 1.015 * 4.0).round() / 4.0,
                ],
                atm_straddle: Some((rng.gen_range(40.0_f64..90.0) * 10.0).round() / 10.0),
                notes: notes[rng.gen_range(0..notes.len())].to_string(),
            });
        }
    }
    records.reverse();
    records
}

fn demo_backtest() -> LoadedArtifact<BacktestFile> {
    let mut rng = seeded_rng("zengrid-demo-backtest");
    let days = trading_days(120);
    let records = days
        .iter()
        .map(|day| {
            let bias = random_bias(&mut rng);
            // A few rows carry a null hit, as real exports do.
            let hit = if rng.gen_bool(0.04) {
                None
            } else {
                Some(rng.gen_bool(hit_probability(&bias)))
            };
            BacktestRecord {
                date: *day,
                bias,
                hit,
            }
        })
        .collect();

    LoadedArtifact {
        file_name: "historical_backtest_results_20250801_060000.csv".into(),
        data: BacktestFile {
            records,
            has_hit_column: true,
        },
    }
}

fn demo_corpus() -> LoadedArtifact<Vec<CorpusEntry>> {
    let mut rng = seeded_rng("zengrid-demo-corpus");
    let days = trading_days(60);
    let entries = days
        .iter()
        .map(|day| {
            let bias = random_bias(&mut rng);
            CorpusEntry {
                date: *day,
                hit: Some(rng.gen_bool(hit_probability(&bias))),
                bias,
                price_change_pct: Some((rng.gen_range(-2.0..2.0f64) * 100.0).round() / 100.0),
                level_breach: Some(rng.gen_bool(0.3)),
            }
        })
        .collect();

    LoadedArtifact {
        file_name: "learning_corpus_20250801_060000.json".into(),
        data: entries,
    }
}

fn demo_news() -> LoadedArtifact<NewsReport> {
    let mut rng = seeded_rng("zengrid-demo-news");
    let feeds = [
        ("macro-wire", true),
        ("fed-watch", true),
        ("earnings-desk", true),
        ("options-flow", true),
        ("global-briefs", true),
        ("sector-pulse", true),
        ("overnight-asia", false),
        ("smallcap-scan", false),
    ];
    let categories = ["fed", "earnings", "geopolitics", "energy", "tech"];

    let results = feeds
        .iter()
        .map(|(name, ok)| {
            let total = rng.gen_range(8..40u64);
            let mut distribution = BTreeMap::new();
            let mut remaining = total;
            for (i, cat) in categories.iter().enumerate() {
                let share = if i + 1 == categories.len() {
                    remaining
                } else {
                    rng.gen_range(0..=remaining)
                };
                remaining -= share;
                if share > 0 {
                    distribution.insert(cat.to_string(), share);
                }
            }
            NewsFeedResult {
                name: name.to_string(),
                status: if *ok {
                    FeedStatus::Success
                } else {
                    FeedStatus::Other("TIMEOUT".into())
                },
                analysis: NewsAnalysis {
                    avg_impact_score: (rng.gen_range(2.0..9.5f64) * 10.0).round() / 10.0,
                    high_impact_articles: rng.gen_range(0..6),
                    total_articles: total,
                    category_distribution: distribution,
                },
            }
        })
        .collect();

    LoadedArtifact {
        file_name: "comprehensive_news_analysis_20250801_060000.json".into(),
        data: NewsReport {
            generated_at: anchor().and_hms_opt(6, 0, 0),
            results,
        },
    }
}

/// A complete, deterministic set of sources for demo mode.
pub fn demo_sources() -> DashboardSources {
    DashboardSources {
        forecasts: SourceState::Loaded(demo_forecasts()),
        market: SourceState::Loaded(demo_market()),
        summaries: SourceState::Loaded(demo_summaries()),
        backtest: SourceState::Loaded(demo_backtest()),
        corpus: SourceState::Loaded(demo_corpus()),
        news: SourceState::Loaded(demo_news()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_is_deterministic() {
        let a = serde_json::to_string(&demo_sources()).unwrap();
        let b = serde_json::to_string(&demo_sources()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn demo_sources_are_fully_loaded() {
        let sources = demo_sources();
        assert!(sources.forecasts.loaded().is_some_and(|r| !r.is_empty()));
        assert!(sources.market.loaded().is_some_and(|r| !r.is_empty()));
        assert!(sources.summaries.loaded().is_some_and(|r| !r.is_empty()));
        assert!(sources
            .backtest
            .loaded()
            .is_some_and(|a| a.data.records.len() == 120));
        assert!(sources.corpus.loaded().is_some_and(|a| a.data.len() == 60));
        assert!(sources
            .news
            .loaded()
            .is_some_and(|a| a.data.results.len() == 8));
    }

    #[test]
    fn trading_days_skip_weekends_and_ascend() {
        let days = trading_days(10);
        assert_eq!(days.len(), 10);
        for pair in days.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        for day in &days {
            assert!(!matches!(day.weekday(), Weekday::Sat | Weekday::Sun));
        }
    }
}
