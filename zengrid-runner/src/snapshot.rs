//! One refresh pass: load every source, then build the dashboard snapshot.
//!
//! Loading and aggregation are split so the snapshot is a pure function of
//! the loaded data: `load_sources` does all the I/O, `build_snapshot` does
//! none. Nothing is retained between passes — every refresh re-executes
//! both steps from scratch.
//!
//! Failures never cross section boundaries. A dead warehouse marks the
//! warehouse-backed sections failed while the artifact sections keep
//! rendering, and vice versa.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use zengrid_core::artifacts::{
    self, ArtifactError, ArtifactKind, BacktestFile, NewsReport,
};
use zengrid_core::domain::{CorpusEntry, ForecastRecord, ForecastSummaryRecord, MarketRecord};
use zengrid_core::warehouse::{self, Warehouse};

use crate::metrics::{
    bias_breakdown, hit_stats, rank_news_feeds, rolling_accuracy, BiasGroup, HitStats, RankedFeed,
    NEWS_TOP_N, ROLLING_WINDOW,
};
use crate::readiness::{corpus_status, CorpusStatus, SystemReadiness};

/// Reference line for the backtest trend chart: coin-flip accuracy.
pub const TARGET_ACCURACY_PCT: f64 = 50.0;

/// Rows of the live forecast table kept for display.
const RECENT_FORECASTS: usize = 12;

/// Load state of one data source.
#[derive(Debug, Clone, Serialize)]
pub enum SourceState<T> {
    Loaded(T),
    /// The source answered but had no rows.
    Empty,
    /// No artifact file matches the kind's pattern.
    Missing { remediation: String },
    Failed(String),
}

impl<T> SourceState<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            SourceState::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

/// An artifact payload plus the file it came from.
#[derive(Debug, Clone, Serialize)]
pub struct LoadedArtifact<T> {
    pub file_name: String,
    pub data: T,
}

/// Everything one refresh pass loaded.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSources {
    pub forecasts: SourceState<Vec<ForecastRecord>>,
    pub market: SourceState<Vec<MarketRecord>>,
    pub summaries: SourceState<Vec<ForecastSummaryRecord>>,
    pub backtest: SourceState<LoadedArtifact<BacktestFile>>,
    pub corpus: SourceState<LoadedArtifact<Vec<CorpusEntry>>>,
    pub news: SourceState<LoadedArtifact<NewsReport>>,
}

/// Run the load half of a refresh pass.
///
/// `warehouse` is None when no secrets file was supplied; the three
/// warehouse sections then report a configuration failure while the
/// artifact sections load normally.
pub fn load_sources(warehouse: Option<&dyn Warehouse>, artifact_dir: &Path) -> DashboardSources {
    let (forecasts, market, summaries) = match warehouse {
        Some(wh) => (
            query_source(warehouse::fetch_forecast_history(wh)),
            query_source(warehouse::fetch_market_history(wh)),
            query_source(warehouse::fetch_forecast_summaries(wh)),
        ),
        None => (not_configured(), not_configured(), not_configured()),
    };

    DashboardSources {
        forecasts,
        market,
        summaries,
        backtest: artifact_source(artifact_dir, ArtifactKind::BacktestResults, |p| {
            artifacts::read_backtest_csv(p)
        }),
        corpus: artifact_source(artifact_dir, ArtifactKind::LearningCorpus, |p| {
            artifacts::read_corpus_json(p)
        }),
        news: artifact_source(artifact_dir, ArtifactKind::NewsAnalysis, |p| {
            artifacts::read_news_json(p)
        }),
    }
}

fn query_source<T>(result: Result<Vec<T>, warehouse::WarehouseError>) -> SourceState<Vec<T>> {
    match result {
        Ok(rows) if rows.is_empty() => SourceState::Empty,
        Ok(rows) => SourceState::Loaded(rows),
        Err(e) => SourceState::Failed(e.to_string()),
    }
}

fn not_configured<T>() -> SourceState<T> {
    SourceState::Failed("warehouse not configured — supply a secrets file".into())
}

fn artifact_source<T>(
    dir: &Path,
    kind: ArtifactKind,
    read: impl FnOnce(&Path) -> Result<T, ArtifactError>,
) -> SourceState<LoadedArtifact<T>> {
    match artifacts::resolve_latest(dir, kind) {
        Ok(Some(file)) => match read(&file.path) {
            Ok(data) => SourceState::Loaded(LoadedArtifact {
                file_name: file.name,
                data,
            }),
            Err(e) => SourceState::Failed(e.to_string()),
        },
        Ok(None) => SourceState::Missing {
            remediation: kind.remediation().to_string(),
        },
        Err(e) => SourceState::Failed(e.to_string()),
    }
}

/// Render state of one dashboard section.
#[derive(Debug, Clone, Serialize)]
pub enum SectionState<T> {
    Ready(T),
    /// Normal empty state, with the command that produces the data when
    /// one exists.
    Empty {
        notice: String,
        remediation: Option<String>,
    },
    /// The source loaded but lacks a column this section needs.
    Skipped(String),
    Failed(String),
}

impl<T> SectionState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            SectionState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Live forecast performance: overall accuracy plus the newest rows.
#[derive(Debug, Clone, Serialize)]
pub struct LivePerformance {
    pub stats: HitStats,
    /// Newest first, as the warehouse returns them.
    pub recent: Vec<ForecastRecord>,
}

/// Historical backtest trend for the line chart.
#[derive(Debug, Clone, Serialize)]
pub struct BacktestTrend {
    /// Ascending dates, one per backtest record.
    pub dates: Vec<NaiveDate>,
    /// Rolling accuracy per date; None until the window fills.
    pub rolling_pct: Vec<Option<f64>>,
    pub stats: HitStats,
    pub target_pct: f64,
    pub source_file: String,
}

/// Per-bias breakdown table.
#[derive(Debug, Clone, Serialize)]
pub struct BiasDistribution {
    pub groups: Vec<BiasGroup>,
    pub total: usize,
    pub source_file: String,
}

/// News-source ranking table.
#[derive(Debug, Clone, Serialize)]
pub struct NewsRanking {
    pub top: Vec<RankedFeed>,
    pub feed_count: usize,
    pub success_count: usize,
    pub generated_at: Option<NaiveDateTime>,
    pub source_file: String,
}

/// The full view model for one render pass.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub refreshed_at: NaiveDateTime,
    /// BLAKE3 digest of the loaded sources; two renders with the same
    /// fingerprint saw the same inputs.
    pub fingerprint: String,
    pub live: SectionState<LivePerformance>,
    pub market: SectionState<Vec<MarketRecord>>,
    pub summaries: SectionState<Vec<ForecastSummaryRecord>>,
    pub backtest: SectionState<BacktestTrend>,
    pub bias: SectionState<BiasDistribution>,
    pub news: SectionState<NewsRanking>,
    pub corpus: SectionState<CorpusStatus>,
    pub readiness: SystemReadiness,
}

/// Build the snapshot from loaded sources. Pure: no I/O, no clock beyond
/// the refresh stamp, no state carried between calls.
pub fn build_snapshot(sources: &DashboardSources) -> DashboardSnapshot {
    DashboardSnapshot {
        refreshed_at: chrono::Local::now().naive_local(),
        fingerprint: fingerprint(sources),
        live: live_section(&sources.forecasts),
        market: market_section(&sources.market),
        summaries: summaries_section(&sources.summaries),
        backtest: backtest_section(&sources.backtest),
        bias: bias_section(&sources.backtest),
        news: news_section(&sources.news),
        corpus: corpus_section(&sources.corpus),
        readiness: readiness(sources),
    }
}

/// Digest the loaded sources for provenance display.
fn fingerprint(sources: &DashboardSources) -> String {
    let json = serde_json::to_string(sources).unwrap_or_default();
    blake3::hash(json.as_bytes()).to_hex().to_string()
}

fn readiness(sources: &DashboardSources) -> SystemReadiness {
    SystemReadiness {
        historical_backtest: sources
            .backtest
            .loaded()
            .is_some_and(|a| !a.data.records.is_empty()),
        learning_corpus: sources.corpus.loaded().is_some_and(|a| !a.data.is_empty()),
        news_sources: sources
            .news
            .loaded()
            .is_some_and(|a| !a.data.results.is_empty()),
        live_pipeline: sources.forecasts.loaded().is_some_and(|r| !r.is_empty()),
    }
}

fn live_section(state: &SourceState<Vec<ForecastRecord>>) -> SectionState<LivePerformance> {
    match state {
        SourceState::Loaded(records) => SectionState::Ready(LivePerformance {
            stats: hit_stats(records.iter().map(|r| r.hit)),
            recent: records.iter().take(RECENT_FORECASTS).cloned().collect(),
        }),
        // Missing never comes out of load_sources for warehouse-backed
        // sources, but hand-built sources get the empty treatment.
        SourceState::Empty | SourceState::Missing { .. } => SectionState::Empty {
            notice: "forecast postmortem has no rows yet".into(),
            remediation: None,
        },
        SourceState::Failed(msg) => SectionState::Failed(msg.clone()),
    }
}

fn market_section(state: &SourceState<Vec<MarketRecord>>) -> SectionState<Vec<MarketRecord>> {
    match state {
        SourceState::Loaded(records) => {
            let mut ascending = records.clone();
            ascending.sort_by_key(|r| r.date);
            SectionState::Ready(ascending)
        }
        SourceState::Empty | SourceState::Missing { .. } => SectionState::Empty {
            notice: "daily market data has no rows yet".into(),
            remediation: None,
        },
        SourceState::Failed(msg) => SectionState::Failed(msg.clone()),
    }
}

fn summaries_section(
    state: &SourceState<Vec<ForecastSummaryRecord>>,
) -> SectionState<Vec<ForecastSummaryRecord>> {
    match state {
        SourceState::Loaded(records) => SectionState::Ready(records.clone()),
        SourceState::Empty | SourceState::Missing { .. } => SectionState::Empty {
            notice: "no forecast summaries published yet".into(),
            remediation: None,
        },
        SourceState::Failed(msg) => SectionState::Failed(msg.clone()),
    }
}

fn backtest_section(
    state: &SourceState<LoadedArtifact<BacktestFile>>,
) -> SectionState<BacktestTrend> {
    artifact_section(state, ArtifactKind::BacktestResults, |art| {
        if !art.data.has_hit_column {
            return SectionState::Skipped(format!(
                "'{}' has no forecast_hit column; re-export to enable accuracy charts",
                art.file_name
            ));
        }
        if art.data.records.is_empty() {
            return empty_artifact(ArtifactKind::BacktestResults);
        }
        let mut records = art.data.records.clone();
        records.sort_by_key(|r| r.date);
        let hits: Vec<bool> = records.iter().map(|r| r.hit_or_miss()).collect();
        SectionState::Ready(BacktestTrend {
            dates: records.iter().map(|r| r.date).collect(),
            rolling_pct: rolling_accuracy(&hits, ROLLING_WINDOW),
            stats: hit_stats(hits.iter().copied()),
            target_pct: TARGET_ACCURACY_PCT,
            source_file: art.file_name.clone(),
        })
    })
}

fn bias_section(
    state: &SourceState<LoadedArtifact<BacktestFile>>,
) -> SectionState<BiasDistribution> {
    artifact_section(state, ArtifactKind::BacktestResults, |art| {
        if !art.data.has_hit_column {
            return SectionState::Skipped(format!(
                "'{}' has no forecast_hit column; bias accuracy unavailable",
                art.file_name
            ));
        }
        if art.data.records.is_empty() {
            return empty_artifact(ArtifactKind::BacktestResults);
        }
        let groups = bias_breakdown(
            art.data
                .records
                .iter()
                .map(|r| (r.bias.clone(), r.hit_or_miss())),
        );
        SectionState::Ready(BiasDistribution {
            total: art.data.records.len(),
            groups,
            source_file: art.file_name.clone(),
        })
    })
}

fn news_section(state: &SourceState<LoadedArtifact<NewsReport>>) -> SectionState<NewsRanking> {
    artifact_section(state, ArtifactKind::NewsAnalysis, |art| {
        if art.data.results.is_empty() {
            return empty_artifact(ArtifactKind::NewsAnalysis);
        }
        let success_count = art
            .data
            .results
            .iter()
            .filter(|f| f.status.is_success())
            .count();
        SectionState::Ready(NewsRanking {
            top: rank_news_feeds(&art.data.results, NEWS_TOP_N),
            feed_count: art.data.results.len(),
            success_count,
            generated_at: art.data.generated_at,
            source_file: art.file_name.clone(),
        })
    })
}

fn corpus_section(
    state: &SourceState<LoadedArtifact<Vec<CorpusEntry>>>,
) -> SectionState<CorpusStatus> {
    artifact_section(state, ArtifactKind::LearningCorpus, |art| {
        SectionState::Ready(corpus_status(
            art.data.len(),
            Some(art.file_name.clone()),
        ))
    })
}

fn artifact_section<T, U>(
    state: &SourceState<LoadedArtifact<T>>,
    kind: ArtifactKind,
    build: impl FnOnce(&LoadedArtifact<T>) -> SectionState<U>,
) -> SectionState<U> {
    match state {
        SourceState::Loaded(art) => build(art),
        SourceState::Empty => empty_artifact(kind),
        SourceState::Missing { remediation } => SectionState::Empty {
            notice: format!("no {} file matching {}", kind.label(), kind.pattern()),
            remediation: Some(remediation.clone()),
        },
        SourceState::Failed(msg) => SectionState::Failed(msg.clone()),
    }
}

fn empty_artifact<U>(kind: ArtifactKind) -> SectionState<U> {
    SectionState::Empty {
        notice: format!("{} file has no records", kind.label()),
        remediation: Some(kind.remediation().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zengrid_core::domain::{BacktestRecord, FeedStatus, ForecastBias, NewsFeedResult};

    fn empty_sources() -> DashboardSources {
        DashboardSources {
            forecasts: SourceState::Failed("connection failed: test".into()),
            market: SourceState::Failed("connection failed: test".into()),
            summaries: SourceState::Failed("connection failed: test".into()),
            backtest: SourceState::Missing {
                remediation: ArtifactKind::BacktestResults.remediation().into(),
            },
            corpus: SourceState::Missing {
                remediation: ArtifactKind::LearningCorpus.remediation().into(),
            },
            news: SourceState::Missing {
                remediation: ArtifactKind::NewsAnalysis.remediation().into(),
            },
        }
    }

    fn backtest_artifact(records: Vec<BacktestRecord>, has_hit: bool) -> SourceState<LoadedArtifact<BacktestFile>> {
        SourceState::Loaded(LoadedArtifact {
            file_name: "historical_backtest_results_20250801_060000.csv".into(),
            data: BacktestFile {
                records,
                has_hit_column: has_hit,
            },
        })
    }

    fn record(day: u32, bias: ForecastBias, hit: Option<bool>) -> BacktestRecord {
        BacktestRecord {
            date: NaiveDate::from_ymd_opt(2025, 7, day).unwrap(),
            bias,
            hit,
        }
    }

    #[test]
    fn empty_sources_degrade_to_placeholders_not_panics() {
        let snapshot = build_snapshot(&empty_sources());

        assert!(matches!(snapshot.live, SectionState::Failed(_)));
        assert!(matches!(snapshot.backtest, SectionState::Empty { .. }));
        if let SectionState::Empty { remediation, .. } = &snapshot.backtest {
            assert_eq!(
                remediation.as_deref(),
                Some(ArtifactKind::BacktestResults.remediation())
            );
        }
        assert!(!snapshot.readiness.all_ready());
        assert_eq!(snapshot.readiness.met_count(), 0);
    }

    #[test]
    fn one_failed_source_does_not_block_others() {
        let mut sources = empty_sources();
        sources.backtest = backtest_artifact(
            vec![
                record(1, ForecastBias::Bullish, Some(true)),
                record(2, ForecastBias::Bearish, Some(false)),
            ],
            true,
        );
        let snapshot = build_snapshot(&sources);

        assert!(matches!(snapshot.live, SectionState::Failed(_)));
        assert!(snapshot.backtest.ready().is_some());
        assert!(snapshot.readiness.historical_backtest);
        assert!(!snapshot.readiness.live_pipeline);
    }

    #[test]
    fn missing_hit_column_skips_accuracy_sections() {
        let mut sources = empty_sources();
        sources.backtest = backtest_artifact(
            vec![record(1, ForecastBias::Bullish, None)],
            false,
        );
        let snapshot = build_snapshot(&sources);

        assert!(matches!(snapshot.backtest, SectionState::Skipped(_)));
        assert!(matches!(snapshot.bias, SectionState::Skipped(_)));
        // The file still counts as present for the readiness checklist.
        assert!(snapshot.readiness.historical_backtest);
    }

    #[test]
    fn backtest_trend_is_ascending_with_null_as_miss() {
        let mut sources = empty_sources();
        // Inserted newest-first; the trend must re-sort ascending.
        sources.backtest = backtest_artifact(
            vec![
                record(3, ForecastBias::Bullish, Some(true)),
                record(1, ForecastBias::Bullish, Some(true)),
                record(2, ForecastBias::Bearish, None),
            ],
            true,
        );
        let snapshot = build_snapshot(&sources);
        let trend = snapshot.backtest.ready().unwrap();

        assert_eq!(
            trend.dates,
            vec![
                NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 7, 2).unwrap(),
                NaiveDate::from_ymd_opt(2025, 7, 3).unwrap(),
            ]
        );
        assert_eq!(trend.stats.total, 3);
        assert_eq!(trend.stats.hits, 2); // the null hit counts as a miss
        assert_eq!(trend.target_pct, TARGET_ACCURACY_PCT);
        assert_eq!(trend.rolling_pct.len(), 3);
    }

    #[test]
    fn corpus_status_flows_through() {
        let mut sources = empty_sources();
        let entries: Vec<CorpusEntry> = (1..=20)
            .map(|d| CorpusEntry {
                date: NaiveDate::from_ymd_opt(2025, 6, d).unwrap(),
                bias: ForecastBias::Bullish,
                hit: Some(true),
                price_change_pct: None,
                level_breach: None,
            })
            .collect();
        sources.corpus = SourceState::Loaded(LoadedArtifact {
            file_name: "learning_corpus_20250801_060000.json".into(),
            data: entries,
        });
        let snapshot = build_snapshot(&sources);
        let corpus = snapshot.corpus.ready().unwrap();

        assert_eq!(corpus.size, 20);
        assert!(!corpus.ready);
        assert_eq!(corpus.shortfall, 30);
        assert!(snapshot.readiness.learning_corpus);
    }

    #[test]
    fn news_ranking_counts_successes() {
        let mut sources = empty_sources();
        sources.news = SourceState::Loaded(LoadedArtifact {
            file_name: "comprehensive_news_analysis_20250801_060000.json".into(),
            data: NewsReport {
                generated_at: None,
                results: vec![
                    NewsFeedResult {
                        name: "wire-a".into(),
                        status: FeedStatus::Success,
                        analysis: Default::default(),
                    },
                    NewsFeedResult {
                        name: "wire-b".into(),
                        status: FeedStatus::Other("TIMEOUT".into()),
                        analysis: Default::default(),
                    },
                ],
            },
        });
        let snapshot = build_snapshot(&sources);
        let news = snapshot.news.ready().unwrap();

        assert_eq!(news.feed_count, 2);
        assert_eq!(news.success_count, 1);
        assert_eq!(news.top.len(), 1);
    }

    #[test]
    fn fingerprint_tracks_source_content() {
        let base = empty_sources();
        let fp1 = fingerprint(&base);
        let fp2 = fingerprint(&base);
        assert_eq!(fp1, fp2);

        let mut changed = empty_sources();
        changed.backtest = backtest_artifact(vec![], true);
        assert_ne!(fp1, fingerprint(&changed));
    }
}
