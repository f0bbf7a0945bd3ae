//! End-to-end refresh pass: sources on disk and a stub warehouse, through
//! `load_sources` and `build_snapshot`.

use std::fs;
use std::path::Path;

use zengrid_core::warehouse::{QueryResult, Warehouse, WarehouseError};
use zengrid_runner::{
    build_snapshot, demo_sources, load_sources, SectionState, CORPUS_READY_MIN, ROLLING_WINDOW,
};

/// Serves fixture rows for the three fixed queries.
struct StubWarehouse;

impl Warehouse for StubWarehouse {
    fn name(&self) -> &str {
        "stub"
    }

    fn query(&self, sql: &str) -> Result<QueryResult, WarehouseError> {
        if sql.contains("FORECAST_POSTMORTEM") {
            Ok(QueryResult {
                columns: ["DATE", "SYMBOL", "FORECAST_BIAS", "ACTUAL_CLOSE", "HIT"]
                    .map(String::from)
                    .to_vec(),
                rows: vec![
                    text_row(&["2025-08-01", "SPX", "bullish", "5510.25", "TRUE"]),
                    text_row(&["2025-07-31", "SPX", "bearish", "5492.00", "TRUE"]),
                    text_row(&["2025-07-30", "SPX", "neutral", "5488.50", "FALSE"]),
                    text_row(&["2025-07-29", "SPX", "bullish", "5465.75", "TRUE"]),
                ],
            })
        } else if sql.contains("DAILY_MARKET_DATA") {
            Ok(QueryResult {
                columns: ["DATE", "SPX_CLOSE", "NDX_CLOSE", "RUT_CLOSE", "VIX_CLOSE"]
                    .map(String::from)
                    .to_vec(),
                rows: vec![text_row(&[
                    "2025-08-01",
                    "5510.25",
                    "19855.00",
                    "2250.50",
                    "14.90",
                ])],
            })
        } else if sql.contains("FORECAST_SUMMARY") {
            Ok(QueryResult {
                columns: [
                    "DATE",
                    "SYMBOL",
                    "FORECAST_BIAS",
                    "SUPPORT_LEVELS",
                    "RESISTANCE_LEVELS",
                    "ATM_STRADDLE",
                    "NOTES",
                ]
                .map(String::from)
                .to_vec(),
                rows: vec![text_row(&[
                    "2025-08-01",
                    "SPX",
                    "bullish",
                    "5450.0,5425.5",
                    "5550.0,5575.25",
                    "62.4",
                    "gap above resistance likely to fill",
                ])],
            })
        } else {
            Err(WarehouseError::QueryFailed(format!("unexpected sql: {sql}")))
        }
    }

    fn is_available(&self) -> bool {
        true
    }
}

fn text_row(cells: &[&str]) -> Vec<Option<String>> {
    cells.iter().map(|c| Some(c.to_string())).collect()
}

fn write_artifacts(dir: &Path) {
    let mut csv = String::from("date,forecast_bias,forecast_hit\n");
    for i in 0..40 {
        let day = 1 + (i % 28);
        let bias = ["bullish", "bearish", "neutral"][i % 3];
        let hit = if i % 4 == 0 { "FALSE" } else { "TRUE" };
        csv.push_str(&format!("2025-06-{day:02},{bias},{hit}\n"));
    }
    fs::write(
        dir.join("historical_backtest_results_20250801_060000.csv"),
        csv,
    )
    .unwrap();

    let entries: Vec<String> = (0..CORPUS_READY_MIN + 5)
        .map(|i| {
            format!(
                r#"{{"date": "2025-05-{:02}", "forecast_bias": "bullish", "hit": true}}"#,
                1 + (i % 28)
            )
        })
        .collect();
    fs::write(
        dir.join("learning_corpus_20250801_060000.json"),
        format!("[{}]", entries.join(",")),
    )
    .unwrap();

    fs::write(
        dir.join("comprehensive_news_analysis_20250801_060000.json"),
        r#"{
            "generated_at": "2025-08-01T06:00:00",
            "results": [
                {"name": "macro-wire", "status": "SUCCESS",
                 "analysis": {"avg_impact_score": 7.2, "high_impact_articles": 3,
                              "total_articles": 24, "category_distribution": {"fed": 9}}},
                {"name": "overnight-asia", "status": "TIMEOUT"}
            ]
        }"#,
    )
    .unwrap();
}

#[test]
fn full_pass_with_stub_warehouse_and_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path());

    let sources = load_sources(Some(&StubWarehouse), dir.path());
    let snapshot = build_snapshot(&sources);

    let live = snapshot.live.ready().expect("live section");
    assert_eq!(live.stats.total, 4);
    assert_eq!(live.stats.hits, 3);
    assert!((live.stats.accuracy_pct - 75.0).abs() < 1e-10);

    let trend = snapshot.backtest.ready().expect("backtest section");
    assert_eq!(trend.dates.len(), 40);
    // 40 records with a 30-period window: the last 11 positions are defined.
    let defined = trend.rolling_pct.iter().filter(|v| v.is_some()).count();
    assert_eq!(defined, 40 - ROLLING_WINDOW + 1);

    let bias = snapshot.bias.ready().expect("bias section");
    assert_eq!(
        bias.groups.iter().map(|g| g.count).sum::<usize>(),
        bias.total
    );

    let news = snapshot.news.ready().expect("news section");
    assert_eq!(news.feed_count, 2);
    assert_eq!(news.success_count, 1);

    let corpus = snapshot.corpus.ready().expect("corpus section");
    assert!(corpus.ready);
    assert_eq!(corpus.shortfall, 0);

    assert!(snapshot.readiness.all_ready());
    assert!(!snapshot.fingerprint.is_empty());
}

#[test]
fn missing_artifacts_degrade_with_remediation_commands() {
    let dir = tempfile::tempdir().unwrap();

    let sources = load_sources(Some(&StubWarehouse), dir.path());
    let snapshot = build_snapshot(&sources);

    // Warehouse sections still render.
    assert!(snapshot.live.ready().is_some());

    match &snapshot.backtest {
        SectionState::Empty {
            notice,
            remediation,
        } => {
            assert!(notice.contains("historical_backtest_results_"));
            assert!(remediation.as_deref().is_some_and(|r| !r.is_empty()));
        }
        other => panic!("expected empty backtest section, got {other:?}"),
    }

    assert!(!snapshot.readiness.historical_backtest);
    assert!(snapshot.readiness.live_pipeline);
}

#[test]
fn no_warehouse_still_renders_artifact_sections() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path());

    let sources = load_sources(None, dir.path());
    let snapshot = build_snapshot(&sources);

    assert!(matches!(snapshot.live, SectionState::Failed(_)));
    assert!(snapshot.backtest.ready().is_some());
    assert!(snapshot.corpus.ready().is_some());
    assert!(!snapshot.readiness.live_pipeline);
    assert!(snapshot.readiness.historical_backtest);
}

#[test]
fn demo_snapshot_is_fully_ready() {
    let sources = demo_sources();
    let snapshot = build_snapshot(&sources);

    assert!(snapshot.live.ready().is_some());
    assert!(snapshot.market.ready().is_some());
    assert!(snapshot.summaries.ready().is_some());
    assert!(snapshot.backtest.ready().is_some());
    assert!(snapshot.bias.ready().is_some());
    assert!(snapshot.news.ready().is_some());
    assert!(snapshot.corpus.ready().is_some());
    assert!(snapshot.readiness.all_ready());

    // Demo data is deterministic, so the fingerprint is stable across passes.
    let again = build_snapshot(&demo_sources());
    assert_eq!(snapshot.fingerprint, again.fingerprint);
}
