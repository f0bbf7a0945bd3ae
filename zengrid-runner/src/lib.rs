//! ZenGrid Runner — the refresh pipeline behind both dashboards.
//!
//! This crate builds on `zengrid-core` to provide:
//! - Pure aggregate metrics (accuracy, rolling accuracy, bias breakdown,
//!   news-source ranking)
//! - One-pass source loading and snapshot assembly
//! - Corpus and system readiness checks
//! - The cancellable auto-refresh timer
//! - Deterministic demo data for running without credentials

pub mod demo;
pub mod metrics;
pub mod readiness;
pub mod refresh;
pub mod snapshot;

pub use demo::demo_sources;
pub use metrics::{
    bias_breakdown, hit_stats, rank_news_feeds, rolling_accuracy, BiasGroup, HitStats, RankedFeed,
    NEWS_TOP_N, ROLLING_WINDOW,
};
pub use readiness::{corpus_status, CorpusStatus, SystemReadiness, CORPUS_READY_MIN};
pub use refresh::RefreshTimer;
pub use snapshot::{
    build_snapshot, load_sources, BacktestTrend, BiasDistribution, DashboardSnapshot,
    DashboardSources, LivePerformance, LoadedArtifact, NewsRanking, SectionState, SourceState,
    TARGET_ACCURACY_PCT,
};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn snapshot_crosses_the_worker_channel() {
        assert_send::<DashboardSnapshot>();
        assert_sync::<DashboardSnapshot>();
    }

    #[test]
    fn sources_cross_the_worker_channel() {
        assert_send::<DashboardSources>();
        assert_sync::<DashboardSources>();
    }

    #[test]
    fn metric_types_are_send_sync() {
        assert_send::<HitStats>();
        assert_sync::<HitStats>();
        assert_send::<BiasGroup>();
        assert_sync::<BiasGroup>();
        assert_send::<RankedFeed>();
        assert_sync::<RankedFeed>();
    }

    #[test]
    fn readiness_types_are_send_sync() {
        assert_send::<CorpusStatus>();
        assert_sync::<CorpusStatus>();
        assert_send::<SystemReadiness>();
        assert_sync::<SystemReadiness>();
    }

    #[test]
    fn refresh_timer_is_send() {
        assert_send::<RefreshTimer>();
    }
}
