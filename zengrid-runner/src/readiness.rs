//! Readiness thresholds — corpus size gate and the system checklist.

use serde::{Deserialize, Serialize};

/// Minimum learning-corpus size before the adaptive system has enough
/// history to train on.
pub const CORPUS_READY_MIN: usize = 50;

/// Learning-corpus readiness for the corpus panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusStatus {
    pub size: usize,
    pub ready: bool,
    /// Entries still needed; 0 when ready.
    pub shortfall: usize,
    pub source_file: Option<String>,
}

/// Evaluate the corpus size against the readiness threshold.
pub fn corpus_status(size: usize, source_file: Option<String>) -> CorpusStatus {
    CorpusStatus {
        size,
        ready: size >= CORPUS_READY_MIN,
        shortfall: CORPUS_READY_MIN.saturating_sub(size),
        source_file,
    }
}

/// The four independent conditions of the system-readiness checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemReadiness {
    pub historical_backtest: bool,
    pub learning_corpus: bool,
    pub news_sources: bool,
    pub live_pipeline: bool,
}

impl SystemReadiness {
    pub fn all_ready(&self) -> bool {
        self.historical_backtest && self.learning_corpus && self.news_sources && self.live_pipeline
    }

    pub fn met_count(&self) -> usize {
        self.checks().iter().filter(|(_, ok)| *ok).count()
    }

    /// Labeled checks in display order.
    pub fn checks(&self) -> [(&'static str, bool); 4] {
        [
            ("historical backtest data", self.historical_backtest),
            ("learning corpus", self.learning_corpus),
            ("news sources", self.news_sources),
            ("live forecast pipeline", self.live_pipeline),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpus_ready_at_threshold() {
        let status = corpus_status(CORPUS_READY_MIN, None);
        assert!(status.ready);
        assert_eq!(status.shortfall, 0);
    }

    #[test]
    fn corpus_shortfall_is_exact() {
        let status = corpus_status(37, Some("learning_corpus_20250801_060000.json".into()));
        assert!(!status.ready);
        assert_eq!(status.shortfall, 13);
    }

    #[test]
    fn corpus_empty() {
        let status = corpus_status(0, None);
        assert!(!status.ready);
        assert_eq!(status.shortfall, CORPUS_READY_MIN);
    }

    #[test]
    fn readiness_counts() {
        let r = SystemReadiness {
            historical_backtest: true,
            learning_corpus: false,
            news_sources: true,
            live_pipeline: false,
        };
        assert!(!r.all_ready());
        assert_eq!(r.met_count(), 2);

        let all = SystemReadiness {
            historical_backtest: true,
            learning_corpus: true,
            news_sources: true,
            live_pipeline: true,
        };
        assert!(all.all_ready());
        assert_eq!(all.met_count(), 4);
    }
}
