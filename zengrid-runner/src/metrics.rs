//! Forecast accuracy metrics — pure functions over loaded records.
//!
//! Every metric is a pure function: records in, numbers out. No I/O, no
//! dependency on the warehouse or artifact layers. All functions tolerate
//! empty input and never divide by zero.

use serde::{Deserialize, Serialize};

use zengrid_core::domain::{ForecastBias, NewsFeedResult};

/// Trailing window for rolling accuracy, in periods.
pub const ROLLING_WINDOW: usize = 30;

/// How many news sources the ranking keeps for display.
pub const NEWS_TOP_N: usize = 10;

/// Hit/miss totals for a record sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitStats {
    pub total: usize,
    pub hits: usize,
    pub misses: usize,
    /// 100 · hits / total; 0.0 when total == 0.
    pub accuracy_pct: f64,
}

/// Count hits and misses over a sequence of hit flags.
pub fn hit_stats(hits: impl IntoIterator<Item = bool>) -> HitStats {
    let mut total = 0usize;
    let mut hit_count = 0usize;
    for hit in hits {
        total += 1;
        if hit {
            hit_count += 1;
        }
    }
    let accuracy_pct = if total == 0 {
        0.0
    } else {
        100.0 * hit_count as f64 / total as f64
    };
    HitStats {
        total,
        hits: hit_count,
        misses: total - hit_count,
        accuracy_pct,
    }
}

/// Rolling hit-rate over a trailing window of chronologically ascending
/// flags, as a percentage.
///
/// The result has one entry per input position. Positions before the window
/// has filled are None — they are undefined, not zero.
pub fn rolling_accuracy(hits: &[bool], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; hits.len()];
    }
    let mut out = Vec::with_capacity(hits.len());
    let mut in_window = 0usize;
    for (i, &hit) in hits.iter().enumerate() {
        if hit {
            in_window += 1;
        }
        if i >= window && hits[i - window] {
            in_window -= 1;
        }
        if i + 1 >= window {
            out.push(Some(100.0 * in_window as f64 / window as f64));
        } else {
            out.push(None);
        }
    }
    out
}

/// Per-bias accuracy breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasGroup {
    pub bias: ForecastBias,
    pub count: usize,
    pub hits: usize,
    pub accuracy_pct: f64,
}

/// Group (bias, hit) pairs by bias, in first-appearance order.
pub fn bias_breakdown(items: impl IntoIterator<Item = (ForecastBias, bool)>) -> Vec<BiasGroup> {
    let mut groups: Vec<BiasGroup> = Vec::new();
    for (bias, hit) in items {
        match groups.iter_mut().find(|g| g.bias == bias) {
            Some(group) => {
                group.count += 1;
                if hit {
                    group.hits += 1;
                }
            }
            None => groups.push(BiasGroup {
                bias,
                count: 1,
                hits: usize::from(hit),
                accuracy_pct: 0.0,
            }),
        }
    }
    for group in &mut groups {
        group.accuracy_pct = 100.0 * group.hits as f64 / group.count as f64;
    }
    groups
}

/// One row of the news-source ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedFeed {
    pub name: String,
    pub avg_impact_score: f64,
    pub high_impact_articles: u64,
    pub total_articles: u64,
}

/// Rank news feeds by average impact score.
///
/// Keeps only feeds with SUCCESS status, sorts descending by score with
/// ties left in input order (stable sort), and truncates to `top_n`.
pub fn rank_news_feeds(feeds: &[NewsFeedResult], top_n: usize) -> Vec<RankedFeed> {
    let mut ranked: Vec<RankedFeed> = feeds
        .iter()
        .filter(|f| f.status.is_success())
        .map(|f| RankedFeed {
            name: f.name.clone(),
            avg_impact_score: f.analysis.avg_impact_score,
            high_impact_articles: f.analysis.high_impact_articles,
            total_articles: f.analysis.total_articles,
        })
        .collect();
    ranked.sort_by(|a, b| b.avg_impact_score.total_cmp(&a.avg_impact_score));
    ranked.truncate(top_n);
    ranked
}
