//! News feed analysis records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Outcome of analyzing one news source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FeedStatus {
    Success,
    Other(String),
}

impl FeedStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, FeedStatus::Success)
    }
}

impl From<String> for FeedStatus {
    fn from(s: String) -> Self {
        if s.trim().eq_ignore_ascii_case("success") {
            FeedStatus::Success
        } else {
            FeedStatus::Other(s)
        }
    }
}

impl From<FeedStatus> for String {
    fn from(s: FeedStatus) -> String {
        match s {
            FeedStatus::Success => "SUCCESS".to_string(),
            FeedStatus::Other(o) => o,
        }
    }
}

/// Aggregated analysis for one feed: impact scoring and article counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsAnalysis {
    #[serde(default)]
    pub avg_impact_score: f64,
    #[serde(default)]
    pub high_impact_articles: u64,
    #[serde(default)]
    pub total_articles: u64,
    #[serde(default)]
    pub category_distribution: BTreeMap<String, u64>,
}

/// Analysis result for a single news source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsFeedResult {
    pub name: String,
    pub status: FeedStatus,
    #[serde(default)]
    pub analysis: NewsAnalysis,
}
