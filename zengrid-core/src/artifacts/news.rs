//! News analysis JSON reader.

use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::ArtifactError;
use crate::domain::NewsFeedResult;

/// A parsed news analysis export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsReport {
    #[serde(default)]
    pub generated_at: Option<NaiveDateTime>,
    pub results: Vec<NewsFeedResult>,
}

/// Older exports wrote a bare array instead of the report object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NewsFile {
    Report(NewsReport),
    Bare(Vec<NewsFeedResult>),
}

/// Read a news analysis export, accepting both file shapes.
pub fn read_news_json(path: &Path) -> Result<NewsReport, ArtifactError> {
    let content = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let parsed: NewsFile =
        serde_json::from_str(&content).map_err(|source| ArtifactError::Json {
            path: path.display().to_string(),
            source,
        })?;
    Ok(match parsed {
        NewsFile::Report(report) => report,
        NewsFile::Bare(results) => NewsReport {
            generated_at: None,
            results,
        },
    })
}
