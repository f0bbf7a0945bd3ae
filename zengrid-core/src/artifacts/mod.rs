//! Local artifact files — resolution of the newest export per kind.
//!
//! External batch jobs drop timestamped exports into one directory:
//! backtest results as CSV, the learning corpus and the news analysis as
//! JSON. The dashboard always reads the single newest file per kind and
//! treats "no file yet" as a normal empty state with a remediation hint,
//! not an error.

pub mod backtest;
pub mod corpus;
pub mod news;

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::NaiveDateTime;
use thiserror::Error;

pub use backtest::{read_backtest_csv, BacktestFile};
pub use corpus::read_corpus_json;
pub use news::{read_news_json, NewsReport};

/// Errors from reading artifact files. Resolution itself only fails on
/// unreadable directories; a missing artifact is `Ok(None)`.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("cannot parse '{path}': {source}")]
    Csv { path: String, source: csv::Error },

    #[error("cannot parse '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("'{path}' has no '{column}' column")]
    MissingColumn { path: String, column: &'static str },
}

/// The three artifact families the dashboard knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    BacktestResults,
    LearningCorpus,
    NewsAnalysis,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 3] = [
        ArtifactKind::BacktestResults,
        ArtifactKind::LearningCorpus,
        ArtifactKind::NewsAnalysis,
    ];

    pub fn prefix(self) -> &'static str {
        match self {
            ArtifactKind::BacktestResults => "historical_backtest_results_",
            ArtifactKind::LearningCorpus => "learning_corpus_",
            ArtifactKind::NewsAnalysis => "comprehensive_news_analysis_",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ArtifactKind::BacktestResults => "csv",
            ArtifactKind::LearningCorpus => "json",
            ArtifactKind::NewsAnalysis => "json",
        }
    }

    /// The name pattern, for display in empty-state notices.
    pub fn pattern(self) -> String {
        format!("{}*.{}", self.prefix(), self.extension())
    }

    /// The shell command a human would run to produce the artifact.
    pub fn remediation(self) -> &'static str {
        match self {
            ArtifactKind::BacktestResults => "python jobs/run_historical_backtest.py --export",
            ArtifactKind::LearningCorpus => "python jobs/export_learning_corpus.py",
            ArtifactKind::NewsAnalysis => "python jobs/run_news_analysis.py --comprehensive",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ArtifactKind::BacktestResults => "backtest results",
            ArtifactKind::LearningCorpus => "learning corpus",
            ArtifactKind::NewsAnalysis => "news analysis",
        }
    }
}

/// How new an artifact file is.
///
/// Export jobs stamp the file name (`..._YYYYMMDD_HHMMSS.ext`); that stamp
/// is authoritative because filesystem metadata is unreliable under
/// concurrent writers. Any stamped file outranks any unstamped one, and
/// unstamped files fall back to their modification time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ArtifactVersion {
    Modified(SystemTime),
    Stamped(NaiveDateTime),
}

/// A resolved artifact file.
#[derive(Debug, Clone)]
pub struct ArtifactFile {
    pub path: PathBuf,
    pub name: String,
    pub version: ArtifactVersion,
}

/// Resolve the single newest file of the given kind in `dir`.
///
/// Returns `Ok(None)` when the directory is missing or no file matches —
/// that is the normal "job has not run yet" state. Version ties are broken
/// by the lexicographically greatest name so resolution is deterministic.
pub fn resolve_latest(
    dir: &Path,
    kind: ArtifactKind,
) -> Result<Option<ArtifactFile>, ArtifactError> {
    if !dir.exists() {
        return Ok(None);
    }
    let entries = std::fs::read_dir(dir).map_err(|source| ArtifactError::Io {
        path: dir.display().to_string(),
        source,
    })?;

    let mut best: Option<ArtifactFile> = None;
    for entry in entries {
        let entry = entry.map_err(|source| ArtifactError::Io {
            path: dir.display().to_string(),
            source,
        })?;
        let name = entry.file_name().to_string_lossy().to_string();
        if !matches_kind(&name, kind) {
            continue;
        }

        let version = match parse_name_stamp(&name, kind) {
            Some(stamp) => ArtifactVersion::Stamped(stamp),
            None => {
                let modified = entry
                    .metadata()
                    .and_then(|m| m.modified())
                    .unwrap_or(SystemTime::UNIX_EPOCH);
                ArtifactVersion::Modified(modified)
            }
        };

        let candidate = ArtifactFile {
            path: entry.path(),
            name,
            version,
        };
        let newer = match &best {
            None => true,
            Some(current) => {
                (candidate.version, &candidate.name) > (current.version, &current.name)
            }
        };
        if newer {
            best = Some(candidate);
        }
    }
    Ok(best)
}

fn matches_kind(name: &str, kind: ArtifactKind) -> bool {
    name.starts_with(kind.prefix())
        && Path::new(name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(kind.extension()))
}

/// Parse the `YYYYMMDD_HHMMSS` stamp between the kind prefix and the
/// extension, if the name carries one.
fn parse_name_stamp(name: &str, kind: ArtifactKind) -> Option<NaiveDateTime> {
    let rest = name.strip_prefix(kind.prefix())?;
    let stem = rest.strip_suffix(&format!(".{}", kind.extension()))?;
    NaiveDateTime::parse_from_str(stem, "%Y%m%d_%H%M%S").ok()
}
