//! Learning corpus JSON reader.

use std::path::Path;

use super::ArtifactError;
use crate::domain::CorpusEntry;

/// Read a learning corpus export: a JSON array of entries in export order.
pub fn read_corpus_json(path: &Path) -> Result<Vec<CorpusEntry>, ArtifactError> {
    let content = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ArtifactError::Json {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ForecastBias;
    use std::io::Write;

    #[test]
    fn reads_entries_in_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"[
                {"date": "2025-07-30", "forecast_bias": "bullish", "hit": true, "price_change_pct": 0.8},
                {"date": "2025-07-31", "forecast_bias": "bearish", "hit": false, "level_breach": true}
            ]"#,
        )
        .unwrap();

        let entries = read_corpus_json(file.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].bias, ForecastBias::Bullish);
        assert_eq!(entries[1].level_breach, Some(true));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();
        assert!(read_corpus_json(file.path()).is_err());
    }
}
