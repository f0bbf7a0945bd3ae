//! UI preference persistence — JSON save/load across restarts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::app::{AppState, Overlay, Panel, DEFAULT_REFRESH_SECS};

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Serialize, Deserialize)]
pub struct PersistedState {
    pub active_panel: Panel,
    pub auto_refresh: bool,
    pub refresh_interval_secs: u64,
    pub welcome_dismissed: bool,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            active_panel: Panel::Live,
            auto_refresh: false,
            refresh_interval_secs: DEFAULT_REFRESH_SECS,
            welcome_dismissed: false,
        }
    }
}

/// Load persisted state from disk. Returns defaults if the file is missing
/// or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Extract persisted state from AppState.
pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        active_panel: app.active_panel,
        auto_refresh: app.auto_refresh,
        refresh_interval_secs: app.refresh_interval_secs,
        welcome_dismissed: app.overlay != Overlay::Welcome,
    }
}

/// Apply persisted state to AppState.
///
/// Does not start the auto-refresh timer itself; the caller decides when
/// to send the worker command.
pub fn apply(app: &mut AppState, state: PersistedState) {
    app.active_panel = state.active_panel;
    app.auto_refresh = state.auto_refresh;
    app.refresh_interval_secs = state.refresh_interval_secs.max(5);
    if !state.welcome_dismissed {
        app.overlay = Overlay::Welcome;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    #[test]
    fn roundtrip() {
        let dir = tempdir();
        let path = dir.join("state.json");

        let state = PersistedState {
            active_panel: Panel::News,
            auto_refresh: true,
            refresh_interval_secs: 120,
            welcome_dismissed: true,
        };
        save(&path, &state).unwrap();
        let loaded = load(&path);

        assert_eq!(loaded.active_panel, Panel::News);
        assert!(loaded.auto_refresh);
        assert_eq!(loaded.refresh_interval_secs, 120);
        assert!(loaded.welcome_dismissed);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_returns_defaults() {
        let loaded = load(Path::new("/nonexistent/path/state.json"));
        assert_eq!(loaded.active_panel, Panel::Live);
        assert!(!loaded.auto_refresh);
    }

    #[test]
    fn corrupt_file_returns_defaults() {
        let dir = tempdir();
        let path = dir.join("state.json");
        std::fs::write(&path, "not valid json {{{").unwrap();

        let loaded = load(&path);
        assert_eq!(loaded.refresh_interval_secs, DEFAULT_REFRESH_SECS);

        let _ = std::fs::remove_dir_all(&dir);
    }

    fn tempdir() -> std::path::PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir()
            .join(format!("zengrid_persist_{}_{id}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }
}
