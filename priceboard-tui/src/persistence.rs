//! App state persistence — JSON save/load across restarts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use priceboard_core::domain::DateRange;

use crate::app::{AppState, Panel};

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Serialize, Deserialize)]
pub struct PersistedState {
    pub selected_sources: Vec<String>,
    pub range: Option<DateRange>,
    pub active_panel: Panel,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            selected_sources: Vec::new(),
            range: None,
            active_panel: Panel::Sources,
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

/// Extract persisted state from the app.
pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        selected_sources: app.selected.clone(),
        range: app.range,
        active_panel: app.active_panel,
    }
}

/// Apply persisted state to the app and recompute the views.
///
/// Persisted source names that no longer exist in the store are dropped
/// silently; the range is applied as saved.
pub fn apply(app: &mut AppState, state: PersistedState) {
    app.selected = state
        .selected_sources
        .into_iter()
        .filter(|name| app.available.iter().any(|m| &m.name == name))
        .collect();
    app.range = state.range;
    app.active_panel = state.active_panel;
    app.recompute();
}

#[cfg(test)]
mod tests {
    use super::*;
    use priceboard_core::domain::{parse_compact_date, DateRange};
    use priceboard_core::sample::{generate, SampleSpec};
    use priceboard_core::SourceStore;

    #[test]
    fn roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let state = PersistedState {
            selected_sources: vec!["model_a".into(), "model_b".into()],
            range: Some(DateRange::new(
                parse_compact_date("20240101").unwrap(),
                parse_compact_date("20240131").unwrap(),
            )),
            active_panel: Panel::Chart,
        };

        save(&path, &state).unwrap();
        let loaded = load(&path);

        assert_eq!(loaded.selected_sources.len(), 2);
        assert_eq!(loaded.range, state.range);
        assert_eq!(loaded.active_panel, Panel::Chart);
    }

    #[test]
    fn missing_file_returns_defaults() {
        let loaded = load(Path::new("/nonexistent/path/state.json"));
        assert!(loaded.selected_sources.is_empty());
        assert_eq!(loaded.active_panel, Panel::Sources);
    }

    #[test]
    fn corrupt_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not valid json {{{").unwrap();

        let loaded = load(&path);
        assert!(loaded.selected_sources.is_empty());
    }

    #[test]
    fn apply_drops_unknown_sources() {
        let dir = tempfile::tempdir().unwrap();
        let store = SourceStore::new(dir.path().join("data"));
        for (name, observations) in generate(&SampleSpec {
            sources: 1,
            days: 3,
            ..SampleSpec::default()
        }) {
            store.import(&name, &observations).unwrap();
        }
        let mut app = AppState::new(store, dir.path().join("state.json"));

        apply(
            &mut app,
            PersistedState {
                selected_sources: vec!["model_a".into(), "retired_model".into()],
                range: None,
                active_panel: Panel::Stats,
            },
        );

        assert_eq!(app.selected, vec!["model_a"]);
        assert_eq!(app.active_panel, Panel::Stats);
        assert!(app.stats.nobs > 0);
    }
}
