//! Application state — single-owner, main-thread only.
//!
//! The app owns the Selection (chosen sources + date range) and recomputes
//! all three derived views synchronously whenever it changes. Each
//! recomputation takes a fresh snapshot from the store and replaces the
//! previous views atomically; nothing is updated incrementally.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use priceboard_core::domain::{DateRange, Selection};
use priceboard_core::store::StoreError;
use priceboard_core::{
    align_chart, align_rows, ChartView, SourceMeta, SourceStore, SpreadsheetRow, StatsSummary,
};

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Panel {
    Sources,
    Chart,
    Table,
    Stats,
    Help,
}

impl Panel {
    pub fn index(self) -> usize {
        match self {
            Panel::Sources => 0,
            Panel::Chart => 1,
            Panel::Table => 2,
            Panel::Stats => 3,
            Panel::Help => 4,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Sources),
            1 => Some(Panel::Chart),
            2 => Some(Panel::Table),
            3 => Some(Panel::Stats),
            4 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Sources => "Sources",
            Panel::Chart => "Chart",
            Panel::Table => "Table",
            Panel::Stats => "Stats",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % 5).unwrap_or(Panel::Sources)
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + 4) % 5).unwrap_or(Panel::Sources)
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Active overlay, drawn on top of the panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    /// Text entry of an inclusive date range ("YYYYMMDD YYYYMMDD").
    DateFilter,
}

pub struct AppState {
    pub store: SourceStore,
    pub state_path: PathBuf,
    pub running: bool,

    pub active_panel: Panel,
    pub overlay: Overlay,
    /// Date-filter overlay text buffer.
    pub filter_input: String,

    /// Stored sources, as listed (sorted by name).
    pub available: Vec<SourceMeta>,
    /// Selected source names, in the order the user toggled them on.
    /// Order fixes chart series and spreadsheet column order.
    pub selected: Vec<String>,
    pub range: Option<DateRange>,
    pub cursor: usize,
    pub table_offset: usize,

    // Derived views, replaced wholesale on every recomputation.
    pub chart: ChartView,
    pub rows: Vec<SpreadsheetRow>,
    pub stats: StatsSummary,

    pub status: Option<(String, StatusLevel)>,
}

impl AppState {
    pub fn new(store: SourceStore, state_path: PathBuf) -> Self {
        let mut app = Self {
            store,
            state_path,
            running: true,
            active_panel: Panel::Sources,
            overlay: Overlay::None,
            filter_input: String::new(),
            available: Vec::new(),
            selected: Vec::new(),
            range: None,
            cursor: 0,
            table_offset: 0,
            chart: ChartView::default(),
            rows: Vec::new(),
            stats: StatsSummary::default(),
            status: None,
        };
        app.refresh_sources();
        app
    }

    /// The current selection snapshot handed to the views.
    pub fn selection(&self) -> Selection {
        Selection {
            sources: self.selected.clone(),
            range: self.range,
        }
    }

    /// Re-list the store and drop selected names that no longer exist.
    pub fn refresh_sources(&mut self) {
        match self.store.list() {
            Ok(metas) => {
                self.selected
                    .retain(|name| metas.iter().any(|m| &m.name == name));
                self.available = metas;
                if self.cursor >= self.available.len() {
                    self.cursor = self.available.len().saturating_sub(1);
                }
                self.recompute();
            }
            Err(e) => self.set_error(format!("failed to list sources: {e}")),
        }
    }

    /// Rebuild all three views from a fresh store snapshot.
    ///
    /// A store failure leaves empty views rather than stale ones; the
    /// error lands in the status bar.
    pub fn recompute(&mut self) {
        let selection = self.selection();
        let collection = match self.store.load_selection(&selection.sources) {
            Ok(c) => c.filtered(selection.range.as_ref()),
            Err(e) => {
                self.clear_views();
                self.report_store_error(e);
                return;
            }
        };

        self.chart = align_chart(&selection, &collection, selection.reference_source());
        self.rows = align_rows(&selection, &collection);
        self.stats = StatsSummary::compute(&selection, &collection);
        self.table_offset = self.table_offset.min(self.rows.len().saturating_sub(1));
    }

    fn clear_views(&mut self) {
        self.chart = ChartView::default();
        self.rows.clear();
        self.stats = StatsSummary::default();
        self.table_offset = 0;
    }

    fn report_store_error(&mut self, e: StoreError) {
        match e {
            // A selected source vanished underneath us; resync the list.
            StoreError::NotFound(name) => {
                self.set_warning(format!("source '{name}' disappeared, refreshing"));
                self.refresh_sources();
            }
            other => self.set_error(format!("store error: {other}")),
        }
    }

    /// Toggle selection of the source under the cursor.
    pub fn toggle_cursor_source(&mut self) {
        let Some(meta) = self.available.get(self.cursor) else {
            return;
        };
        let name = meta.name.clone();
        if let Some(pos) = self.selected.iter().position(|s| s == &name) {
            self.selected.remove(pos);
        } else {
            self.selected.push(name);
        }
        self.recompute();
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.iter().any(|s| s == name)
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.available.len() {
            self.cursor += 1;
        }
    }

    pub fn scroll_table(&mut self, delta: isize) {
        let max = self.rows.len().saturating_sub(1);
        let next = self.table_offset as isize + delta;
        self.table_offset = next.clamp(0, max as isize) as usize;
    }

    /// Clear both filters: selected sources and the date range.
    pub fn reset_filters(&mut self) {
        self.selected.clear();
        self.range = None;
        self.recompute();
        self.set_status("filters reset".to_string());
    }

    pub fn open_date_filter(&mut self) {
        self.filter_input = match self.range {
            Some(range) => format!(
                "{} {}",
                range.start.format("%Y%m%d"),
                range.end.format("%Y%m%d")
            ),
            None => String::new(),
        };
        self.overlay = Overlay::DateFilter;
    }

    /// Parse the overlay buffer. Empty input clears the range; anything
    /// unparseable is a warning and the current filters stay in place.
    pub fn apply_date_filter_input(&mut self) {
        let input = self.filter_input.trim().to_string();
        self.overlay = Overlay::None;

        if input.is_empty() {
            self.range = None;
            self.recompute();
            self.set_status("date filter cleared".to_string());
            return;
        }

        match parse_range_input(&input) {
            Some(range) => {
                self.range = Some(range);
                self.recompute();
                self.set_status(format!("showing {} .. {}", range.start, range.end));
            }
            None => {
                self.set_warning(format!(
                    "could not parse '{input}' (expected YYYYMMDD YYYYMMDD)"
                ));
            }
        }
    }

    pub fn set_status(&mut self, text: String) {
        self.status = Some((text, StatusLevel::Info));
    }

    pub fn set_warning(&mut self, text: String) {
        self.status = Some((text, StatusLevel::Warning));
    }

    pub fn set_error(&mut self, text: String) {
        self.status = Some((text, StatusLevel::Error));
    }

    pub fn dismiss_status(&mut self) {
        self.status = None;
    }
}

/// "YYYYMMDD YYYYMMDD" → inclusive range. A single date means a one-day
/// window.
fn parse_range_input(input: &str) -> Option<DateRange> {
    use priceboard_core::domain::parse_compact_date;

    let mut parts = input.split_whitespace();
    let start = parse_compact_date(parts.next()?)?;
    let end = match parts.next() {
        Some(raw) => parse_compact_date(raw)?,
        None => start,
    };
    if parts.next().is_some() {
        return None;
    }
    Some(DateRange::new(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use priceboard_core::domain::parse_compact_date;
    use priceboard_core::sample::{generate, SampleSpec};

    fn seeded_app(tag: &str) -> (tempfile::TempDir, AppState) {
        let dir = tempfile::Builder::new()
            .prefix(&format!("priceboard_app_{tag}_"))
            .tempdir()
            .unwrap();
        let store = SourceStore::new(dir.path());
        for (name, observations) in generate(&SampleSpec {
            sources: 2,
            days: 10,
            ..SampleSpec::default()
        }) {
            store.import(&name, &observations).unwrap();
        }
        let state_path = dir.path().join("state.json");
        let app = AppState::new(store, state_path);
        (dir, app)
    }

    #[test]
    fn panel_cycle_is_closed() {
        let mut panel = Panel::Sources;
        for _ in 0..5 {
            panel = panel.next();
        }
        assert_eq!(panel, Panel::Sources);
        assert_eq!(Panel::Sources.prev(), Panel::Help);
    }

    #[test]
    fn toggling_a_source_recomputes_views() {
        let (_dir, mut app) = seeded_app("toggle");
        assert_eq!(app.available.len(), 2);
        assert!(app.chart.is_empty());

        app.toggle_cursor_source();
        assert_eq!(app.selected, vec!["model_a"]);
        assert!(!app.chart.is_empty());
        assert!(app.stats.nobs > 0);

        app.toggle_cursor_source();
        assert!(app.selected.is_empty());
        assert!(app.chart.is_empty());
        assert_eq!(app.stats.nobs, 0);
    }

    #[test]
    fn selection_order_follows_toggle_order() {
        let (_dir, mut app) = seeded_app("order");
        app.cursor = 1;
        app.toggle_cursor_source();
        app.cursor = 0;
        app.toggle_cursor_source();
        assert_eq!(app.selected, vec!["model_b", "model_a"]);
        assert_eq!(app.chart.series[0].name, "model_b");
    }

    #[test]
    fn date_filter_input_round_trips() {
        let (_dir, mut app) = seeded_app("filter");
        app.toggle_cursor_source();
        let full = app.stats.nobs;

        app.filter_input = "20240101 20240103".to_string();
        app.apply_date_filter_input();
        assert!(app.range.is_some());
        assert!(app.stats.nobs < full);
        assert!(app.stats.nobs > 0);

        // Bad input: warning, filters unchanged.
        let before = app.range;
        app.filter_input = "yesterday".to_string();
        app.apply_date_filter_input();
        assert_eq!(app.range, before);
        assert!(matches!(app.status, Some((_, StatusLevel::Warning))));

        // Empty input clears the range.
        app.filter_input.clear();
        app.apply_date_filter_input();
        assert!(app.range.is_none());
        assert_eq!(app.stats.nobs, full);
    }

    #[test]
    fn single_date_filter_is_a_one_day_window() {
        let range = parse_range_input("20240105").unwrap();
        assert_eq!(range.start, parse_compact_date("20240105").unwrap());
        assert_eq!(range.end, range.start);
        assert!(parse_range_input("20240101 20240102 20240103").is_none());
    }

    #[test]
    fn reset_clears_selection_and_range() {
        let (_dir, mut app) = seeded_app("reset");
        app.toggle_cursor_source();
        app.filter_input = "20240101 20240102".to_string();
        app.apply_date_filter_input();

        app.reset_filters();
        assert!(app.selected.is_empty());
        assert!(app.range.is_none());
        assert_eq!(app.stats.nobs, 0);
    }

    #[test]
    fn refresh_drops_vanished_sources_from_selection() {
        let (_dir, mut app) = seeded_app("vanish");
        app.toggle_cursor_source();
        app.store.remove("model_a").unwrap();

        app.refresh_sources();
        assert!(app.selected.is_empty());
        assert_eq!(app.available.len(), 1);
    }
}
