//! PriceBoard Core — domain types, ingestion, storage, and the dashboard views.
//!
//! This crate contains everything below the presentation layer:
//! - Domain types (observations, selections, source collections)
//! - CSV ingestion with field-level validation
//! - On-disk source store (one JSON document per uploaded model)
//! - Time-series alignment (chart view and spreadsheet view)
//! - Pooled summary statistics (MAPE, RMSE, peaks, averages, energy sums)
//! - Demo data generation and TOML configuration
//!
//! The alignment and statistics functions are pure: given the same selection
//! and collection they return identical output, never mutate their inputs,
//! and never fail — degenerate inputs (empty selection, a source with no
//! data on a date) produce defined placeholder output.

pub mod align;
pub mod config;
pub mod domain;
pub mod ingest;
pub mod sample;
pub mod stats;
pub mod store;

pub use align::{align_chart, align_rows, ChartView, SourceSeries, SpreadsheetRow};
pub use domain::{DateRange, Observation, Selection, SourceCollection};
pub use stats::StatsSummary;
pub use store::{SourceMeta, SourceStore};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: all core types are Send + Sync.
    ///
    /// The TUI recomputes views on the main thread today, but nothing in the
    /// core may prevent moving that work to a worker later.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Observation>();
        require_sync::<domain::Observation>();
        require_send::<domain::Selection>();
        require_sync::<domain::Selection>();
        require_send::<domain::SourceCollection>();
        require_sync::<domain::SourceCollection>();
        require_send::<align::ChartView>();
        require_sync::<align::ChartView>();
        require_send::<align::SpreadsheetRow>();
        require_sync::<align::SpreadsheetRow>();
        require_send::<stats::StatsSummary>();
        require_sync::<stats::StatsSummary>();
        require_send::<store::SourceStore>();
        require_sync::<store::SourceStore>();
        require_send::<store::SourceMeta>();
        require_sync::<store::SourceMeta>();
    }
}
