//! Domain types for forecast/actual price data.

mod observation;
mod selection;

pub use observation::{format_display_date, parse_compact_date, parse_compact_time, Observation};
pub use selection::{DateRange, Selection, SourceCollection};
