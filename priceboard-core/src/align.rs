//! Multi-source time alignment.
//!
//! Two independent computations feed the dashboard:
//! - [`align_chart`] keys by calendar date and averages each source's
//!   intraday forecasts into one point per day.
//! - [`align_rows`] keys by the exact `(date, time)` pair with no averaging,
//!   one spreadsheet row per distinct timestamp.
//!
//! They differ in both key granularity (day vs. day+time) and merge policy
//! (average vs. first-wins) and must not be conflated.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, NaiveTime};

use crate::domain::{format_display_date, Observation, Selection, SourceCollection};

/// One charted series: a selected source's per-date averaged forecasts.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSeries {
    pub name: String,
    /// One value per axis date. Dates the source has no data for hold the
    /// explicit placeholder 0.0, never an error.
    pub points: Vec<f64>,
}

/// The chart view: a shared date axis plus one series per selected source
/// and a single actual-price reference series.
///
/// Every series has exactly `dates.len()` points, in chronological order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartView {
    /// Distinct dates across all selected sources, ascending.
    pub dates: Vec<NaiveDate>,
    /// Display labels (`DD-MM-YY`) in axis order.
    pub labels: Vec<String>,
    /// One series per selected source, in selection order.
    pub series: Vec<SourceSeries>,
    /// Actual prices from the reference source; 0.0 where it has no data.
    pub actual: Vec<f64>,
}

impl ChartView {
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Min and max over every plotted value, for axis bounds.
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in self
            .series
            .iter()
            .flat_map(|s| s.points.iter())
            .chain(self.actual.iter())
        {
            min = min.min(*v);
            max = max.max(*v);
        }
        (min <= max).then_some((min, max))
    }
}

/// Align the selected sources onto a common date axis for charting.
///
/// Per (date, source) group the charted value is the arithmetic mean of all
/// forecast prices recorded that day: sub-daily granularity is deliberately
/// folded away. The actual-price series comes from `reference` alone (the
/// caller names it explicitly; [`Selection::reference_source`] gives the
/// conventional default) under the assumption that actual prices agree
/// across sources for the same date. An empty selection yields an empty
/// view. Inputs are never mutated.
pub fn align_chart(
    selection: &Selection,
    collection: &SourceCollection,
    reference: Option<&str>,
) -> ChartView {
    if selection.is_empty() {
        return ChartView::default();
    }

    // Union of all selected sources' dates, ascending.
    let mut all_dates = BTreeSet::new();
    for name in &selection.sources {
        for obs in collection.get(name).unwrap_or(&[]) {
            all_dates.insert(obs.date);
        }
    }
    let dates: Vec<NaiveDate> = all_dates.into_iter().collect();
    let labels: Vec<String> = dates.iter().copied().map(format_display_date).collect();

    // One averaged series per source, 0.0 where the source skips a date.
    let series: Vec<SourceSeries> = selection
        .sources
        .iter()
        .map(|name| {
            let mut groups: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
            for obs in collection.get(name).unwrap_or(&[]) {
                let group = groups.entry(obs.date).or_insert((0.0, 0));
                group.0 += obs.forecast_price;
                group.1 += 1;
            }
            let points = dates
                .iter()
                .map(|date| match groups.get(date) {
                    Some((sum, count)) => sum / *count as f64,
                    None => 0.0,
                })
                .collect();
            SourceSeries {
                name: name.clone(),
                points,
            }
        })
        .collect();

    // Actual prices: per date, the first observation of the reference
    // source on that date; 0.0 where it has none.
    let reference = reference.or_else(|| selection.reference_source());
    let mut first_actual: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    if let Some(name) = reference {
        for obs in collection.get(name).unwrap_or(&[]) {
            first_actual.entry(obs.date).or_insert(obs.actual_price);
        }
    }
    let actual = dates
        .iter()
        .map(|date| first_actual.get(date).copied().unwrap_or(0.0))
        .collect();

    ChartView {
        dates,
        labels,
        series,
        actual,
    }
}

/// One row of the merged spreadsheet view.
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadsheetRow {
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// From the first selected source supplying this exact timestamp.
    pub actual_price: f64,
    /// One cell per selected source, in selection order. `None` renders as
    /// a placeholder, not zero.
    pub forecasts: Vec<Option<f64>>,
}

/// Merge the selected sources into one row per distinct `(date, time)`.
///
/// No averaging happens here: each cell is that source's forecast at that
/// exact timestamp (the last one, if a source repeats a timestamp), and the
/// actual price is fixed by whichever observation first created the row.
/// Rows come back sorted by date then time.
pub fn align_rows(selection: &Selection, collection: &SourceCollection) -> Vec<SpreadsheetRow> {
    let width = selection.sources.len();
    let mut rows: BTreeMap<(NaiveDate, NaiveTime), SpreadsheetRow> = BTreeMap::new();

    for (column, name) in selection.sources.iter().enumerate() {
        for obs in collection.get(name).unwrap_or(&[]) {
            let row = rows
                .entry((obs.date, obs.time))
                .or_insert_with(|| SpreadsheetRow {
                    date: obs.date,
                    time: obs.time,
                    actual_price: obs.actual_price,
                    forecasts: vec![None; width],
                });
            row.forecasts[column] = Some(obs.forecast_price);
        }
    }

    rows.into_values().collect()
}
