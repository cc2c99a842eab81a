//! Property tests for view invariants.
//!
//! Uses proptest to verify:
//! 1. Chart shape — every series (and the actual series) spans the axis
//! 2. Ordering — the date axis is strictly ascending
//! 3. Row alignment — one row per distinct (date, time), cell width fixed
//! 4. Pooling — NOBS equals the sum of the selected sources' row counts
//! 5. Purity — recomputation yields identical output

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use priceboard_core::domain::{parse_compact_time, Observation, Selection, SourceCollection};
use priceboard_core::{align_chart, align_rows, StatsSummary};
use proptest::prelude::*;

const TIMES: [&str; 4] = ["0", "800", "1200", "1600"];

fn arb_observation() -> impl Strategy<Value = Observation> {
    let base = NaiveDate::from_ymd_opt(2023, 11, 15).unwrap();
    // Day offsets deliberately cross the 2023/2024 boundary.
    (0i64..120, 0usize..TIMES.len(), -50.0..300.0_f64, -50.0..300.0_f64).prop_map(
        move |(day, slot, forecast, actual)| Observation {
            date: base + Duration::days(day),
            time: parse_compact_time(TIMES[slot]).unwrap(),
            forecast_price: forecast,
            actual_price: actual,
        },
    )
}

fn arb_sources() -> impl Strategy<Value = Vec<(String, Vec<Observation>)>> {
    prop::collection::vec(prop::collection::vec(arb_observation(), 0..40), 1..4).prop_map(
        |groups| {
            groups
                .into_iter()
                .enumerate()
                .map(|(i, observations)| (format!("source_{i}"), observations))
                .collect()
        },
    )
}

fn build(sources: &[(String, Vec<Observation>)]) -> (Selection, SourceCollection) {
    let selection = Selection::new(sources.iter().map(|(name, _)| name.clone()).collect());
    let collection = sources.iter().cloned().collect();
    (selection, collection)
}

proptest! {
    /// Every output series has exactly one point per axis date.
    #[test]
    fn chart_series_span_the_axis(sources in arb_sources()) {
        let (selection, collection) = build(&sources);
        let view = align_chart(&selection, &collection, selection.reference_source());

        prop_assert_eq!(view.labels.len(), view.dates.len());
        prop_assert_eq!(view.actual.len(), view.dates.len());
        prop_assert_eq!(view.series.len(), selection.sources.len());
        for series in &view.series {
            prop_assert_eq!(series.points.len(), view.dates.len());
        }
    }

    /// The axis is strictly ascending in true chronological order.
    #[test]
    fn chart_axis_is_strictly_ascending(sources in arb_sources()) {
        let (selection, collection) = build(&sources);
        let view = align_chart(&selection, &collection, selection.reference_source());
        for pair in view.dates.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    /// One spreadsheet row per distinct (date, time) pair, each with one
    /// cell per selected source.
    #[test]
    fn rows_match_distinct_timestamps(sources in arb_sources()) {
        let (selection, collection) = build(&sources);
        let rows = align_rows(&selection, &collection);

        let distinct: BTreeSet<_> = sources
            .iter()
            .flat_map(|(_, observations)| observations.iter().map(|o| (o.date, o.time)))
            .collect();
        prop_assert_eq!(rows.len(), distinct.len());
        for row in &rows {
            prop_assert_eq!(row.forecasts.len(), selection.sources.len());
            prop_assert!(row.forecasts.iter().any(Option::is_some));
        }
    }

    /// NOBS pools every selected source's observations.
    #[test]
    fn stats_pool_everything(sources in arb_sources()) {
        let (selection, collection) = build(&sources);
        let stats = StatsSummary::compute(&selection, &collection);

        let expected: usize = sources.iter().map(|(_, observations)| observations.len()).sum();
        prop_assert_eq!(stats.nobs, expected);
        prop_assert!(stats.mape_excluded <= stats.nobs);
    }

    /// The views are pure functions: recomputation is identical.
    #[test]
    fn recomputation_is_identical(sources in arb_sources()) {
        let (selection, collection) = build(&sources);

        let chart = align_chart(&selection, &collection, selection.reference_source());
        prop_assert_eq!(
            &chart,
            &align_chart(&selection, &collection, selection.reference_source())
        );
        prop_assert_eq!(align_rows(&selection, &collection), align_rows(&selection, &collection));
        prop_assert_eq!(
            StatsSummary::compute(&selection, &collection),
            StatsSummary::compute(&selection, &collection)
        );
    }
}
