//! Selection and source collection — the inputs to every view.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::observation::Observation;

/// Inclusive calendar date range for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range, swapping the endpoints if given in reverse.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The user's current choice of sources and optional date range.
///
/// Owned by the presentation layer and passed by reference into the views on
/// every recomputation; the views never mutate it. Source order is the
/// user's selection order and determines series/column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub sources: Vec<String>,
    pub range: Option<DateRange>,
}

impl Selection {
    pub fn new(sources: Vec<String>) -> Self {
        Self {
            sources,
            range: None,
        }
    }

    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// The default actual-price reference: the first selected source.
    pub fn reference_source(&self) -> Option<&str> {
        self.sources.first().map(String::as_str)
    }
}

/// Mapping from source name to its observations.
///
/// Insertion order within a source carries no meaning; the views re-sort by
/// date. A `BTreeMap` keeps name iteration deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceCollection {
    sources: BTreeMap<String, Vec<Observation>>,
}

impl SourceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a source, replacing any existing one with the same name.
    pub fn insert(&mut self, name: impl Into<String>, observations: Vec<Observation>) {
        self.sources.insert(name.into(), observations);
    }

    pub fn get(&self, name: &str) -> Option<&[Observation]> {
        self.sources.get(name).map(Vec::as_slice)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Restrict every source to observations inside the range.
    ///
    /// `None` returns the collection unchanged. This is the external date
    /// filter applied by the controller before alignment and aggregation;
    /// the views themselves never filter.
    pub fn filtered(&self, range: Option<&DateRange>) -> SourceCollection {
        let Some(range) = range else {
            return self.clone();
        };
        let sources = self
            .sources
            .iter()
            .map(|(name, obs)| {
                let kept: Vec<Observation> = obs
                    .iter()
                    .filter(|o| range.contains(o.date))
                    .cloned()
                    .collect();
                (name.clone(), kept)
            })
            .collect();
        SourceCollection { sources }
    }
}

impl FromIterator<(String, Vec<Observation>)> for SourceCollection {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Observation>)>>(iter: I) -> Self {
        Self {
            sources: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{parse_compact_date, parse_compact_time};

    fn obs(date: &str, forecast: f64) -> Observation {
        Observation {
            date: parse_compact_date(date).unwrap(),
            time: parse_compact_time("800").unwrap(),
            forecast_price: forecast,
            actual_price: forecast - 1.0,
        }
    }

    fn d(s: &str) -> NaiveDate {
        parse_compact_date(s).unwrap()
    }

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let range = DateRange::new(d("20240101"), d("20240131"));
        assert!(range.contains(d("20240101")));
        assert!(range.contains(d("20240131")));
        assert!(!range.contains(d("20240201")));
    }

    #[test]
    fn reversed_endpoints_are_swapped() {
        let range = DateRange::new(d("20240131"), d("20240101"));
        assert_eq!(range.start, d("20240101"));
        assert_eq!(range.end, d("20240131"));
    }

    #[test]
    fn filtered_keeps_only_in_range_observations() {
        let mut collection = SourceCollection::new();
        collection.insert(
            "model_a",
            vec![obs("20240101", 100.0), obs("20240215", 110.0)],
        );

        let range = DateRange::new(d("20240101"), d("20240131"));
        let filtered = collection.filtered(Some(&range));
        assert_eq!(filtered.get("model_a").unwrap().len(), 1);

        // No range: untouched.
        let untouched = collection.filtered(None);
        assert_eq!(untouched, collection);
    }

    #[test]
    fn filtered_may_leave_a_source_empty() {
        let mut collection = SourceCollection::new();
        collection.insert("model_a", vec![obs("20240601", 100.0)]);

        let range = DateRange::new(d("20240101"), d("20240131"));
        let filtered = collection.filtered(Some(&range));
        assert!(filtered.get("model_a").unwrap().is_empty());
    }

    #[test]
    fn selection_reference_is_first_source() {
        let sel = Selection::new(vec!["b".into(), "a".into()]);
        assert_eq!(sel.reference_source(), Some("b"));
        assert_eq!(Selection::default().reference_source(), None);
    }
}
