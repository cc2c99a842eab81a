//! Observation — the fundamental data unit.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One timestamped forecast/actual price pair belonging to a named source.
///
/// Dates and times arrive from uploads in compact form (`YYYYMMDD` and
/// `HHMM`, e.g. "800" for 08:00) and are parsed at ingestion; inside the
/// core they are always proper calendar values. Display forms are
/// `DD-MM-YY` and zero-padded `HH:MM`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub forecast_price: f64,
    pub actual_price: f64,
}

impl Observation {
    /// Returns true if either price is NaN or infinite.
    ///
    /// Ingestion rejects such rows; nothing non-finite reaches the views.
    pub fn is_void(&self) -> bool {
        !self.forecast_price.is_finite() || !self.actual_price.is_finite()
    }

    /// Date in the dashboard's display form, e.g. "05-01-24".
    pub fn display_date(&self) -> String {
        format_display_date(self.date)
    }

    /// Time in the dashboard's display form, e.g. "08:00".
    pub fn display_time(&self) -> String {
        self.time.format("%H:%M").to_string()
    }
}

/// Format a date as `DD-MM-YY` for chart labels and spreadsheet cells.
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%d-%m-%y").to_string()
}

/// Parse a compact 8-digit `YYYYMMDD` date string.
///
/// Exactly eight ASCII digits are required; anything else (including a
/// digit string that is not a real calendar date) returns `None`.
pub fn parse_compact_date(s: &str) -> Option<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y%m%d").ok()
}

/// Parse a compact `HHMM` time string (1-4 digits, no separator).
///
/// "800" means 08:00 and "0" means midnight; hour and minute must be in
/// range. Seconds do not exist in this format.
pub fn parse_compact_time(s: &str) -> Option<NaiveTime> {
    if s.is_empty() || s.len() > 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let packed: u32 = s.parse().ok()?;
    NaiveTime::from_hms_opt(packed / 100, packed % 100, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(date: &str, time: &str, forecast: f64, actual: f64) -> Observation {
        Observation {
            date: parse_compact_date(date).unwrap(),
            time: parse_compact_time(time).unwrap(),
            forecast_price: forecast,
            actual_price: actual,
        }
    }

    #[test]
    fn compact_date_parses_and_displays() {
        let o = obs("20240105", "800", 100.0, 98.0);
        assert_eq!(o.display_date(), "05-01-24");
        assert_eq!(o.display_time(), "08:00");
    }

    #[test]
    fn compact_date_rejects_wrong_length_and_non_digits() {
        assert!(parse_compact_date("2024015").is_none());
        assert!(parse_compact_date("202401055").is_none());
        assert!(parse_compact_date("2024-1-5").is_none());
        assert!(parse_compact_date("20241301").is_none()); // month 13
    }

    #[test]
    fn compact_time_handles_short_forms() {
        assert_eq!(parse_compact_time("0"), NaiveTime::from_hms_opt(0, 0, 0));
        assert_eq!(parse_compact_time("30"), NaiveTime::from_hms_opt(0, 30, 0));
        assert_eq!(parse_compact_time("800"), NaiveTime::from_hms_opt(8, 0, 0));
        assert_eq!(
            parse_compact_time("2359"),
            NaiveTime::from_hms_opt(23, 59, 0)
        );
    }

    #[test]
    fn compact_time_rejects_out_of_range() {
        assert!(parse_compact_time("2400").is_none());
        assert!(parse_compact_time("1275").is_none());
        assert!(parse_compact_time("").is_none());
        assert!(parse_compact_time("08:0").is_none());
    }

    #[test]
    fn observation_detects_void_prices() {
        let mut o = obs("20240105", "800", 100.0, 98.0);
        assert!(!o.is_void());
        o.forecast_price = f64::NAN;
        assert!(o.is_void());
    }

    #[test]
    fn observation_serialization_roundtrip() {
        let o = obs("20240105", "1230", 101.5, 99.25);
        let json = serde_json::to_string(&o).unwrap();
        let deser: Observation = serde_json::from_str(&json).unwrap();
        assert_eq!(o, deser);
    }
}
