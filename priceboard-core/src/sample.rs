//! Demo data generation.
//!
//! Produces forecast/actual observations with a plausible daily shape so
//! the dashboard can be explored without real uploads. Always invoked
//! explicitly (the `sample` CLI command and tests); never a silent
//! substitute for imported data.

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{parse_compact_time, Observation};

/// Parameters for the generator. Same spec + same seed = same data.
#[derive(Debug, Clone)]
pub struct SampleSpec {
    /// Number of model sources ("model_a", "model_b", …).
    pub sources: usize,
    /// Calendar days per source.
    pub days: u32,
    /// First date of the span.
    pub start: NaiveDate,
    pub seed: u64,
}

impl Default for SampleSpec {
    fn default() -> Self {
        Self {
            sources: 3,
            days: 30,
            start: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid literal date"),
            seed: 42,
        }
    }
}

/// Intraday sample times, compact `HHMM` form.
const SAMPLE_TIMES: [&str; 6] = ["0", "400", "800", "1200", "1600", "2000"];

/// Generate named demo sources.
///
/// Each source shares one underlying actual-price path (a drifting daily
/// curve with an intraday peak) and forecasts it with its own bias and
/// noise level, so the chart shows visibly distinct but related series.
pub fn generate(spec: &SampleSpec) -> Vec<(String, Vec<Observation>)> {
    let mut rng = StdRng::seed_from_u64(spec.seed);

    // One actual path shared by all sources: (date, time) -> price.
    let mut actuals = Vec::new();
    let mut base = 60.0;
    for day in 0..spec.days {
        let date = spec.start + Duration::days(day as i64);
        base += rng.gen_range(-3.0..3.0);
        for (slot, compact) in SAMPLE_TIMES.iter().enumerate() {
            // Evening peak around slot 4 (16:00).
            let shape = 1.0 + 0.25 * (slot as f64 - 1.0) - 0.06 * (slot as f64 - 4.0).powi(2);
            let price = (base * shape.max(0.3) + rng.gen_range(-2.0..2.0)).max(0.5);
            let time = parse_compact_time(compact).expect("valid literal time");
            actuals.push((date, time, price));
        }
    }

    (0..spec.sources)
        .map(|i| {
            let name = format!("model_{}", (b'a' + (i % 26) as u8) as char);
            let bias = rng.gen_range(-4.0..4.0);
            let noise = rng.gen_range(1.0..6.0);
            let observations = actuals
                .iter()
                .map(|&(date, time, actual)| Observation {
                    date,
                    time,
                    forecast_price: actual + bias + rng.gen_range(-noise..noise),
                    actual_price: actual,
                })
                .collect();
            (name, observations)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_shape() {
        let spec = SampleSpec {
            sources: 2,
            days: 5,
            ..SampleSpec::default()
        };
        let generated = generate(&spec);
        assert_eq!(generated.len(), 2);
        assert_eq!(generated[0].0, "model_a");
        assert_eq!(generated[1].0, "model_b");
        for (_, observations) in &generated {
            assert_eq!(observations.len(), 5 * SAMPLE_TIMES.len());
            assert!(observations.iter().all(|o| !o.is_void()));
        }
    }

    #[test]
    fn same_seed_is_deterministic() {
        let spec = SampleSpec::default();
        assert_eq!(generate(&spec), generate(&spec));
    }

    #[test]
    fn different_seeds_differ() {
        let a = generate(&SampleSpec::default());
        let b = generate(&SampleSpec {
            seed: 7,
            ..SampleSpec::default()
        });
        assert_ne!(a, b);
    }

    #[test]
    fn all_sources_share_the_actual_path() {
        let generated = generate(&SampleSpec::default());
        let first = &generated[0].1;
        let second = &generated[1].1;
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.date, b.date);
            assert_eq!(a.time, b.time);
            assert_eq!(a.actual_price, b.actual_price);
        }
    }
}
