//! Summary statistics — pure functions over the pooled selection.
//!
//! All selected sources' observations are flattened into one sequence and
//! aggregated together; nothing is computed per-source and then combined.
//! An empty pool is a defined degenerate case (the dashboard supports "no
//! source selected"), never an error.

use serde::Serialize;

use crate::domain::{Observation, Selection, SourceCollection};

/// Aggregate forecast-quality metrics for the current selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatsSummary {
    /// Pooled observation count.
    pub nobs: usize,
    /// Mean absolute percentage error, already scaled to percent.
    ///
    /// Observations with a zero actual price are excluded from the mean;
    /// dividing by zero would turn the whole metric infinite.
    /// `mape_excluded` counts what was skipped.
    pub mape: f64,
    /// Observations excluded from MAPE because `actual_price == 0`.
    pub mape_excluded: usize,
    /// Root mean squared error between forecast and actual.
    pub rmse: f64,
    pub peak_forecast: f64,
    pub peak_actual: f64,
    pub average_forecast: f64,
    pub average_actual: f64,
    /// Plain sums of forecast/actual prices — a crude energy integral that
    /// assumes uniform time steps, with no weighting by interval length.
    pub energy_forecast: f64,
    pub energy_actual: f64,
}

impl StatsSummary {
    /// Compute all metrics over the pooled observations of `selection`.
    ///
    /// Pure function of its inputs: repeated calls with the same selection
    /// and collection return identical results, and nothing is mutated.
    pub fn compute(selection: &Selection, collection: &SourceCollection) -> Self {
        let pooled: Vec<&Observation> = selection
            .sources
            .iter()
            .flat_map(|name| collection.get(name).unwrap_or(&[]))
            .collect();

        if pooled.is_empty() {
            return Self::default();
        }

        let nobs = pooled.len();
        let mut sum_forecast = 0.0;
        let mut sum_actual = 0.0;
        let mut sum_abs_percent_error = 0.0;
        let mut percent_error_terms = 0usize;
        let mut sum_squared_error = 0.0;
        let mut peak_forecast = f64::NEG_INFINITY;
        let mut peak_actual = f64::NEG_INFINITY;

        for obs in &pooled {
            let f = obs.forecast_price;
            let a = obs.actual_price;
            sum_forecast += f;
            sum_actual += a;
            if a != 0.0 {
                sum_abs_percent_error += ((f - a) / a).abs();
                percent_error_terms += 1;
            }
            sum_squared_error += (f - a) * (f - a);
            peak_forecast = peak_forecast.max(f);
            peak_actual = peak_actual.max(a);
        }

        let mape = if percent_error_terms > 0 {
            sum_abs_percent_error / percent_error_terms as f64 * 100.0
        } else {
            0.0
        };

        Self {
            nobs,
            mape,
            mape_excluded: nobs - percent_error_terms,
            rmse: (sum_squared_error / nobs as f64).sqrt(),
            peak_forecast,
            peak_actual,
            average_forecast: sum_forecast / nobs as f64,
            average_actual: sum_actual / nobs as f64,
            energy_forecast: sum_forecast,
            energy_actual: sum_actual,
        }
    }

    /// The flat label → formatted-value record consumed by the summary
    /// table. Every numeric field is fixed to two decimals; NOBS stays an
    /// integer.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("NOBS", self.nobs.to_string()),
            ("MAPE", format!("{:.2}", self.mape)),
            ("RMSE", format!("{:.2}", self.rmse)),
            ("PEAK_FORECAST", format!("{:.2}", self.peak_forecast)),
            ("PEAK_ACTUAL", format!("{:.2}", self.peak_actual)),
            ("AVERAGE_FORECAST", format!("{:.2}", self.average_forecast)),
            ("AVERAGE_ACTUAL", format!("{:.2}", self.average_actual)),
            ("ENERGY_FORECAST", format!("{:.2}", self.energy_forecast)),
            ("ENERGY_ACTUAL", format!("{:.2}", self.energy_actual)),
        ]
    }
}
