//! Forecasting models for yearly series

use crate::error::{ForecastError, Result};
use crate::series::HistoricalSeries;
use chrono::NaiveDate;
use std::fmt::Debug;

/// Forecast result containing predicted values
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    /// Period-end date of every forecast step
    periods: Vec<NaiveDate>,
    /// Forecasted values
    values: Vec<f64>,
    /// Lower/upper uncertainty bounds (optional)
    intervals: Option<Vec<(f64, f64)>>,
}

impl ForecastResult {
    /// Create a new forecast result
    pub fn new(periods: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        if values.len() != periods.len() {
            return Err(ForecastError::DataError(format!(
                "Values length ({}) doesn't match periods length ({})",
                values.len(),
                periods.len()
            )));
        }

        Ok(Self {
            periods,
            values,
            intervals: None,
        })
    }

    /// Create a new forecast result with uncertainty intervals
    pub fn new_with_intervals(
        periods: Vec<NaiveDate>,
        values: Vec<f64>,
        intervals: Vec<(f64, f64)>,
    ) -> Result<Self> {
        if values.len() != intervals.len() {
            return Err(ForecastError::DataError(format!(
                "Values length ({}) doesn't match intervals length ({})",
                values.len(),
                intervals.len()
            )));
        }

        let mut result = Self::new(periods, values)?;
        result.intervals = Some(intervals);
        Ok(result)
    }

    /// Get the forecasted values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the forecast periods
    pub fn periods(&self) -> &[NaiveDate] {
        &self.periods
    }

    /// Get the number of periods forecasted
    pub fn horizons(&self) -> usize {
        self.values.len()
    }

    /// Get the uncertainty intervals, if available
    pub fn intervals(&self) -> Option<&[(f64, f64)]> {
        self.intervals.as_deref()
    }

    /// `(period, value)` pairs in forecast order
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.periods.iter().copied().zip(self.values.iter().copied())
    }
}

/// Trained forecast model
pub trait TrainedForecastModel: Debug {
    /// Forecast the `horizon` periods after the training history
    fn predict(&self, horizon: usize) -> Result<ForecastResult>;

    /// In-sample fitted values, one per training period
    fn fitted_values(&self) -> &[f64];

    /// Name of the model
    fn name(&self) -> &str;
}

/// Forecast model that can be fitted to a historical series
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Fit the model to a series
    fn fit(&self, series: &HistoricalSeries) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

pub mod additive;
