//! Error types for the enrollment_forecast crate

use polars::prelude::PolarsError;
use series_math::MathError;
use std::time::Duration;
use thiserror::Error;

/// A series that was requested but left out of the forecast
#[derive(Debug)]
pub struct SeriesFailure {
    /// Series label, e.g. `program enrollment (Computer Science)`
    pub series: String,
    /// Why the series was excluded
    pub error: ForecastError,
}

/// Custom error types for the enrollment_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The series lacks the minimum history (two periods, one positive value)
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// The model could not be fitted to the series
    #[error("Model fit error: {0}")]
    ModelFit(String),

    /// Fitting did not finish within the time budget
    #[error("Forecast for {series} exceeded the {budget:?} fit budget")]
    Timeout { series: String, budget: Duration },

    /// Every requested series failed, or nothing was requested
    #[error("No forecasts generated due to insufficient or invalid data")]
    NoForecastAvailable { failures: Vec<SeriesFailure> },

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl ForecastError {
    /// True for failures that only exclude one series from a forecast
    pub fn is_series_local(&self) -> bool {
        matches!(
            self,
            ForecastError::InsufficientData(_)
                | ForecastError::ModelFit(_)
                | ForecastError::Timeout { .. }
        )
    }

    /// Per-series failures carried by `NoForecastAvailable`
    pub fn failures(&self) -> &[SeriesFailure] {
        match self {
            ForecastError::NoForecastAvailable { failures } => failures,
            _ => &[],
        }
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::DataError(err.to_string())
    }
}

impl From<MathError> for ForecastError {
    fn from(err: MathError) -> Self {
        ForecastError::ModelFit(err.to_string())
    }
}
