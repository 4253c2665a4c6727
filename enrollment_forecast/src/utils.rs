//! Utility functions for the enrollment_forecast crate

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;

/// Date a forecast for `year` is stamped with (the last day of the year)
pub fn period_end(year: i32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 12, 31)
        .ok_or_else(|| ForecastError::DataError(format!("Year {} is out of range", year)))
}

/// The `horizon` years following `last_year`, as period-end dates
pub fn future_periods(last_year: i32, horizon: usize) -> Result<Vec<NaiveDate>> {
    (1..=horizon)
        .map(|step| {
            let step = i32::try_from(step).map_err(|_| {
                ForecastError::InvalidParameter(format!("Horizon {} is too large", horizon))
            })?;
            let year = last_year.checked_add(step).ok_or_else(|| {
                ForecastError::DataError(format!("Year {} + {} overflows", last_year, step))
            })?;
            period_end(year)
        })
        .collect()
}

/// Round to two decimals
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to two decimals and clamp at zero (never yields `-0.0`)
pub fn floor_at_zero(value: f64) -> f64 {
    let rounded = round_cents(value);
    if rounded > 0.0 {
        rounded
    } else {
        0.0
    }
}
