//! Summary statistics over plain slices

use crate::{MathError, Result};

/// Arithmetic mean
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Mean of an empty series is undefined".to_string(),
        ));
    }

    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Standard deviation with `ddof` degrees of freedom removed
///
/// Returns zero when there are no degrees of freedom left, so an exactly
/// determined fit reports no spread instead of failing.
pub fn std_dev(values: &[f64], ddof: usize) -> Result<f64> {
    let avg = mean(values)?;
    if values.len() <= ddof {
        return Ok(0.0);
    }

    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>()
        / (values.len() - ddof) as f64;

    Ok(variance.sqrt())
}

/// Largest absolute value, or zero for an empty slice
pub fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
}
