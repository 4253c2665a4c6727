//! Fourier features for periodic (seasonal) components

use crate::{MathError, Result};
use std::f64::consts::PI;

/// Seasonal features of `position` for a cycle of length `period`
///
/// Returns `2 * order` values laid out as `sin(1), cos(1), sin(2), cos(2), ...`
/// where `k` in `sin(k)` is the harmonic. Order zero yields no features.
pub fn fourier_terms(position: f64, period: f64, order: usize) -> Result<Vec<f64>> {
    if !period.is_finite() || period <= 0.0 {
        return Err(MathError::InvalidInput(
            "Seasonal period must be positive".to_string(),
        ));
    }

    if !position.is_finite() {
        return Err(MathError::InvalidInput(
            "Seasonal position must be finite".to_string(),
        ));
    }

    let mut terms = Vec::with_capacity(2 * order);
    for harmonic in 1..=order {
        let angle = 2.0 * PI * harmonic as f64 * position / period;
        terms.push(angle.sin());
        terms.push(angle.cos());
    }

    Ok(terms)
}
