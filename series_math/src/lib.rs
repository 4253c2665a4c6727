//! # Series Math
//!
//! Numeric building blocks for fitting additive trend + seasonality models
//! to short yearly series. This crate provides a ridge-regularised least
//! squares solver, Fourier seasonal features and a few summary statistics.

use thiserror::Error;

pub mod fourier;
pub mod regression;
pub mod stats;

/// Errors that can occur in series calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for series math operations
pub type Result<T> = std::result::Result<T, MathError>;

pub use fourier::fourier_terms;
pub use regression::{FittedRegression, RidgeRegression};
