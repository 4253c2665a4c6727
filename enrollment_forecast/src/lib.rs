//! # Enrollment Forecast
//!
//! Short-horizon forecasts for the campus insight dashboard: program
//! enrollment, department course enrollment and graduation counts.
//!
//! ## Pipeline
//!
//! - Raw rows are reshaped into an [`ObservationFrame`] of `(period, category, value)`
//! - A [`SeriesBuilder`] filters one category, aggregates per year and validates
//!   the history (two distinct years, at least one positive value)
//! - An [`AdditiveRegression`] (trend + yearly seasonality) is fitted and predicts
//!   the next three years, floored at zero and rounded to cents
//! - The [`ForecastOrchestrator`] runs up to three series in parallel and keeps
//!   whatever succeeded
//!
//! ## Quick Start
//!
//! ```rust
//! use enrollment_forecast::{ForecastModel, Observation, ObservationFrame};
//! use enrollment_forecast::{AdditiveRegression, SeriesKind, TrainedForecastModel};
//!
//! let frame = ObservationFrame::from_observations(&[
//!     Observation::new(2021, Some("Physics"), 100.0),
//!     Observation::new(2022, Some("Physics"), 120.0),
//!     Observation::new(2023, Some("Physics"), 150.0),
//! ])?;
//!
//! let kind = SeriesKind::ProgramEnrollment { program: "Physics".to_string() };
//! let series = kind.builder().build(&frame)?;
//! let forecast = AdditiveRegression::default().fit(&series)?.predict(3)?;
//! assert_eq!(forecast.horizons(), 3);
//! # Ok::<(), enrollment_forecast::ForecastError>(())
//! ```

pub mod data;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod point;
pub mod series;
pub mod utils;

// Re-export commonly used types
pub use crate::data::{Observation, ObservationFrame};
pub use crate::error::{ForecastError, SeriesFailure};
pub use crate::models::additive::{AdditiveRegression, TrainedAdditiveRegression};
pub use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};
pub use crate::orchestrator::{
    ForecastOrchestrator, ForecastOutcome, SeriesRequest, FORECAST_HORIZON,
};
pub use crate::point::{
    DepartmentForecast, ForecastPoint, GraduationForecast, ProgramForecast, SeriesKind,
};
pub use crate::series::{Aggregation, GroupingKey, HistoricalSeries, SeriesBuilder, SeriesPoint};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
