//! # Campus Insight
//!
//! Umbrella crate for the campus insight dashboard backend.
//!
//! - [`series_math`]: least-squares and seasonal feature kernel
//! - [`enrollment_forecast`]: series building, the additive forecast model and
//!   the forecast orchestrator
//! - [`campus_api`]: record stores and the REST service
//!
//! ## Example
//!
//! ```
//! use campus_insight_workspace::forecast::{Observation, ObservationFrame, SeriesKind};
//!
//! let frame = ObservationFrame::from_observations(&[
//!     Observation::new(2022, None, 1.0),
//!     Observation::new(2023, None, 1.0),
//! ])
//! .unwrap();
//! let series = SeriesKind::Graduation.builder().build(&frame).unwrap();
//! assert_eq!(series.len(), 2);
//! ```

pub use campus_api as api;
pub use enrollment_forecast as forecast;
pub use series_math as math;

/// Version of the workspace umbrella crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
