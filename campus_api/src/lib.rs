//! # Campus API
//!
//! Read-only REST service for the campus insight dashboard.
//!
//! - One GET endpoint per record table (`/students`, `/courses`, `/faculty`,
//!   `/graduation`, `/feedback`, `/enrollment_trends`), returning every row
//! - `/forecast?program=..&department=..` returning three years of program
//!   enrollment, department course enrollment and graduation forecasts
//!
//! Records come from a [`RecordStore`]: PostgreSQL in production, or a
//! directory of CSV exports.

pub mod config;
pub mod error;
pub mod forecast_inputs;
pub mod logging;
pub mod records;
pub mod routes;
pub mod store;

pub use crate::config::{ConfigOverrides, DashboardConfig};
pub use crate::error::{ApiError, SettingsError, StoreError};
pub use crate::forecast_inputs::ForecastFilters;
pub use crate::routes::{router, AppState};
pub use crate::store::{open_store, CsvRecordStore, PgRecordStore, RecordStore};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
