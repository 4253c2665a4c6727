//! Error types for the campus_api crate

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use enrollment_forecast::ForecastError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Failures reading from a record store
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or did not answer
    #[error("Record store unavailable: {0}")]
    Connectivity(String),

    /// A row could not be turned into a record
    #[error("Malformed record: {0}")]
    Decode(String),
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::Decode(_)
            | sqlx::Error::TypeNotFound { .. } => StoreError::Decode(err.to_string()),
            other => StoreError::Connectivity(other.to_string()),
        }
    }
}

impl From<csv::Error> for StoreError {
    fn from(err: csv::Error) -> Self {
        match err.kind() {
            csv::ErrorKind::Io(_) => StoreError::Connectivity(err.to_string()),
            _ => StoreError::Decode(err.to_string()),
        }
    }
}

/// Invalid or unreadable service configuration
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Could not load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors surfaced by the HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Store(StoreError::Connectivity(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Store(StoreError::Decode(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Forecast(ForecastError::NoForecastAvailable { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Forecast(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "request failed");
        }

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
