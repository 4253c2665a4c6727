//! Forecast orchestration across independent series
//!
//! Each requested series owns its observation frame and is fitted on its own
//! blocking worker. Workers start together and are joined against a single
//! deadline; a series that fails or runs out of time is recorded and left
//! out, the others are still returned. A worker past the deadline stops at
//! its next step instead of finishing the pipeline.

use crate::data::ObservationFrame;
use crate::error::{ForecastError, Result, SeriesFailure};
use crate::models::additive::AdditiveRegression;
use crate::models::{ForecastModel, TrainedForecastModel};
use crate::point::{ForecastPoint, SeriesKind};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Number of future periods forecast for every series
pub const FORECAST_HORIZON: usize = 3;

/// One series to forecast, with the observations it is built from
#[derive(Debug, Clone)]
pub struct SeriesRequest {
    pub kind: SeriesKind,
    pub frame: ObservationFrame,
}

impl SeriesRequest {
    pub fn new(kind: SeriesKind, frame: ObservationFrame) -> Self {
        Self { kind, frame }
    }
}

/// Points from every successful series plus the series that were left out
#[derive(Debug)]
pub struct ForecastOutcome {
    pub points: Vec<ForecastPoint>,
    pub failures: Vec<SeriesFailure>,
}

/// Runs the build → fit → predict pipeline for up to three series
#[derive(Debug, Clone)]
pub struct ForecastOrchestrator<M = AdditiveRegression> {
    model: Arc<M>,
    fit_timeout: Duration,
}

impl<M> ForecastOrchestrator<M>
where
    M: ForecastModel + Send + Sync + 'static,
{
    /// Create an orchestrator fitting `model` within `fit_timeout` per call
    pub fn new(model: M, fit_timeout: Duration) -> Result<Self> {
        if fit_timeout.is_zero() {
            return Err(ForecastError::InvalidParameter(
                "Fit timeout must be positive".to_string(),
            ));
        }

        Ok(Self {
            model: Arc::new(model),
            fit_timeout,
        })
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn fit_timeout(&self) -> Duration {
        self.fit_timeout
    }

    /// Forecast one series synchronously
    pub fn forecast_series(&self, request: &SeriesRequest) -> Result<Vec<ForecastPoint>> {
        forecast_series(self.model.as_ref(), request, None)
    }

    /// Forecast every request in parallel and assemble one response
    ///
    /// Fails with `NoForecastAvailable` when nothing was requested or every
    /// series failed.
    pub async fn run(&self, requests: Vec<SeriesRequest>) -> Result<ForecastOutcome> {
        if requests.is_empty() {
            return Err(ForecastError::NoForecastAvailable {
                failures: Vec::new(),
            });
        }

        let deadline = Instant::now() + self.fit_timeout;
        let workers: Vec<_> = requests
            .into_iter()
            .map(|request| {
                let series = request.kind.to_string();
                let model = Arc::clone(&self.model);
                let budget = FitBudget {
                    deadline: deadline.into_std(),
                    budget: self.fit_timeout,
                };
                let handle = tokio::task::spawn_blocking(move || {
                    forecast_series(model.as_ref(), &request, Some(&budget))
                });
                (series, handle)
            })
            .collect();

        let mut points = Vec::new();
        let mut failures = Vec::new();
        for (series, handle) in workers {
            let result = match tokio::time::timeout_at(deadline, handle).await {
                Ok(Ok(result)) => result,
                Ok(Err(join_error)) => Err(ForecastError::ModelFit(format!(
                    "worker for {} stopped: {}",
                    series, join_error
                ))),
                Err(_) => Err(ForecastError::Timeout {
                    series: series.clone(),
                    budget: self.fit_timeout,
                }),
            };

            match result {
                Ok(mut series_points) => {
                    info!(series = %series, points = series_points.len(), "series forecast");
                    points.append(&mut series_points);
                }
                Err(error) => {
                    warn!(series = %series, error = %error, "series excluded from forecast");
                    failures.push(SeriesFailure { series, error });
                }
            }
        }

        if points.is_empty() {
            return Err(ForecastError::NoForecastAvailable { failures });
        }

        Ok(ForecastOutcome { points, failures })
    }
}

impl ForecastOrchestrator<AdditiveRegression> {
    /// Orchestrator with the default additive model
    pub fn with_default_model(fit_timeout: Duration) -> Result<Self> {
        Self::new(AdditiveRegression::default(), fit_timeout)
    }
}

/// Deadline shared by the workers of one `run`
#[derive(Debug, Clone, Copy)]
struct FitBudget {
    deadline: std::time::Instant,
    budget: Duration,
}

impl FitBudget {
    /// Stop a worker whose result would be discarded anyway
    fn check(&self, kind: &SeriesKind) -> Result<()> {
        if std::time::Instant::now() >= self.deadline {
            return Err(ForecastError::Timeout {
                series: kind.to_string(),
                budget: self.budget,
            });
        }
        Ok(())
    }
}

fn forecast_series<M: ForecastModel>(
    model: &M,
    request: &SeriesRequest,
    budget: Option<&FitBudget>,
) -> Result<Vec<ForecastPoint>> {
    let check = || budget.map_or(Ok(()), |b| b.check(&request.kind));

    let series = request.kind.builder().build(&request.frame)?;
    debug!(
        series = %request.kind,
        periods = series.len(),
        last_period = series.last_period(),
        model = model.name(),
        "fitting series"
    );

    check()?;
    let trained = model.fit(&series)?;
    check()?;
    let forecast = trained.predict(FORECAST_HORIZON)?;

    Ok(forecast
        .iter()
        .map(|(year, value)| request.kind.point(year, value))
        .collect())
}
