//! HTTP routes of the dashboard service

use crate::config::{CourseBackfill, DashboardConfig};
use crate::error::ApiError;
use crate::forecast_inputs::{collect_requests, ForecastFilters};
use crate::records::{Course, EnrollmentTrend, Faculty, Feedback, Graduation, Student};
use crate::store::RecordStore;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use enrollment_forecast::{AdditiveRegression, ForecastOrchestrator, ForecastPoint};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared, read-only handles for every request
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub orchestrator: Arc<ForecastOrchestrator>,
    pub backfill: CourseBackfill,
}

impl AppState {
    pub fn new(
        store: Arc<dyn RecordStore>,
        orchestrator: ForecastOrchestrator,
        backfill: CourseBackfill,
    ) -> Self {
        Self {
            store,
            orchestrator: Arc::new(orchestrator),
            backfill,
        }
    }

    /// State with the forecast model configured from `config`
    pub fn from_config(
        store: Arc<dyn RecordStore>,
        config: &DashboardConfig,
    ) -> enrollment_forecast::error::Result<Self> {
        let forecast = &config.forecast;
        let model = AdditiveRegression::new(
            forecast.seasonality_order,
            forecast.seasonality_prior_scale,
            forecast.interval_width,
        )?;
        let orchestrator = ForecastOrchestrator::new(model, forecast.fit_timeout())?;

        Ok(Self::new(store, orchestrator, forecast.course_backfill.clone()))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/students", get(students))
        .route("/courses", get(courses))
        .route("/faculty", get(faculty))
        .route("/graduation", get(graduation))
        .route("/feedback", get(feedback))
        .route("/enrollment_trends", get(enrollment_trends))
        .route("/forecast", get(forecast))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn students(State(state): State<AppState>) -> Result<Json<Vec<Student>>, ApiError> {
    Ok(Json(state.store.students().await?))
}

async fn courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, ApiError> {
    Ok(Json(state.store.courses().await?))
}

async fn faculty(State(state): State<AppState>) -> Result<Json<Vec<Faculty>>, ApiError> {
    Ok(Json(state.store.faculty().await?))
}

async fn graduation(State(state): State<AppState>) -> Result<Json<Vec<Graduation>>, ApiError> {
    Ok(Json(state.store.graduation().await?))
}

async fn feedback(State(state): State<AppState>) -> Result<Json<Vec<Feedback>>, ApiError> {
    Ok(Json(state.store.feedback().await?))
}

async fn enrollment_trends(
    State(state): State<AppState>,
) -> Result<Json<Vec<EnrollmentTrend>>, ApiError> {
    Ok(Json(state.store.enrollment_trends().await?))
}

async fn forecast(
    State(state): State<AppState>,
    Query(filters): Query<ForecastFilters>,
) -> Result<Json<Vec<ForecastPoint>>, ApiError> {
    let filters = filters.normalized();
    let requests = collect_requests(state.store.as_ref(), &filters, &state.backfill).await?;
    let outcome = state.orchestrator.run(requests).await?;

    info!(
        program = filters.program.as_deref(),
        department = filters.department.as_deref(),
        points = outcome.points.len(),
        excluded = outcome.failures.len(),
        "forecast served"
    );

    Ok(Json(outcome.points))
}
