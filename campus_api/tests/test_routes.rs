mod common;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use campus_api::records::{
    Course, CourseCount, EnrollmentTrend, Faculty, Feedback, Graduation, GraduationYear, Student,
    TrendPoint,
};
use campus_api::store::RecordStore;
use campus_api::{router, AppState, CsvRecordStore, DashboardConfig, StoreError};
use common::{get_json, graduation_csv, seeded_dir, write_table, GRADUATION_HEADER};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;

fn csv_app(dir: &Path) -> axum::Router {
    let store = Arc::new(CsvRecordStore::new(dir));
    router(AppState::from_config(store, &DashboardConfig::default()).unwrap())
}

/// A store whose server is down
struct UnreachableStore;

fn unreachable<T>() -> campus_api::error::Result<T> {
    Err(StoreError::Connectivity("connection refused".to_string()))
}

#[async_trait]
impl RecordStore for UnreachableStore {
    async fn students(&self) -> campus_api::error::Result<Vec<Student>> {
        unreachable()
    }
    async fn courses(&self) -> campus_api::error::Result<Vec<Course>> {
        unreachable()
    }
    async fn faculty(&self) -> campus_api::error::Result<Vec<Faculty>> {
        unreachable()
    }
    async fn graduation(&self) -> campus_api::error::Result<Vec<Graduation>> {
        unreachable()
    }
    async fn feedback(&self) -> campus_api::error::Result<Vec<Feedback>> {
        unreachable()
    }
    async fn enrollment_trends(&self) -> campus_api::error::Result<Vec<EnrollmentTrend>> {
        unreachable()
    }
    async fn trend_points(&self) -> campus_api::error::Result<Vec<TrendPoint>> {
        unreachable()
    }
    async fn course_counts(&self) -> campus_api::error::Result<Vec<CourseCount>> {
        unreachable()
    }
    async fn graduation_years(&self) -> campus_api::error::Result<Vec<GraduationYear>> {
        unreachable()
    }
    async fn ping(&self) -> campus_api::error::Result<()> {
        unreachable()
    }
    fn describe(&self) -> String {
        "unreachable".to_string()
    }
}

fn assert_close(value: &Value, want: f64) {
    let got = value.as_f64().unwrap();
    assert!((got - want).abs() < 0.02, "{} vs {}", got, want);
}

#[tokio::test]
async fn test_students_endpoint_returns_every_row() {
    let dir = seeded_dir();
    let (status, body) = get_json(csv_app(dir.path()), "/students").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(
        body[0],
        json!({
            "student_id": "S001",
            "name": "Alice Moreau",
            "gender": "Female",
            "age": 20,
            "program": "Physics",
            "semester": 3,
            "enrollment_year": 2022,
            "enrollment_status": "Active"
        })
    );
}

#[tokio::test]
async fn test_table_endpoints() {
    let dir = seeded_dir();
    let cases = [
        ("/courses", 3),
        ("/faculty", 2),
        ("/graduation", 9),
        ("/feedback", 2),
        ("/enrollment_trends", 6),
    ];

    for (uri, rows) in cases {
        let (status, body) = get_json(csv_app(dir.path()), uri).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body.as_array().unwrap().len(), rows, "{}", uri);
    }
}

#[tokio::test]
async fn test_missing_comment_is_null() {
    let dir = seeded_dir();
    let (_, body) = get_json(csv_app(dir.path()), "/feedback").await;

    assert_eq!(body[0]["comments"], json!("Clear lectures"));
    assert_eq!(body[1]["comments"], Value::Null);
}

#[tokio::test]
async fn test_forecast_with_both_filters() {
    let dir = seeded_dir();
    let (status, body) = get_json(
        csv_app(dir.path()),
        "/forecast?program=Physics&department=Science",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let points = body.as_array().unwrap();
    assert_eq!(points.len(), 9);

    for point in &points[0..3] {
        let object = point.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert_eq!(object["program"], json!("Physics"));
        assert!(object["predicted_enrollment"].as_f64().unwrap() > 150.0);
    }

    // Backfilled history is 80, 85, 90, 95 for 2021..=2024
    let years: Vec<&str> = points[3..6]
        .iter()
        .map(|p| p["year"].as_str().unwrap())
        .collect();
    assert_eq!(years, vec!["2025-12-31", "2026-12-31", "2027-12-31"]);
    for (point, want) in points[3..6].iter().zip([100.0, 105.0, 110.0]) {
        assert_eq!(point["department"], json!("Science"));
        assert_close(&point["predicted_course_enrollment"], want);
        assert!(point.get("program").is_none());
    }

    for (point, want) in points[6..9].iter().zip([5.0, 6.0, 7.0]) {
        assert_eq!(point.as_object().unwrap().len(), 2);
        assert_close(&point["predicted_graduates"], want);
    }
    assert_eq!(points[6]["year"], json!("2024-12-31"));
}

#[tokio::test]
async fn test_forecast_without_filters_is_graduation_only() {
    let dir = seeded_dir();
    let (status, body) = get_json(csv_app(dir.path()), "/forecast").await;

    assert_eq!(status, StatusCode::OK);
    let points = body.as_array().unwrap();
    assert_eq!(points.len(), 3);
    assert!(points.iter().all(|p| p.get("predicted_graduates").is_some()));
}

#[tokio::test]
async fn test_blank_filters_are_ignored() {
    let dir = seeded_dir();
    let (status, body) =
        get_json(csv_app(dir.path()), "/forecast?program=%20&department=").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_unknown_program_is_left_out() {
    let dir = seeded_dir();
    let (status, body) = get_json(csv_app(dir.path()), "/forecast?program=Astronomy").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_rows_with_missing_values_are_dropped_from_forecast() {
    let dir = seeded_dir();
    let mut graduation = graduation_csv();
    graduation.push_str("G999,Late Record,Male,24,Physics,8,2019,Active,,3.1,Pending\n");
    write_table(dir.path(), "graduation", &graduation);
    write_table(
        dir.path(),
        "enrollment_trends",
        &format!("{}2024,Physics,,31\n,Physics,400,40\n", common::ENROLLMENT_TRENDS),
    );

    let (status, body) = get_json(csv_app(dir.path()), "/forecast?program=Physics").await;

    assert_eq!(status, StatusCode::OK);
    let points = body.as_array().unwrap();
    assert_eq!(points.len(), 6);
    assert_eq!(points[0]["year"], json!("2024-12-31"));
    assert!(points[0]["predicted_enrollment"].as_f64().unwrap() > 150.0);
    for (point, want) in points[3..6].iter().zip([5.0, 6.0, 7.0]) {
        assert_close(&point["predicted_graduates"], want);
    }
}

#[tokio::test]
async fn test_no_forecast_is_bad_request() {
    let dir = seeded_dir();
    write_table(dir.path(), "graduation", GRADUATION_HEADER);

    let (status, body) = get_json(csv_app(dir.path()), "/forecast?program=Astronomy").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "detail": "No forecasts generated due to insufficient or invalid data" })
    );
}

#[tokio::test]
async fn test_unreachable_store_is_service_unavailable() {
    let store = Arc::new(UnreachableStore);
    let state = AppState::from_config(store, &DashboardConfig::default()).unwrap();

    for uri in ["/students", "/enrollment_trends", "/forecast?program=Physics"] {
        let (status, body) = get_json(router(state.clone()), uri).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "{}", uri);
        assert!(body["detail"].as_str().unwrap().contains("connection refused"));
    }
}

#[tokio::test]
async fn test_missing_table_file_is_service_unavailable() {
    let dir = tempfile::TempDir::new().unwrap();
    let (status, _) = get_json(csv_app(dir.path()), "/courses").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_malformed_row_is_internal_error() {
    let dir = seeded_dir();
    write_table(
        dir.path(),
        "enrollment_trends",
        "year,program,total_enrolled,total_graduated\nlast year,Physics,100,20\n",
    );

    let (status, body) = get_json(csv_app(dir.path()), "/enrollment_trends").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().starts_with("Malformed record"));
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let dir = seeded_dir();
    let response = csv_app(dir.path())
        .oneshot(
            Request::builder()
                .uri("/courses")
                .header("origin", "http://localhost:8501")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let dir = seeded_dir();
    let response = csv_app(dir.path())
        .oneshot(Request::builder().uri("/admin").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
