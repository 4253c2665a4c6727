//! Reshape store tables into forecast requests

use crate::config::CourseBackfill;
use crate::error::ApiError;
use crate::records::{CourseCount, GraduationYear, TrendPoint};
use crate::store::RecordStore;
use enrollment_forecast::error::Result;
use enrollment_forecast::{Observation, ObservationFrame, SeriesKind, SeriesRequest};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Query parameters of `/forecast`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ForecastFilters {
    pub program: Option<String>,
    pub department: Option<String>,
}

impl ForecastFilters {
    /// Trimmed filters; blank values count as absent
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            program: clean(self.program),
            department: clean(self.department),
        }
    }
}

/// `(year, program, total_enrolled)` for every trend row
///
/// Missing values stay missing; the series builder drops those rows.
pub fn program_frame(trends: &[TrendPoint]) -> Result<ObservationFrame> {
    let observations: Vec<Observation> = trends
        .iter()
        .map(|t| Observation {
            period: t.year,
            category: t.program.clone(),
            value: t.total_enrolled.map(f64::from),
        })
        .collect();
    ObservationFrame::from_observations(&observations)
}

/// Synthesised yearly history for one department
///
/// Courses carry only a current head count, so each course contributes
/// `count * scale` for every backfill year. Courses without a count are
/// skipped.
pub fn course_backfill_frame(
    courses: &[CourseCount],
    department: &str,
    backfill: &CourseBackfill,
) -> Result<ObservationFrame> {
    let mut per_course: BTreeMap<&str, f64> = BTreeMap::new();
    for course in courses
        .iter()
        .filter(|c| c.department.as_deref() == Some(department))
    {
        if let Some(count) = course.enrolled_students_count {
            *per_course
                .entry(course.course_name.as_deref().unwrap_or_default())
                .or_insert(0.0) += f64::from(count);
        }
    }

    let mut observations = Vec::new();
    for (year, scale) in backfill.scales() {
        for count in per_course.values() {
            observations.push(Observation::new(year, Some(department), count * scale));
        }
    }

    ObservationFrame::from_observations(&observations)
}

/// One observation per graduate, dated by graduation year
pub fn graduation_frame(graduation: &[GraduationYear]) -> Result<ObservationFrame> {
    let observations: Vec<Observation> = graduation
        .iter()
        .map(|g| Observation {
            period: g.graduation_year,
            category: None,
            value: Some(1.0),
        })
        .collect();
    ObservationFrame::from_observations(&observations)
}

/// Fetch what the filters need and build the series requests
///
/// Program and department series are only requested with a filter; the
/// graduation series is always requested. Tables a request does not need
/// are not read.
pub async fn collect_requests(
    store: &dyn RecordStore,
    filters: &ForecastFilters,
    backfill: &CourseBackfill,
) -> std::result::Result<Vec<SeriesRequest>, ApiError> {
    let mut requests = Vec::with_capacity(3);

    if let Some(program) = &filters.program {
        let trends = store.trend_points().await?;
        requests.push(SeriesRequest::new(
            SeriesKind::ProgramEnrollment {
                program: program.clone(),
            },
            program_frame(&trends)?,
        ));
    }

    if let Some(department) = &filters.department {
        let courses = store.course_counts().await?;
        requests.push(SeriesRequest::new(
            SeriesKind::CourseEnrollment {
                department: department.clone(),
            },
            course_backfill_frame(&courses, department, backfill)?,
        ));
    }

    let graduation = store.graduation_years().await?;
    requests.push(SeriesRequest::new(
        SeriesKind::Graduation,
        graduation_frame(&graduation)?,
    ));

    Ok(requests)
}
