//! Read-only access to the record tables
//!
//! Every operation returns the whole table; nothing is filtered or cached.

pub mod csv;
pub mod postgres;

use crate::config::{StoreBackend, StoreConfig};
use crate::error::Result;
use crate::records::{
    Course, CourseCount, EnrollmentTrend, Faculty, Feedback, Graduation, GraduationYear, Student,
    TrendPoint,
};
use async_trait::async_trait;
use std::sync::Arc;

pub use self::csv::CsvRecordStore;
pub use self::postgres::PgRecordStore;

/// Table names shared by every backend
pub mod tables {
    pub const STUDENTS: &str = "students";
    pub const COURSES: &str = "courses";
    pub const FACULTY: &str = "faculty";
    pub const GRADUATION: &str = "graduation";
    pub const FEEDBACK: &str = "feedback";
    pub const ENROLLMENT_TRENDS: &str = "enrollment_trends";
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn students(&self) -> Result<Vec<Student>>;

    async fn courses(&self) -> Result<Vec<Course>>;

    async fn faculty(&self) -> Result<Vec<Faculty>>;

    async fn graduation(&self) -> Result<Vec<Graduation>>;

    async fn feedback(&self) -> Result<Vec<Feedback>>;

    async fn enrollment_trends(&self) -> Result<Vec<EnrollmentTrend>>;

    /// `year, program, total_enrolled` of every trend row, nulls kept
    async fn trend_points(&self) -> Result<Vec<TrendPoint>>;

    /// `course_name, department, enrolled_students_count` of every course, nulls kept
    async fn course_counts(&self) -> Result<Vec<CourseCount>>;

    /// `graduation_year` of every graduate, nulls kept
    async fn graduation_years(&self) -> Result<Vec<GraduationYear>>;

    /// Check the store answers, without reading any table
    async fn ping(&self) -> Result<()>;

    /// Short description for logs, never containing credentials
    fn describe(&self) -> String;
}

/// Build the configured backend
pub fn open_store(config: &StoreConfig) -> Result<Arc<dyn RecordStore>> {
    Ok(match config.backend {
        StoreBackend::Postgres => Arc::new(PgRecordStore::connect_lazy(config)?),
        StoreBackend::Csv => Arc::new(CsvRecordStore::new(&config.csv_dir)),
    })
}
