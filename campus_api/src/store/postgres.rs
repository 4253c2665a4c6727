//! PostgreSQL record store

use super::{tables, RecordStore};
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::records::{
    Course, CourseCount, EnrollmentTrend, Faculty, Feedback, Graduation, GraduationYear, Student,
    TrendPoint,
};
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::FromRow;
use tracing::debug;

pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    /// Create the pool without opening a connection
    ///
    /// Only a malformed URL fails here; an unreachable server is reported by
    /// the first query.
    pub fn connect_lazy(config: &StoreConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect_lazy(&config.database_url)
            .map_err(|e| StoreError::Connectivity(format!("invalid database url: {}", e)))?;

        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run one query on a connection held only for its duration
    async fn fetch_table<T>(&self, table: &'static str, sql: &'static str) -> Result<Vec<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query_as::<_, T>(sql).fetch_all(&mut *conn).await?;
        debug!(table, rows = rows.len(), "fetched table");
        Ok(rows)
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn students(&self) -> Result<Vec<Student>> {
        self.fetch_table(
            tables::STUDENTS,
            "SELECT student_id, name, gender, age, program, semester, enrollment_year, \
             enrollment_status FROM students",
        )
        .await
    }

    async fn courses(&self) -> Result<Vec<Course>> {
        self.fetch_table(
            tables::COURSES,
            "SELECT course_id, course_name, department, semester_offered, max_capacity, \
             enrolled_students_count, instructor_id FROM courses",
        )
        .await
    }

    async fn faculty(&self) -> Result<Vec<Faculty>> {
        self.fetch_table(
            tables::FACULTY,
            "SELECT instructor_id, name, department, average_student_feedback_score, \
             graduation_success_rate, course_ids_taught FROM faculty",
        )
        .await
    }

    async fn graduation(&self) -> Result<Vec<Graduation>> {
        self.fetch_table(
            tables::GRADUATION,
            "SELECT student_id, name, gender, age, program, semester, enrollment_year, \
             enrollment_status, graduation_year, gpa, category FROM graduation",
        )
        .await
    }

    async fn feedback(&self) -> Result<Vec<Feedback>> {
        self.fetch_table(
            tables::FEEDBACK,
            "SELECT course_id, instructor_id, student_id, feedback_score, comments FROM feedback",
        )
        .await
    }

    async fn enrollment_trends(&self) -> Result<Vec<EnrollmentTrend>> {
        self.fetch_table(
            tables::ENROLLMENT_TRENDS,
            "SELECT year, program, total_enrolled, total_graduated FROM enrollment_trends",
        )
        .await
    }

    async fn trend_points(&self) -> Result<Vec<TrendPoint>> {
        self.fetch_table(
            tables::ENROLLMENT_TRENDS,
            "SELECT year, program, total_enrolled FROM enrollment_trends",
        )
        .await
    }

    async fn course_counts(&self) -> Result<Vec<CourseCount>> {
        self.fetch_table(
            tables::COURSES,
            "SELECT course_name, department, enrolled_students_count FROM courses",
        )
        .await
    }

    async fn graduation_years(&self) -> Result<Vec<GraduationYear>> {
        self.fetch_table(tables::GRADUATION, "SELECT graduation_year FROM graduation")
            .await
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }

    fn describe(&self) -> String {
        let options = self.pool.connect_options();
        format!(
            "postgres {}:{}/{}",
            options.get_host(),
            options.get_port(),
            options.get_database().unwrap_or("postgres")
        )
    }
}
