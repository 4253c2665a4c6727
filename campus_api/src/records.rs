//! Rows of the dashboard's record tables
//!
//! Field names match the column names of both the database tables and the
//! CSV exports, so the same types serve every backend and the JSON responses.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub student_id: String,
    pub name: String,
    pub gender: String,
    pub age: i32,
    pub program: String,
    pub semester: i32,
    pub enrollment_year: i32,
    pub enrollment_status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub course_id: String,
    pub course_name: String,
    pub department: String,
    pub semester_offered: i32,
    pub max_capacity: i32,
    pub enrolled_students_count: i32,
    pub instructor_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Faculty {
    pub instructor_id: String,
    pub name: String,
    pub department: String,
    pub average_student_feedback_score: f64,
    pub graduation_success_rate: f64,
    /// Comma separated course ids, stored as one column
    pub course_ids_taught: String,
}

/// A graduated student: the student columns plus the outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Graduation {
    pub student_id: String,
    pub name: String,
    pub gender: String,
    pub age: i32,
    pub program: String,
    pub semester: i32,
    pub enrollment_year: i32,
    pub enrollment_status: String,
    pub graduation_year: i32,
    pub gpa: f64,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Feedback {
    pub course_id: String,
    pub instructor_id: String,
    pub student_id: String,
    pub feedback_score: i32,
    pub comments: Option<String>,
}

/// Yearly totals per program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct EnrollmentTrend {
    pub year: i32,
    pub program: String,
    pub total_enrolled: i32,
    pub total_graduated: i32,
}

/// Nullable projection of `enrollment_trends` used for forecasting
///
/// Missing values are kept so the series builder can drop the row instead of
/// failing the whole table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TrendPoint {
    pub year: Option<i32>,
    pub program: Option<String>,
    pub total_enrolled: Option<i32>,
}

/// Nullable projection of `courses` used for the course backfill
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CourseCount {
    pub course_name: Option<String>,
    pub department: Option<String>,
    pub enrolled_students_count: Option<i32>,
}

/// Nullable projection of `graduation` used for graduate counts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct GraduationYear {
    pub graduation_year: Option<i32>,
}
