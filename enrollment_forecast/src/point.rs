//! Forecast output rows and the series kinds that produce them

use crate::series::{Aggregation, GroupingKey, SeriesBuilder};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Predicted enrollment for one program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramForecast {
    pub year: NaiveDate,
    pub predicted_enrollment: f64,
    pub program: String,
}

/// Predicted course enrollment for one department
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentForecast {
    pub year: NaiveDate,
    pub predicted_course_enrollment: f64,
    pub department: String,
}

/// Predicted number of graduates, institution-wide
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraduationForecast {
    pub year: NaiveDate,
    pub predicted_graduates: f64,
}

/// One forecast row; serialises to exactly the fields of its variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ForecastPoint {
    Program(ProgramForecast),
    Department(DepartmentForecast),
    Graduation(GraduationForecast),
}

impl ForecastPoint {
    /// Period-end date the prediction is for
    pub fn year(&self) -> NaiveDate {
        match self {
            ForecastPoint::Program(p) => p.year,
            ForecastPoint::Department(d) => d.year,
            ForecastPoint::Graduation(g) => g.year,
        }
    }

    /// Predicted value, whichever field carries it
    pub fn predicted_value(&self) -> f64 {
        match self {
            ForecastPoint::Program(p) => p.predicted_enrollment,
            ForecastPoint::Department(d) => d.predicted_course_enrollment,
            ForecastPoint::Graduation(g) => g.predicted_graduates,
        }
    }

    pub fn program(&self) -> Option<&str> {
        match self {
            ForecastPoint::Program(p) => Some(&p.program),
            _ => None,
        }
    }

    pub fn department(&self) -> Option<&str> {
        match self {
            ForecastPoint::Department(d) => Some(&d.department),
            _ => None,
        }
    }
}

/// The three forecastable series
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeriesKind {
    /// Total enrolled per year for one program
    ProgramEnrollment { program: String },
    /// Course enrollment per year for one department
    CourseEnrollment { department: String },
    /// Graduates per graduation year
    Graduation,
}

impl SeriesKind {
    /// Builder grouping and aggregating the observations of this series
    pub fn builder(&self) -> SeriesBuilder {
        match self {
            SeriesKind::ProgramEnrollment { program } => {
                SeriesBuilder::new(GroupingKey::Program(program.clone()), Aggregation::Sum)
            }
            SeriesKind::CourseEnrollment { department } => {
                SeriesBuilder::new(GroupingKey::Department(department.clone()), Aggregation::Sum)
            }
            SeriesKind::Graduation => SeriesBuilder::new(GroupingKey::Overall, Aggregation::Count),
        }
    }

    /// Output row for one forecast step
    pub fn point(&self, year: NaiveDate, value: f64) -> ForecastPoint {
        match self {
            SeriesKind::ProgramEnrollment { program } => ForecastPoint::Program(ProgramForecast {
                year,
                predicted_enrollment: value,
                program: program.clone(),
            }),
            SeriesKind::CourseEnrollment { department } => {
                ForecastPoint::Department(DepartmentForecast {
                    year,
                    predicted_course_enrollment: value,
                    department: department.clone(),
                })
            }
            SeriesKind::Graduation => ForecastPoint::Graduation(GraduationForecast {
                year,
                predicted_graduates: value,
            }),
        }
    }
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesKind::ProgramEnrollment { program } => {
                write!(f, "program enrollment ({})", program)
            }
            SeriesKind::CourseEnrollment { department } => {
                write!(f, "course enrollment ({})", department)
            }
            SeriesKind::Graduation => write!(f, "graduation count"),
        }
    }
}
