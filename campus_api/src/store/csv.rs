//! Record store over a directory of CSV exports

use super::{tables, RecordStore};
use crate::error::{Result, StoreError};
use crate::records::{
    Course, CourseCount, EnrollmentTrend, Faculty, Feedback, Graduation, GraduationYear, Student,
    TrendPoint,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads `<dir>/<table>.csv` on every call
#[derive(Debug, Clone)]
pub struct CsvRecordStore {
    dir: PathBuf,
}

impl CsvRecordStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn table_path(&self, table: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", table))
    }

    async fn read<T>(&self, table: &'static str) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let path = self.table_path(table);
        let rows = tokio::task::spawn_blocking(move || read_table::<T>(&path))
            .await
            .map_err(|e| StoreError::Connectivity(format!("reader for {} stopped: {}", table, e)))??;
        debug!(table, rows = rows.len(), "read csv table");
        Ok(rows)
    }
}

fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    reader
        .deserialize()
        .map(|row| row.map_err(StoreError::from))
        .collect()
}

#[async_trait]
impl RecordStore for CsvRecordStore {
    async fn students(&self) -> Result<Vec<Student>> {
        self.read(tables::STUDENTS).await
    }

    async fn courses(&self) -> Result<Vec<Course>> {
        self.read(tables::COURSES).await
    }

    async fn faculty(&self) -> Result<Vec<Faculty>> {
        self.read(tables::FACULTY).await
    }

    async fn graduation(&self) -> Result<Vec<Graduation>> {
        self.read(tables::GRADUATION).await
    }

    async fn feedback(&self) -> Result<Vec<Feedback>> {
        self.read(tables::FEEDBACK).await
    }

    async fn enrollment_trends(&self) -> Result<Vec<EnrollmentTrend>> {
        self.read(tables::ENROLLMENT_TRENDS).await
    }

    async fn trend_points(&self) -> Result<Vec<TrendPoint>> {
        self.read(tables::ENROLLMENT_TRENDS).await
    }

    async fn course_counts(&self) -> Result<Vec<CourseCount>> {
        self.read(tables::COURSES).await
    }

    async fn graduation_years(&self) -> Result<Vec<GraduationYear>> {
        self.read(tables::GRADUATION).await
    }

    async fn ping(&self) -> Result<()> {
        match tokio::fs::metadata(&self.dir).await {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(StoreError::Connectivity(format!(
                "{} is not a directory",
                self.dir.display()
            ))),
            Err(e) => Err(StoreError::Connectivity(format!(
                "{}: {}",
                self.dir.display(),
                e
            ))),
        }
    }

    fn describe(&self) -> String {
        format!("csv {}", self.dir.display())
    }
}
