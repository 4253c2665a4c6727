//! Observation frames: raw rows reshaped for forecasting

use crate::error::{ForecastError, Result};
use polars::prelude::*;

/// Column holding the calendar year of an observation
pub const PERIOD_COLUMN: &str = "period";
/// Column holding the program or department label
pub const CATEGORY_COLUMN: &str = "category";
/// Column holding the measured value
pub const VALUE_COLUMN: &str = "value";

/// One raw row reshaped into `(period, category, value)`
///
/// Every field may be missing; the series builder decides what to drop.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub period: Option<i32>,
    pub category: Option<String>,
    pub value: Option<f64>,
}

impl Observation {
    /// Observation with all fields present
    pub fn new(period: i32, category: Option<&str>, value: f64) -> Self {
        Self {
            period: Some(period),
            category: category.map(str::to_string),
            value: Some(value),
        }
    }
}

/// Three-column data frame of observations for a single series
#[derive(Debug, Clone)]
pub struct ObservationFrame {
    df: DataFrame,
}

impl ObservationFrame {
    /// Build a frame from observations
    pub fn from_observations(observations: &[Observation]) -> Result<Self> {
        let periods: Vec<Option<i32>> = observations.iter().map(|o| o.period).collect();
        let categories: Vec<Option<String>> =
            observations.iter().map(|o| o.category.clone()).collect();
        let values: Vec<Option<f64>> = observations.iter().map(|o| o.value).collect();

        let df = DataFrame::new(vec![
            Series::new(PERIOD_COLUMN, periods),
            Series::new(CATEGORY_COLUMN, categories),
            Series::new(VALUE_COLUMN, values),
        ])?;

        Ok(Self { df })
    }

    /// Wrap an existing DataFrame, checking the expected columns and types
    pub fn from_dataframe(df: DataFrame) -> Result<Self> {
        Self::expect_column(&df, PERIOD_COLUMN, &DataType::Int32)?;
        Self::expect_column(&df, CATEGORY_COLUMN, &DataType::Utf8)?;
        Self::expect_column(&df, VALUE_COLUMN, &DataType::Float64)?;

        Ok(Self { df })
    }

    fn expect_column(df: &DataFrame, name: &str, dtype: &DataType) -> Result<()> {
        let column = df.column(name).map_err(|e| {
            ForecastError::DataError(format!("Column '{}' not found: {}", name, e))
        })?;

        if column.dtype() != dtype {
            return Err(ForecastError::DataError(format!(
                "Column '{}' has type {}, expected {}",
                name,
                column.dtype(),
                dtype
            )));
        }

        Ok(())
    }

    /// Get the DataFrame
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Keep only the rows tagged with `category`
    pub fn filter_category(&self, category: &str) -> Result<Self> {
        let mask: BooleanChunked = self
            .df
            .column(CATEGORY_COLUMN)?
            .utf8()?
            .into_iter()
            .map(|label| Some(label == Some(category)))
            .collect();

        Ok(Self {
            df: self.df.filter(&mask)?,
        })
    }

    /// Read the rows back as observations
    pub fn observations(&self) -> Result<Vec<Observation>> {
        let periods = self.df.column(PERIOD_COLUMN)?.i32()?;
        let categories = self.df.column(CATEGORY_COLUMN)?.utf8()?;
        let values = self.df.column(VALUE_COLUMN)?.f64()?;

        Ok(periods
            .into_iter()
            .zip(categories)
            .zip(values)
            .map(|((period, category), value)| Observation {
                period,
                category: category.map(str::to_string),
                value,
            })
            .collect())
    }

    /// Check if the frame is empty
    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Get the number of rows
    pub fn len(&self) -> usize {
        self.df.height()
    }
}
