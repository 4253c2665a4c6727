//! Series builder: observation frames to validated historical series

use crate::data::ObservationFrame;
use crate::error::{ForecastError, Result};
use std::collections::BTreeMap;
use std::fmt;

/// Which subset of a frame a series is built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupingKey {
    /// Rows tagged with one program
    Program(String),
    /// Rows tagged with one department
    Department(String),
    /// Every row, regardless of category
    Overall,
}

impl fmt::Display for GroupingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupingKey::Program(program) => write!(f, "program '{}'", program),
            GroupingKey::Department(department) => write!(f, "department '{}'", department),
            GroupingKey::Overall => write!(f, "all records"),
        }
    }
}

/// How observations sharing a period are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    /// Sum of the non-missing values
    Sum,
    /// Number of rows, whatever their value
    Count,
}

/// One aggregated `(period, value)` pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub period: i32,
    pub value: f64,
}

/// Period-ordered series for one category, valid for model fitting
///
/// Invariants: periods strictly increasing, at least two of them, every
/// value finite and at least one strictly positive.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalSeries {
    label: String,
    points: Vec<SeriesPoint>,
}

impl HistoricalSeries {
    /// Create a series from points in any order
    pub fn new(label: impl Into<String>, mut points: Vec<SeriesPoint>) -> Result<Self> {
        let label = label.into();
        points.sort_by_key(|p| p.period);

        if points.windows(2).any(|w| w[0].period == w[1].period) {
            return Err(ForecastError::DataError(format!(
                "Duplicate periods in series for {}",
                label
            )));
        }

        if let Some(reason) = invariant_violation(&points) {
            return Err(ForecastError::InsufficientData(format!("{} for {}", reason, label)));
        }

        Ok(Self { label, points })
    }

    /// Human-readable label of the category the series describes
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Points in ascending period order
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    /// Periods in ascending order
    pub fn periods(&self) -> Vec<i32> {
        self.points.iter().map(|p| p.period).collect()
    }

    /// Values in period order
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Latest period in the history
    pub fn last_period(&self) -> i32 {
        // Non-empty by construction
        self.points.last().map_or(i32::MIN, |p| p.period)
    }

    /// Re-check the fitting invariants, returning the violated rule if any
    pub fn invariant_violation(&self) -> Option<String> {
        invariant_violation(&self.points)
    }

    /// Get the number of periods
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed series
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

fn invariant_violation(points: &[SeriesPoint]) -> Option<String> {
    if points.iter().any(|p| !p.value.is_finite()) {
        return Some("non-finite value".to_string());
    }

    let mut distinct: Vec<i32> = points.iter().map(|p| p.period).collect();
    distinct.dedup();
    if distinct.len() < 2 {
        return Some(format!(
            "need at least 2 distinct periods, found {}",
            distinct.len()
        ));
    }

    if points.iter().all(|p| p.value <= 0.0) {
        return Some("every value is zero or negative".to_string());
    }

    None
}

/// Groups a frame by period and aggregates the values of one category
#[derive(Debug, Clone)]
pub struct SeriesBuilder {
    key: GroupingKey,
    aggregation: Aggregation,
}

impl SeriesBuilder {
    pub fn new(key: GroupingKey, aggregation: Aggregation) -> Self {
        Self { key, aggregation }
    }

    pub fn key(&self) -> &GroupingKey {
        &self.key
    }

    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }

    /// Build the historical series, or explain why there is not enough history
    pub fn build(&self, frame: &ObservationFrame) -> Result<HistoricalSeries> {
        let selected = match &self.key {
            GroupingKey::Program(label) | GroupingKey::Department(label) => {
                frame.filter_category(label)?
            }
            GroupingKey::Overall => frame.clone(),
        };

        let mut totals: BTreeMap<i32, f64> = BTreeMap::new();
        for observation in selected.observations()? {
            // Rows without a period cannot be placed on the time axis
            let Some(period) = observation.period else {
                continue;
            };

            match self.aggregation {
                Aggregation::Count => *totals.entry(period).or_insert(0.0) += 1.0,
                Aggregation::Sum => {
                    if let Some(value) = observation.value.filter(|v| v.is_finite()) {
                        *totals.entry(period).or_insert(0.0) += value;
                    }
                }
            }
        }

        if totals.is_empty() {
            return Err(ForecastError::InsufficientData(format!(
                "no dated observations for {}",
                self.key
            )));
        }

        let points = totals
            .into_iter()
            .map(|(period, value)| SeriesPoint { period, value })
            .collect();

        HistoricalSeries::new(self.key.to_string(), points)
    }
}
