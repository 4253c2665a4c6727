//! Additive trend + yearly seasonality regression
//!
//! `y(t) = intercept + slope * s(t) + seasonal(t)` where `s` rescales the
//! history onto `[0, 1]` and `seasonal` is a Fourier series over a one-year
//! cycle. The seasonal coefficients carry a ridge penalty of
//! `1 / prior_scale^2`; intercept and slope are unpenalised. Targets are
//! divided by their largest absolute value before fitting, so the penalty
//! does not depend on the magnitude of the counts.

use crate::error::{ForecastError, Result};
use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};
use crate::series::HistoricalSeries;
use crate::utils::{floor_at_zero, future_periods};
use chrono::Datelike;
use series_math::stats::{max_abs, std_dev};
use series_math::{fourier_terms, FittedRegression, RidgeRegression};
use statrs::distribution::{ContinuousCDF, Normal};

/// Length of the seasonal cycle, in periods (years)
const YEARLY_CYCLE: f64 = 1.0;

/// Additive regression model with a non-negativity floor
#[derive(Debug, Clone)]
pub struct AdditiveRegression {
    /// Name of the model
    name: String,
    /// Number of Fourier harmonics for the yearly component
    seasonality_order: usize,
    /// Prior scale of the seasonal coefficients
    prior_scale: f64,
    /// Coverage of the reported uncertainty interval
    interval_width: f64,
}

/// Trained additive regression model
#[derive(Debug, Clone)]
pub struct TrainedAdditiveRegression {
    name: String,
    seasonality_order: usize,
    regression: FittedRegression,
    /// First training period (maps to s = 0)
    origin: f64,
    /// Distance between first and last training period (maps to s = 1)
    span: f64,
    /// Divisor applied to the targets during fitting
    target_scale: f64,
    last_period: i32,
    /// Residual standard deviation, in original units
    residual_std: f64,
    /// Normal quantile for the interval width
    z_score: f64,
    fitted: Vec<f64>,
}

impl AdditiveRegression {
    /// Create a new additive regression model
    pub fn new(seasonality_order: usize, prior_scale: f64, interval_width: f64) -> Result<Self> {
        if !prior_scale.is_finite() || prior_scale <= 0.0 {
            return Err(ForecastError::InvalidParameter(
                "Seasonality prior scale must be positive".to_string(),
            ));
        }

        if !(interval_width > 0.0 && interval_width < 1.0) {
            return Err(ForecastError::InvalidParameter(
                "Interval width must be between 0 and 1".to_string(),
            ));
        }

        Ok(Self::with_checked(seasonality_order, prior_scale, interval_width))
    }

    fn with_checked(seasonality_order: usize, prior_scale: f64, interval_width: f64) -> Self {
        Self {
            name: format!(
                "Additive Regression (yearly order={}, prior scale={})",
                seasonality_order, prior_scale
            ),
            seasonality_order,
            prior_scale,
            interval_width,
        }
    }

    pub fn seasonality_order(&self) -> usize {
        self.seasonality_order
    }

    pub fn interval_width(&self) -> f64 {
        self.interval_width
    }

    fn penalties(&self) -> Vec<f64> {
        let seasonal = 1.0 / self.prior_scale.powi(2);
        let mut penalties = vec![0.0, 0.0];
        penalties.extend(std::iter::repeat(seasonal).take(2 * self.seasonality_order));
        penalties
    }

    fn z_score(&self) -> Result<f64> {
        let normal = Normal::new(0.0, 1.0)
            .map_err(|e| ForecastError::InvalidParameter(e.to_string()))?;
        Ok(normal.inverse_cdf(0.5 + self.interval_width / 2.0))
    }
}

impl Default for AdditiveRegression {
    fn default() -> Self {
        Self::with_checked(10, 10.0, 0.8)
    }
}

/// Design row for one period
fn design_row(period: i32, origin: f64, span: f64, order: usize) -> Result<Vec<f64>> {
    let position = f64::from(period);
    let mut row = vec![1.0, (position - origin) / span];
    row.extend(fourier_terms(position, YEARLY_CYCLE, order)?);
    Ok(row)
}

impl ForecastModel for AdditiveRegression {
    type Trained = TrainedAdditiveRegression;

    fn fit(&self, series: &HistoricalSeries) -> Result<Self::Trained> {
        if let Some(reason) = series.invariant_violation() {
            return Err(ForecastError::ModelFit(format!(
                "{} for {}",
                reason,
                series.label()
            )));
        }

        let periods = series.periods();
        let values = series.values();

        let origin = f64::from(periods[0]);
        let span = f64::from(series.last_period()) - origin;
        let target_scale = max_abs(&values);
        if span <= 0.0 || target_scale <= 0.0 {
            return Err(ForecastError::ModelFit(format!(
                "degenerate history for {}",
                series.label()
            )));
        }

        let rows = periods
            .iter()
            .map(|&period| design_row(period, origin, span, self.seasonality_order))
            .collect::<Result<Vec<_>>>()?;
        let targets: Vec<f64> = values.iter().map(|v| v / target_scale).collect();

        let regression = RidgeRegression::new(self.penalties())?.fit(&rows, &targets)?;

        let fitted = rows
            .iter()
            .map(|row| Ok(regression.predict(row)? * target_scale))
            .collect::<Result<Vec<f64>>>()?;
        let residuals: Vec<f64> = values.iter().zip(&fitted).map(|(y, f)| y - f).collect();
        let residual_std = std_dev(&residuals, 2)?;

        Ok(TrainedAdditiveRegression {
            name: self.name.clone(),
            seasonality_order: self.seasonality_order,
            regression,
            origin,
            span,
            target_scale,
            last_period: series.last_period(),
            residual_std,
            z_score: self.z_score()?,
            fitted,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedAdditiveRegression {
    /// Residual standard deviation of the fit, in original units
    pub fn residual_std(&self) -> f64 {
        self.residual_std
    }

    /// Raw (unfloored, unrounded) model value for a period
    pub fn raw_value(&self, period: i32) -> Result<f64> {
        let row = design_row(period, self.origin, self.span, self.seasonality_order)?;
        Ok(self.regression.predict(&row)? * self.target_scale)
    }
}

impl TrainedForecastModel for TrainedAdditiveRegression {
    fn predict(&self, horizon: usize) -> Result<ForecastResult> {
        if horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "Forecast horizon must be at least one period".to_string(),
            ));
        }

        let periods = future_periods(self.last_period, horizon)?;
        let margin = self.z_score * self.residual_std;

        let mut values = Vec::with_capacity(horizon);
        let mut intervals = Vec::with_capacity(horizon);
        for date in &periods {
            let raw = self.raw_value(date.year())?;
            values.push(floor_at_zero(raw));
            intervals.push((floor_at_zero(raw - margin), floor_at_zero(raw + margin)));
        }

        ForecastResult::new_with_intervals(periods, values, intervals)
    }

    fn fitted_values(&self) -> &[f64] {
        &self.fitted
    }

    fn name(&self) -> &str {
        &self.name
    }
}
