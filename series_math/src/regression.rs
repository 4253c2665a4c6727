//! Regularised least squares for small design matrices
//!
//! The enrollment series this workspace deals with are a handful of yearly
//! observations, so the normal equations are formed explicitly and solved by
//! Gaussian elimination with partial pivoting.

use crate::{MathError, Result};

/// Pivots smaller than this (relative to the largest Gram entry) are treated as zero
const SINGULAR_TOLERANCE: f64 = 1e-12;

/// Least squares regression with an individual L2 penalty per coefficient
///
/// A penalty of `0.0` leaves the coefficient unregularised, so an all-zero
/// penalty vector is ordinary least squares.
#[derive(Debug, Clone)]
pub struct RidgeRegression {
    penalties: Vec<f64>,
}

/// Coefficients of a fitted regression
#[derive(Debug, Clone, PartialEq)]
pub struct FittedRegression {
    coefficients: Vec<f64>,
}

impl RidgeRegression {
    /// Create a regression with one penalty per design column
    pub fn new(penalties: Vec<f64>) -> Result<Self> {
        if penalties.is_empty() {
            return Err(MathError::InvalidInput(
                "At least one design column is required".to_string(),
            ));
        }

        if penalties.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(MathError::InvalidInput(
                "Penalties must be finite and non-negative".to_string(),
            ));
        }

        Ok(Self { penalties })
    }

    /// Ordinary (unpenalised) least squares over `width` columns
    pub fn ordinary(width: usize) -> Result<Self> {
        Self::new(vec![0.0; width])
    }

    /// Number of design columns
    pub fn width(&self) -> usize {
        self.penalties.len()
    }

    /// Fit the coefficients to the given design rows and targets
    pub fn fit(&self, rows: &[Vec<f64>], targets: &[f64]) -> Result<FittedRegression> {
        if rows.len() != targets.len() {
            return Err(MathError::InvalidInput(format!(
                "Design rows ({}) and targets ({}) differ in length",
                rows.len(),
                targets.len()
            )));
        }

        if rows.is_empty() {
            return Err(MathError::InsufficientData(
                "Cannot fit a regression without observations".to_string(),
            ));
        }

        let width = self.width();
        if let Some(row) = rows.iter().find(|row| row.len() != width) {
            return Err(MathError::InvalidInput(format!(
                "Design row has {} columns, expected {}",
                row.len(),
                width
            )));
        }

        if rows.iter().flatten().chain(targets).any(|v| !v.is_finite()) {
            return Err(MathError::InvalidInput(
                "Design rows and targets must be finite".to_string(),
            ));
        }

        let mut gram = vec![vec![0.0; width]; width];
        let mut moment = vec![0.0; width];
        for (row, &target) in rows.iter().zip(targets) {
            for i in 0..width {
                moment[i] += row[i] * target;
                for j in 0..width {
                    gram[i][j] += row[i] * row[j];
                }
            }
        }

        for (i, penalty) in self.penalties.iter().enumerate() {
            gram[i][i] += penalty;
        }

        let coefficients = solve(gram, moment)?;
        Ok(FittedRegression { coefficients })
    }
}

impl FittedRegression {
    /// Fitted coefficients, in design column order
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Evaluate the regression on one design row
    pub fn predict(&self, row: &[f64]) -> Result<f64> {
        if row.len() != self.coefficients.len() {
            return Err(MathError::InvalidInput(format!(
                "Design row has {} columns, expected {}",
                row.len(),
                self.coefficients.len()
            )));
        }

        Ok(row
            .iter()
            .zip(&self.coefficients)
            .map(|(x, beta)| x * beta)
            .sum())
    }

    /// Observed minus fitted value for every row
    pub fn residuals(&self, rows: &[Vec<f64>], targets: &[f64]) -> Result<Vec<f64>> {
        if rows.len() != targets.len() {
            return Err(MathError::InvalidInput(format!(
                "Design rows ({}) and targets ({}) differ in length",
                rows.len(),
                targets.len()
            )));
        }

        rows.iter()
            .zip(targets)
            .map(|(row, target)| Ok(target - self.predict(row)?))
            .collect()
    }
}

/// Solve `a * x = b` in place
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>> {
    let n = b.len();
    let scale = a
        .iter()
        .flatten()
        .fold(0.0_f64, |acc, v| acc.max(v.abs()))
        .max(1.0);

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);

        if a[pivot_row][col].abs() < SINGULAR_TOLERANCE * scale {
            return Err(MathError::CalculationError(format!(
                "Normal equations are singular at column {}",
                col
            )));
        }

        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        let pivot = a[col].clone();
        let pivot_target = b[col];
        for row in (col + 1)..n {
            let factor = a[row][col] / pivot[col];
            if factor == 0.0 {
                continue;
            }
            for (k, value) in pivot.iter().enumerate().skip(col) {
                a[row][k] -= factor * value;
            }
            b[row] -= factor * pivot_target;
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = ((row + 1)..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_rows(xs: &[f64]) -> Vec<Vec<f64>> {
        xs.iter().map(|&x| vec![1.0, x]).collect()
    }

    #[test]
    fn test_ordinary_least_squares_recovers_line() {
        let rows = line_rows(&[0.0, 1.0, 2.0, 3.0]);
        let targets = vec![10.0, 20.0, 30.0, 40.0];

        let fitted = RidgeRegression::ordinary(2).unwrap().fit(&rows, &targets).unwrap();

        assert!((fitted.coefficients()[0] - 10.0).abs() < 1e-9);
        assert!((fitted.coefficients()[1] - 10.0).abs() < 1e-9);
        assert!((fitted.predict(&[1.0, 4.0]).unwrap() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_penalty_resolves_collinear_column() {
        // Third column duplicates the intercept; only the penalty keeps the system solvable
        let rows: Vec<Vec<f64>> = [0.0, 1.0, 2.0]
            .iter()
            .map(|&x| vec![1.0, x, 1.0])
            .collect();
        let targets = vec![5.0, 7.0, 9.0];

        let plain = RidgeRegression::ordinary(3).unwrap().fit(&rows, &targets);
        assert!(matches!(plain, Err(MathError::CalculationError(_))));

        let fitted = RidgeRegression::new(vec![0.0, 0.0, 0.01])
            .unwrap()
            .fit(&rows, &targets)
            .unwrap();

        // The penalised duplicate collapses to zero and the intercept absorbs it
        assert!(fitted.coefficients()[2].abs() < 1e-9);
        assert!((fitted.coefficients()[0] - 5.0).abs() < 1e-9);
        assert!((fitted.coefficients()[1] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_residuals_of_exact_fit_are_zero() {
        let rows = line_rows(&[0.0, 1.0]);
        let targets = vec![3.0, 4.0];
        let fitted = RidgeRegression::ordinary(2).unwrap().fit(&rows, &targets).unwrap();

        for residual in fitted.residuals(&rows, &targets).unwrap() {
            assert!(residual.abs() < 1e-9);
        }
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(RidgeRegression::new(vec![]).is_err());
        assert!(RidgeRegression::new(vec![-1.0]).is_err());

        let model = RidgeRegression::ordinary(2).unwrap();
        assert!(matches!(
            model.fit(&[], &[]),
            Err(MathError::InsufficientData(_))
        ));
        assert!(model.fit(&[vec![1.0]], &[1.0]).is_err());
        assert!(model.fit(&[vec![1.0, f64::NAN]], &[1.0]).is_err());
        assert!(model.fit(&line_rows(&[0.0]), &[1.0, 2.0]).is_err());
    }
}
