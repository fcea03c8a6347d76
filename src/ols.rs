//! Ordinary Least Squares
//!
//! Fits a linear model with an intercept to named predictor columns.
//! The system is solved through the normal equations with Gaussian
//! elimination and partial pivoting, which is plenty for the handful of
//! predictors a benchmark regression carries.

use thiserror::Error;

/// Errors from the least-squares solver
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    /// The normal equations are singular (collinear or constant predictors)
    #[error("normal equations are singular; predictors are collinear or constant")]
    Singular,

    /// A predictor column's length differs from the responder's
    #[error("predictor column {column} has {got} values, expected {expected}")]
    ColumnLengthMismatch {
        /// Zero-based index of the offending predictor column
        column: usize,
        /// Number of values in that column
        got: usize,
        /// Responder length every column must match
        expected: usize,
    },

    /// The responder column is empty
    #[error("responder column is empty")]
    EmptyResponder,
}

/// Result of a least-squares fit
#[derive(Debug, Clone, PartialEq)]
pub struct OlsFit {
    /// One coefficient per predictor column (input order), then the intercept
    pub coefficients: Vec<f64>,
    /// Coefficient of determination of the fit
    pub r_square: f64,
}

/// Fit `responder ~ predictors + intercept` by ordinary least squares
///
/// Returns one coefficient per predictor column followed by the
/// intercept. R-squared is `1 - SSres/SStot`; a constant responder
/// (SStot = 0) is fit exactly by the intercept and reports 1.0.
pub fn ols_regress(
    predictor_columns: &[Vec<f64>],
    responder: &[f64],
) -> Result<OlsFit, SolverError> {
    let n = responder.len();
    if n == 0 {
        return Err(SolverError::EmptyResponder);
    }
    for (i, column) in predictor_columns.iter().enumerate() {
        if column.len() != n {
            return Err(SolverError::ColumnLengthMismatch {
                column: i,
                got: column.len(),
                expected: n,
            });
        }
    }

    // k model terms: every predictor plus the trailing intercept column.
    let k = predictor_columns.len() + 1;
    let term = |row: usize, j: usize| -> f64 {
        if j + 1 == k {
            1.0
        } else {
            predictor_columns[j][row]
        }
    };

    // Normal equations: (X^T X) beta = X^T y.
    let mut xtx = vec![vec![0.0f64; k]; k];
    let mut xty = vec![0.0f64; k];
    for row in 0..n {
        for i in 0..k {
            let xi = term(row, i);
            xty[i] += xi * responder[row];
            for j in 0..k {
                xtx[i][j] += xi * term(row, j);
            }
        }
    }

    let coefficients = solve(xtx, xty)?;

    // Fit quality against the observed responder.
    let mean_y = responder.iter().sum::<f64>() / n as f64;
    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for row in 0..n {
        let predicted: f64 = (0..k).map(|j| coefficients[j] * term(row, j)).sum();
        ss_res += (responder[row] - predicted).powi(2);
        ss_tot += (responder[row] - mean_y).powi(2);
    }
    let r_square = if ss_tot == 0.0 {
        1.0
    } else {
        1.0 - ss_res / ss_tot
    };

    Ok(OlsFit {
        coefficients,
        r_square,
    })
}

/// Solve a dense linear system by Gaussian elimination with partial pivoting
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>, SolverError> {
    let k = b.len();

    for col in 0..k {
        // Pivot on the largest remaining entry in this column.
        let mut pivot_row = col;
        for row in (col + 1)..k {
            if a[row][col].abs() > a[pivot_row][col].abs() {
                pivot_row = row;
            }
        }
        if a[pivot_row][col].abs() < 1e-12 {
            return Err(SolverError::Singular);
        }
        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        for row in (col + 1)..k {
            let factor = a[row][col] / a[col][col];
            for j in col..k {
                a[row][j] -= factor * a[col][j];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0f64; k];
    for col in (0..k).rev() {
        let trailing: f64 = ((col + 1)..k).map(|j| a[col][j] * x[j]).sum();
        x[col] = (b[col] - trailing) / a[col][col];
    }

    Ok(x)
}
