//! Sample statistics used by the analyses
//!
//! Thin layer over `statrs`: the Student's t distribution supplies two-sided
//! p-values, `Data::ranks` the tie-averaged ranks, `Statistics` the means.
//! Sums of squares and the regression are closed-form over `f64` slices.
//!
//! All functions validate their input first (lengths, NaN, sample size,
//! variance) and report problems as `Error::InvalidInput` or
//! `Error::Computation` before any arithmetic happens.

mod ordinal;

pub use ordinal::{OrdinalFit, OrdinalLogit};

use crate::{Error, Result};
use statrs::distribution::{ContinuousCDF, StudentsT};
use statrs::statistics::{Data, OrderStatistics, RankTieBreaker, Statistics};

/// Correlation coefficient with its two-sided p-value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correlation {
    /// Coefficient in `[-1, 1]`
    pub coefficient: f64,
    /// Two-sided p-value for H0: no correlation
    pub p_value: f64,
    /// Sample size
    pub n: usize,
}

/// Ordinary least squares fit of `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    /// Regression coefficient
    pub slope: f64,
    /// Value at `x = 0`
    pub intercept: f64,
    /// Coefficient of determination of the fit on its own sample
    pub r_squared: f64,
}

impl LinearFit {
    /// Predicted `y` for `x`.
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope.mul_add(x, self.intercept)
    }
}

/// Reject NaN/infinite values and mismatched or too-short samples.
pub(crate) fn validate_pair(x: &[f64], y: &[f64], min_len: usize) -> Result<()> {
    if x.len() != y.len() {
        return Err(Error::InvalidInput(format!(
            "Sample length mismatch: {} vs {}",
            x.len(),
            y.len()
        )));
    }
    for (series, values) in [("x", x), ("y", y)] {
        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(Error::InvalidInput(format!(
                "Non-finite value in {series} at position {i}: {}",
                values[i]
            )));
        }
    }
    if x.len() < min_len {
        return Err(Error::Computation(format!(
            "Need at least {min_len} observations, got {}",
            x.len()
        )));
    }
    Ok(())
}

/// Centered sums of squares and cross-products: `(sxx, syy, sxy)`.
fn moments(x: &[f64], y: &[f64]) -> (f64, f64, f64) {
    let (mx, my) = (x.mean(), y.mean());
    x.iter()
        .zip(y)
        .fold((0.0, 0.0, 0.0), |(sxx, syy, sxy), (&xi, &yi)| {
            let (dx, dy) = (xi - mx, yi - my);
            (dx.mul_add(dx, sxx), dy.mul_add(dy, syy), dx.mul_add(dy, sxy))
        })
}

/// Two-sided p-value of a correlation coefficient via the t statistic with
/// `n - 2` degrees of freedom.
///
/// # Errors
///
/// Returns `Error::Computation` if `n < 3`
#[allow(clippy::cast_precision_loss)]
pub fn correlation_p_value(r: f64, n: usize) -> Result<f64> {
    if n < 3 {
        return Err(Error::Computation(format!(
            "p-value needs at least 3 observations, got {n}"
        )));
    }
    let df = (n - 2) as f64;
    let denom = 1.0 - r * r;
    if denom <= 0.0 {
        return Ok(0.0);
    }
    let t = r * (df / denom).sqrt();
    let dist = StudentsT::new(0.0, 1.0, df)
        .map_err(|e| Error::Computation(format!("Student's t distribution: {e}")))?;
    Ok((2.0 * dist.sf(t.abs())).clamp(0.0, 1.0))
}

/// Pearson product-moment correlation with its p-value.
///
/// # Errors
///
/// Returns error if the samples differ in length, contain NaN, have fewer
/// than 3 points, or either side has zero variance
pub fn pearson(x: &[f64], y: &[f64]) -> Result<Correlation> {
    validate_pair(x, y, 3)?;
    let (sxx, syy, sxy) = moments(x, y);
    if sxx == 0.0 || syy == 0.0 {
        return Err(Error::Computation(
            "Correlation undefined: constant input (zero variance)".to_string(),
        ));
    }
    let coefficient = (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0);
    Ok(Correlation {
        coefficient,
        p_value: correlation_p_value(coefficient, x.len())?,
        n: x.len(),
    })
}

/// Least-squares regression of `y` on a single predictor `x`.
///
/// # Errors
///
/// Returns error if the samples differ in length, contain NaN, have fewer
/// than 2 points, or `x` is constant
pub fn linear_regression(x: &[f64], y: &[f64]) -> Result<LinearFit> {
    validate_pair(x, y, 2)?;
    let (sxx, syy, sxy) = moments(x, y);
    if sxx == 0.0 {
        return Err(Error::Computation(
            "Regression undefined: predictor has zero variance".to_string(),
        ));
    }
    let slope = sxy / sxx;
    let intercept = slope.mul_add(-x.mean(), y.mean());
    let r_squared = if syy == 0.0 {
        // perfect fit of a constant response
        1.0
    } else {
        let ss_res: f64 = x
            .iter()
            .zip(y)
            .map(|(&xi, &yi)| {
                let e = yi - slope.mul_add(xi, intercept);
                e * e
            })
            .sum();
        1.0 - ss_res / syy
    };
    Ok(LinearFit {
        slope,
        intercept,
        r_squared,
    })
}

/// Fractional ranks starting at 1; ties share the mean of their positions.
///
/// Callers reject NaN first; ranking is undefined for it.
pub(crate) fn average_ranks(values: &[f64]) -> Vec<f64> {
    Data::new(values.to_vec()).ranks(RankTieBreaker::Average)
}

/// Spearman rank correlation with its p-value.
///
/// # Errors
///
/// Same conditions as [`pearson`], applied to the ranks
pub fn spearman(x: &[f64], y: &[f64]) -> Result<Correlation> {
    validate_pair(x, y, 3)?;
    pearson(&average_ranks(x), &average_ranks(y))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: [f64; 4] = [10.0, 20.0, 30.0, 40.0];
    const LEAVE: [f64; 4] = [5.0, 15.0, 20.0, 38.0];

    #[test]
    fn test_pearson_reference_sample() {
        let corr = pearson(&RATE, &LEAVE).unwrap();
        assert!((corr.coefficient - 0.971_5).abs() < 1e-3);
        assert!((corr.p_value - 0.028_5).abs() < 1e-3);
        assert_eq!(corr.n, 4);
    }

    #[test]
    fn test_linear_regression_reference_sample() {
        let fit = linear_regression(&RATE, &LEAVE).unwrap();
        assert!((fit.slope - 1.04).abs() < 1e-9);
        assert!((fit.intercept - (-6.5)).abs() < 1e-9);
        assert!((fit.r_squared - 0.943_8).abs() < 1e-3);
        assert!((fit.predict(50.0) - 45.5).abs() < 1e-9);
    }

    #[test]
    fn test_r_squared_equals_r_squared() {
        let corr = pearson(&RATE, &LEAVE).unwrap();
        let fit = linear_regression(&RATE, &LEAVE).unwrap();
        assert!((corr.coefficient.powi(2) - fit.r_squared).abs() < 1e-12);
    }

    #[test]
    fn test_perfect_correlation_p_value_zero() {
        let corr = pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
        assert!((corr.coefficient - 1.0).abs() < 1e-12);
        assert!(corr.p_value.abs() < 1e-12);
    }

    #[test]
    fn test_pearson_constant_input() {
        let err = pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, Error::Computation(_)));
    }

    #[test]
    fn test_pearson_rejects_nan() {
        let err = pearson(&[1.0, f64::NAN, 3.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_pearson_too_small() {
        let err = pearson(&[1.0, 2.0], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, Error::Computation(_)));
    }

    #[test]
    fn test_length_mismatch() {
        let err = linear_regression(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert!(err.to_string().contains("length mismatch"));
    }

    #[test]
    fn test_non_finite_names_series() {
        let err = pearson(&[1.0, 2.0, 3.0], &[1.0, f64::NAN, 3.0]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.to_string().contains("in y at position 1"));

        let err = linear_regression(&[1.0, f64::INFINITY], &[1.0, 2.0]).unwrap_err();
        assert!(err.to_string().contains("in x at position 1"));
    }

    #[test]
    fn test_average_ranks_ties() {
        assert_eq!(
            average_ranks(&[10.0, 20.0, 20.0, 5.0]),
            vec![2.0, 3.5, 3.5, 1.0]
        );
        assert_eq!(
            average_ranks(&[10.0, 20.0, 20.0, 5.0, 7.5, 7.5, 7.5]),
            vec![5.0, 6.5, 6.5, 1.0, 3.0, 3.0, 3.0]
        );
    }

    #[test]
    fn test_spearman_monotonic() {
        // monotonic but not linear
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [1.0, 4.0, 9.0, 16.0, 100.0];
        let corr = spearman(&x, &y).unwrap();
        assert!((corr.coefficient - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_spearman_inverse() {
        let corr = spearman(&[1.0, 2.0, 3.0, 4.0], &[9.0, 7.0, 7.0, 1.0]).unwrap();
        assert!(corr.coefficient < -0.9);
    }
}
