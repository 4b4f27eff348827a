//! Ordinal logistic regression (immediate-threshold logit, single predictor)
//!
//! Thresholds `theta_0 < theta_1 < ...` split the latent scale `coef * x`
//! into classes. Each observation of class `j` is penalized only against its
//! two adjacent thresholds: `-ln sigmoid(theta_j - eta)` for the upper one and
//! `-ln(1 - sigmoid(theta_{j-1} - eta))` for the lower one. The summed loss
//! plus `alpha / 2 * coef^2` is minimized with gradient descent and
//! backtracking line search. The predictor is standardized internally;
//! reported parameters are on the original scale.
//!
//! Prediction counts the thresholds strictly below `coef * x`.

use super::validate_pair;
use crate::{Error, Result};
use statrs::statistics::Statistics;

const MAX_ITERATIONS: usize = 2_000;
const GRADIENT_TOLERANCE: f64 = 1e-7;

/// Ordinal logit estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrdinalLogit {
    alpha: f64,
}

impl Default for OrdinalLogit {
    fn default() -> Self {
        Self { alpha: 1.0 }
    }
}

/// Fitted ordinal model.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalFit {
    /// Effect of the predictor on the latent scale
    pub coefficient: f64,
    /// Cut points between consecutive classes, strictly increasing
    pub thresholds: Vec<f64>,
    /// Observed class labels, ascending
    pub classes: Vec<i64>,
    /// Optimizer iterations used
    pub iterations: usize,
}

impl OrdinalFit {
    /// Most likely class for `x`.
    #[must_use]
    pub fn predict(&self, x: f64) -> i64 {
        let eta = self.coefficient * x;
        let idx = self.thresholds.iter().filter(|&&t| t < eta).count();
        self.classes[idx]
    }

    /// Share of observations whose class is predicted exactly.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn accuracy(&self, x: &[f64], y: &[i64]) -> f64 {
        if x.is_empty() {
            return 0.0;
        }
        let hits = x
            .iter()
            .zip(y)
            .filter(|&(&xi, &yi)| self.predict(xi) == yi)
            .count();
        hits as f64 / x.len() as f64
    }
}

fn sigmoid(a: f64) -> f64 {
    if a >= 0.0 {
        1.0 / (1.0 + (-a).exp())
    } else {
        let e = a.exp();
        e / (1.0 + e)
    }
}

/// `ln(sigmoid(a))` without overflow for large `|a|`.
fn log_sigmoid(a: f64) -> f64 {
    -((-a).max(0.0) + (-a.abs()).exp().ln_1p())
}

/// Optimizer state on the standardized scale.
///
/// `raw[0]` is the coefficient, `raw[1]` the first threshold, and `raw[k + 1]`
/// for `k >= 1` the log-gap between thresholds `k - 1` and `k`.
struct Problem<'a> {
    z: &'a [f64],
    labels: &'a [usize],
    n_classes: usize,
    penalty: f64,
}

impl Problem<'_> {
    fn thresholds(raw: &[f64]) -> Vec<f64> {
        let mut out = Vec::with_capacity(raw.len() - 1);
        let mut current = raw[1];
        out.push(current);
        for gap in &raw[2..] {
            current += gap.exp();
            out.push(current);
        }
        out
    }

    /// Adjacent thresholds of class `j`: `(upper, lower)` indices.
    fn neighbours(j: usize, n_classes: usize) -> (Option<usize>, Option<usize>) {
        ((j + 1 < n_classes).then_some(j), j.checked_sub(1))
    }

    /// Negative immediate-threshold loss minus the ridge penalty.
    fn objective(&self, raw: &[f64]) -> f64 {
        let theta = Self::thresholds(raw);
        let coef = raw[0];
        let loglik: f64 = self
            .z
            .iter()
            .zip(self.labels)
            .map(|(&zi, &j)| {
                let eta = coef * zi;
                let (upper, lower) = Self::neighbours(j, self.n_classes);
                upper.map_or(0.0, |k| log_sigmoid(theta[k] - eta))
                    + lower.map_or(0.0, |k| log_sigmoid(eta - theta[k]))
            })
            .sum();
        0.5f64.mul_add(-self.penalty * coef * coef, loglik)
    }

    fn gradient(&self, raw: &[f64]) -> Vec<f64> {
        let theta = Self::thresholds(raw);
        let coef = raw[0];
        let mut d_coef = -self.penalty * coef;
        let mut d_theta = vec![0.0; theta.len()];

        for (&zi, &j) in self.z.iter().zip(self.labels) {
            let eta = coef * zi;
            let (upper, lower) = Self::neighbours(j, self.n_classes);
            if let Some(k) = upper {
                let s = sigmoid(eta - theta[k]);
                d_theta[k] += s;
                d_coef -= zi * s;
            }
            if let Some(k) = lower {
                let s = sigmoid(theta[k] - eta);
                d_theta[k] -= s;
                d_coef += zi * s;
            }
        }

        // chain rule through the cumulative log-gap parameterization
        let mut grad = vec![0.0; raw.len()];
        grad[0] = d_coef;
        let mut tail = 0.0;
        for k in (0..theta.len()).rev() {
            tail += d_theta[k];
            if k == 0 {
                grad[1] = tail;
            } else {
                grad[k + 1] = tail * raw[k + 1].exp();
            }
        }
        grad
    }
}

impl OrdinalLogit {
    /// Estimator with ridge strength `alpha` on the coefficient.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if `alpha` is negative or not finite
    pub fn new(alpha: f64) -> Result<Self> {
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(Error::InvalidInput(format!(
                "alpha must be a non-negative number, got {alpha}"
            )));
        }
        Ok(Self { alpha })
    }

    /// Ridge strength.
    #[must_use]
    pub const fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Fit class labels `y` on predictor `x`.
    ///
    /// # Errors
    ///
    /// Returns error if the samples differ in length, `x` contains NaN, fewer
    /// than two classes are present, or `x` is constant
    #[allow(clippy::cast_precision_loss)]
    pub fn fit(&self, x: &[f64], y: &[i64]) -> Result<OrdinalFit> {
        let y_f: Vec<f64> = y.iter().map(|&v| v as f64).collect();
        validate_pair(x, &y_f, 2)?;

        let mut classes = y.to_vec();
        classes.sort_unstable();
        classes.dedup();
        if classes.len() < 2 {
            return Err(Error::Computation(format!(
                "Ordinal regression needs at least 2 classes, got {}",
                classes.len()
            )));
        }
        let labels: Vec<usize> = y
            .iter()
            .map(|v| classes.binary_search(v).unwrap_or_default())
            .collect();

        let mu = x.mean();
        let sd = x.population_std_dev();
        if sd == 0.0 {
            return Err(Error::Computation(
                "Ordinal regression undefined: predictor has zero variance".to_string(),
            ));
        }
        let z: Vec<f64> = x.iter().map(|v| (v - mu) / sd).collect();

        let problem = Problem {
            z: &z,
            labels: &labels,
            n_classes: classes.len(),
            // penalty on the original-scale coefficient coef = coef_z / sd
            penalty: self.alpha / (sd * sd),
        };

        let mut raw = initial_parameters(&labels, classes.len());
        let mut value = problem.objective(&raw);
        let mut step = 1.0;
        let mut iterations = 0;

        while iterations < MAX_ITERATIONS {
            iterations += 1;
            let grad = problem.gradient(&raw);
            let norm = grad.iter().fold(0.0f64, |m, g| m.max(g.abs()));
            if norm < GRADIENT_TOLERANCE {
                break;
            }

            let mut accepted = false;
            let slope: f64 = grad.iter().map(|g| g * g).sum();
            while step > 1e-12 {
                let candidate: Vec<f64> = raw.iter().zip(&grad).map(|(r, g)| r + step * g).collect();
                let candidate_value = problem.objective(&candidate);
                if candidate_value >= (1e-4 * step).mul_add(slope, value) {
                    raw = candidate;
                    value = candidate_value;
                    accepted = true;
                    break;
                }
                step *= 0.5;
            }
            if !accepted {
                break;
            }
            step = (step * 2.0).min(16.0);
        }

        // back to the original scale: theta - coef_z * (x - mu) / sd
        let coefficient = raw[0] / sd;
        let shift = coefficient * mu;
        let thresholds = Problem::thresholds(&raw)
            .into_iter()
            .map(|t| t + shift)
            .collect();

        Ok(OrdinalFit {
            coefficient,
            thresholds,
            classes,
            iterations,
        })
    }
}

/// Zero coefficient and thresholds at the logits of cumulative class shares.
#[allow(clippy::cast_precision_loss)]
fn initial_parameters(labels: &[usize], n_classes: usize) -> Vec<f64> {
    let mut counts = vec![0usize; n_classes];
    for &j in labels {
        counts[j] += 1;
    }
    let n = labels.len() as f64;
    let mut raw = vec![0.0; n_classes];
    let mut cumulative = 0usize;
    let mut previous = 0.0;
    for k in 0..n_classes - 1 {
        cumulative += counts[k];
        let share = cumulative as f64 / n;
        let theta = (share / (1.0 - share)).ln();
        if k == 0 {
            raw[1] = theta;
        } else {
            raw[k + 1] = (theta - previous).ln();
        }
        previous = theta;
    }
    raw
}
