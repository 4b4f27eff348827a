//! Tenure vs organization level
//!
//! Years since hire against organization level: Spearman rank correlation and
//! an ordinal logistic regression of level on tenure. Employees without a
//! level or hire date are dropped before anything is computed.

use super::{Analysis, Computed};
use crate::metrics::MetricRecord;
use crate::narrative::{describe, MetricKind, Subject};
use crate::source::{Cell, Table};
use crate::stats::{spearman, OrdinalLogit};
use crate::{Error, Result};
use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

/// Metric name for Spearman rho.
pub const SPEARMAN_METRIC: &str = "Spearman Correlation Tenure vs OrganizationLevel";
/// Metric name for the ordinal coefficient.
pub const COEFFICIENT_METRIC: &str = "Ordinal Regression Coefficient";
/// Metric name for in-sample accuracy.
pub const ACCURACY_METRIC: &str = "Ordinal Regression Accuracy";

const SUBJECT: Subject<'static> = Subject {
    x: "tenure",
    y: "organization level",
};

const QUERY: &str = "
SELECT
    BusinessEntityID,
    HireDate,
    OrganizationLevel
FROM Employee";

const DAYS_PER_YEAR: f64 = 365.0;

/// Tenure vs organization level analysis.
#[derive(Debug, Clone)]
pub struct TenureVsLevel {
    reference_date: NaiveDate,
    model: OrdinalLogit,
}

impl Default for TenureVsLevel {
    fn default() -> Self {
        Self::new()
    }
}

impl TenureVsLevel {
    /// Measure tenure up to today (UTC).
    #[must_use]
    pub fn new() -> Self {
        Self::with_reference_date(Utc::now().date_naive())
    }

    /// Measure tenure up to a fixed date.
    #[must_use]
    pub fn with_reference_date(reference_date: NaiveDate) -> Self {
        Self {
            reference_date,
            model: OrdinalLogit::default(),
        }
    }

    /// Use a differently regularized ordinal model.
    #[must_use]
    pub const fn model(mut self, model: OrdinalLogit) -> Self {
        self.model = model;
        self
    }

    /// Date tenure is measured to.
    #[must_use]
    pub const fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Years between `hire_date` and the reference date.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn tenure_years(&self, hire_date: NaiveDate) -> f64 {
        (self.reference_date - hire_date).num_days() as f64 / DAYS_PER_YEAR
    }

    /// Compute values and records from aligned tenure/level columns.
    ///
    /// # Errors
    ///
    /// Returns error if the statistics reject the sample or a value cannot
    /// be classified
    #[allow(clippy::cast_precision_loss)]
    pub fn compute_from(&self, tenure: &[f64], level: &[i64]) -> Result<Computed> {
        let level_f: Vec<f64> = level.iter().map(|&l| l as f64).collect();
        let rank = spearman(tenure, &level_f)?;
        let fit = self.model.fit(tenure, level)?;
        let accuracy = fit.accuracy(tenure, level);

        let records = vec![
            MetricRecord::new(
                SPEARMAN_METRIC,
                rank.coefficient,
                describe(
                    MetricKind::RankCorrelation,
                    rank.coefficient,
                    "Spearman rank correlation rho",
                    SUBJECT,
                )?,
                "Spearman Rank Correlation",
            )?,
            MetricRecord::new(
                COEFFICIENT_METRIC,
                fit.coefficient,
                describe(
                    MetricKind::CoefficientSign,
                    fit.coefficient,
                    "Ordinal regression coefficient",
                    SUBJECT,
                )?,
                "Ordinal Logistic Regression",
            )?,
            MetricRecord::new(
                ACCURACY_METRIC,
                accuracy,
                describe(MetricKind::Accuracy, accuracy, "Ordinal model accuracy", SUBJECT)?,
                "Ordinal Logistic Regression",
            )?,
        ];

        let mut values = vec![
            ("spearman (rho)".to_string(), rank.coefficient),
            ("p-value".to_string(), rank.p_value),
            ("coefficient (tenure effect)".to_string(), fit.coefficient),
            ("accuracy".to_string(), accuracy),
        ];
        values.extend(
            fit.thresholds
                .iter()
                .enumerate()
                .map(|(k, t)| (format!("threshold {}|{}", fit.classes[k], fit.classes[k + 1]), *t)),
        );

        Ok(Computed {
            sample_size: tenure.len(),
            values,
            records,
        })
    }
}

fn parse_hire_date(text: &str, row: usize) -> Result<NaiveDate> {
    // accepts "2009-01-14" and "2009-01-14 00:00:00.000"
    let day = text.get(..10).unwrap_or(text);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|e| {
        Error::InvalidInput(format!("HireDate row {row}: cannot parse '{text}': {e}"))
    })
}

#[allow(clippy::cast_possible_truncation)]
fn parse_level(cell: &Cell, row: usize) -> Result<i64> {
    match cell {
        Cell::Integer(i) => Ok(*i),
        Cell::Real(r) if r.fract() == 0.0 => Ok(*r as i64),
        other => Err(Error::InvalidInput(format!(
            "OrganizationLevel row {row}: expected an integer, got {other:?}"
        ))),
    }
}

impl Analysis for TenureVsLevel {
    fn name(&self) -> &str {
        "tenure-vs-level"
    }

    fn query(&self) -> &str {
        QUERY
    }

    fn compute(&self, sample: &Table) -> Result<Computed> {
        let hire_dates = sample.text_column("HireDate")?;
        let levels = sample.column("OrganizationLevel")?;

        let mut tenure = Vec::with_capacity(sample.num_rows());
        let mut level = Vec::with_capacity(sample.num_rows());
        for (row, (hire, lvl)) in hire_dates.into_iter().zip(levels).enumerate() {
            let Some(text) = hire else { continue };
            if lvl.is_null() {
                continue;
            }
            tenure.push(self.tenure_years(parse_hire_date(text, row)?));
            level.push(parse_level(lvl, row)?);
        }

        let dropped = sample.num_rows() - tenure.len();
        if dropped > 0 {
            warn!(dropped, "rows without OrganizationLevel or HireDate dropped");
        }
        info!(before = sample.num_rows(), after = tenure.len(), "missing values removed");

        self.compute_from(&tenure, &level)
    }
}
