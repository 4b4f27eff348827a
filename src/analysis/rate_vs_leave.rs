//! Pay rate vs total leave hours
//!
//! Latest pay rate per employee against vacation plus sick leave hours:
//! Pearson correlation with its p-value, and a least-squares fit of leave on
//! rate.

use super::{Analysis, Computed};
use crate::metrics::MetricRecord;
use crate::narrative::{describe, MetricKind, Subject};
use crate::source::Table;
use crate::stats::{linear_regression, pearson};
use crate::Result;

/// Metric name for Pearson r.
pub const CORRELATION_METRIC: &str = "Correlation Rate vs Total Leave";
/// Metric name for the correlation p-value.
pub const SIGNIFICANCE_METRIC: &str = "Significance (p-value) Rate vs Total Leave";
/// Metric name for the regression slope.
pub const SLOPE_METRIC: &str = "Regression Slope Rate vs Total Leave";
/// Metric name for R^2.
pub const R_SQUARED_METRIC: &str = "Regression R2 Rate vs Total Leave";

const SUBJECT: Subject<'static> = Subject {
    x: "pay rate",
    y: "total leave",
};

const QUERY: &str = "
SELECT
    e.BusinessEntityID,
    e.JobTitle,
    e.VacationHours,
    e.SickLeaveHours,
    e.HireDate,
    p.Rate,
    p.RateChangeDate
FROM Employee e
JOIN EmployeePayHistory p
    ON e.BusinessEntityID = p.BusinessEntityID
WHERE p.RateChangeDate = (
    SELECT MAX(RateChangeDate)
    FROM EmployeePayHistory p2
    WHERE p2.BusinessEntityID = e.BusinessEntityID
)";

/// Pay rate vs total leave analysis.
#[derive(Debug, Clone, Copy, Default)]
pub struct RateVsLeave;

impl RateVsLeave {
    /// Create the analysis.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Compute values and records from the two aligned columns.
    ///
    /// # Errors
    ///
    /// Returns error if the statistics reject the sample or a value cannot
    /// be classified
    pub fn compute_from(&self, rate: &[f64], total_leave: &[f64]) -> Result<Computed> {
        let corr = pearson(rate, total_leave)?;
        let fit = linear_regression(rate, total_leave)?;

        let records = vec![
            MetricRecord::new(
                CORRELATION_METRIC,
                corr.coefficient,
                describe(
                    MetricKind::CorrelationStrength,
                    corr.coefficient,
                    "Pearson correlation r",
                    SUBJECT,
                )?,
                "Pearson correlation",
            )?,
            MetricRecord::new(
                SIGNIFICANCE_METRIC,
                corr.p_value,
                describe(MetricKind::Significance, corr.p_value, "p-value", SUBJECT)?,
                "Statistical significance test",
            )?,
            MetricRecord::new(
                SLOPE_METRIC,
                fit.slope,
                describe(MetricKind::RegressionSlope, fit.slope, "Regression slope", SUBJECT)?,
                "Linear Regression",
            )?,
            MetricRecord::new(
                R_SQUARED_METRIC,
                fit.r_squared,
                describe(
                    MetricKind::RSquared,
                    fit.r_squared,
                    "Coefficient of determination R2",
                    SUBJECT,
                )?,
                "Linear Regression",
            )?,
        ];

        Ok(Computed {
            sample_size: corr.n,
            values: vec![
                ("correlation (r)".to_string(), corr.coefficient),
                ("significance (p)".to_string(), corr.p_value),
                ("slope".to_string(), fit.slope),
                ("intercept".to_string(), fit.intercept),
                ("r_squared".to_string(), fit.r_squared),
            ],
            records,
        })
    }
}

impl Analysis for RateVsLeave {
    fn name(&self) -> &str {
        "rate-vs-leave"
    }

    fn query(&self) -> &str {
        QUERY
    }

    fn compute(&self, sample: &Table) -> Result<Computed> {
        let rate = sample.f64_column("Rate")?;
        let vacation = sample.f64_column("VacationHours")?;
        let sick = sample.f64_column("SickLeaveHours")?;
        let total_leave: Vec<f64> = vacation.iter().zip(&sick).map(|(v, s)| v + s).collect();
        self.compute_from(&rate, &total_leave)
    }
}
