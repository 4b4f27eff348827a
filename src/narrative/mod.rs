//! Narrative classifier
//!
//! Maps a metric value to a magnitude bucket and a pre-authored sentence. All
//! threshold ladders live in one table ([`ladder`]) keyed by [`MetricKind`],
//! so every analysis classifies the same kind of metric identically.
//!
//! Rungs are evaluated in ascending order with a strict `<`; the first rung
//! whose bound exceeds the (possibly absolute) value wins, and the ladder's
//! tail catches everything else.
//!
//! ```rust
//! use hr_analytics::narrative::{classify, Bucket, MetricKind};
//!
//! let n = classify(MetricKind::CorrelationStrength, -0.42).unwrap();
//! assert_eq!(n.bucket, Bucket::Moderate);
//!
//! let n = classify(MetricKind::Significance, 0.05).unwrap();
//! assert_eq!(n.bucket, Bucket::NotSignificant);
//! ```

mod ladders;

pub use ladders::{ladder, Ladder, Rung, Scale, Tail};

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which ladder applies to a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKind {
    /// Pearson-style correlation strength, on `|r|`
    CorrelationStrength,
    /// Hypothesis test p-value at the 0.05 level
    Significance,
    /// Regression slope: negligible below `|0.1|`, else by sign
    RegressionSlope,
    /// Coefficient of determination
    RSquared,
    /// Classification accuracy
    Accuracy,
    /// Rank correlation: negligible below `|0.1|`, else by sign
    RankCorrelation,
    /// Model coefficient: positive effect vs inverse effect
    CoefficientSign,
}

impl MetricKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::CorrelationStrength,
        Self::Significance,
        Self::RegressionSlope,
        Self::RSquared,
        Self::Accuracy,
        Self::RankCorrelation,
        Self::CoefficientSign,
    ];
}

/// Magnitude bucket a value falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bucket {
    /// Effect too small to matter
    Negligible,
    /// Weak relationship
    Weak,
    /// Moderate relationship / explanatory power
    Moderate,
    /// Strong relationship
    Strong,
    /// Reject H0
    Significant,
    /// Fail to reject H0
    NotSignificant,
    /// Positive direction
    Positive,
    /// Negative direction
    Negative,
    /// Almost no explanatory power
    VeryLow,
    /// Low explanatory power or accuracy
    Low,
    /// Slightly better than chance
    Marginal,
    /// High explanatory power or accuracy
    High,
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Negligible => "negligible",
            Self::Weak => "weak",
            Self::Moderate => "moderate",
            Self::Strong => "strong",
            Self::Significant => "significant",
            Self::NotSignificant => "not significant",
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::VeryLow => "very low",
            Self::Low => "low",
            Self::Marginal => "marginal",
            Self::High => "high",
        };
        f.write_str(s)
    }
}

/// The two variables a narrative talks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subject<'a> {
    /// Predictor, e.g. "pay rate"
    pub x: &'a str,
    /// Response, e.g. "total leave"
    pub y: &'a str,
}

/// Classification result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Narrative {
    /// Ladder used
    pub kind: MetricKind,
    /// Bucket selected
    pub bucket: Bucket,
    /// Sentence template with `{x}` / `{y}` placeholders
    pub template: &'static str,
}

impl Narrative {
    /// Sentence with the subject's variable names filled in.
    #[must_use]
    pub fn render(&self, subject: Subject<'_>) -> String {
        self.template.replace("{x}", subject.x).replace("{y}", subject.y)
    }
}

/// Classify `value` on the ladder for `kind`.
///
/// # Errors
///
/// Returns `Error::InvalidInput` for NaN or infinite values
pub fn classify(kind: MetricKind, value: f64) -> Result<Narrative> {
    if !value.is_finite() {
        return Err(Error::InvalidInput(format!(
            "Cannot classify non-finite {kind:?} value {value}"
        )));
    }
    let ladder = ladder(kind);
    let v = match ladder.scale {
        Scale::Absolute => value.abs(),
        Scale::Signed => value,
    };

    let (bucket, template) = ladder
        .rungs
        .iter()
        .find(|rung| v < rung.below)
        .map_or_else(
            || match ladder.tail {
                Tail::Fixed(bucket, template) => (bucket, template),
                Tail::BySign {
                    positive,
                    negative,
                } => {
                    if value > 0.0 {
                        positive
                    } else {
                        negative
                    }
                }
            },
            |rung| (rung.bucket, rung.template),
        );

    Ok(Narrative {
        kind,
        bucket,
        template,
    })
}

/// Full description: `"{label} = {value:.3}. {sentence}"`.
///
/// # Errors
///
/// Returns `Error::InvalidInput` for NaN or infinite values
pub fn describe(kind: MetricKind, value: f64, label: &str, subject: Subject<'_>) -> Result<String> {
    let narrative = classify(kind, value)?;
    Ok(format!("{label} = {value:.3}. {}", narrative.render(subject)))
}
