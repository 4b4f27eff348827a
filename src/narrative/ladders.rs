//! Threshold ladders, one per [`MetricKind`]
//!
//! These bounds are shared by every stored description; changing one changes
//! how existing metrics are worded on the next run.

use super::{Bucket, MetricKind};

/// Whether rungs compare against the value or its magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    /// Compare `abs(value)`
    Absolute,
    /// Compare `value` as is
    Signed,
}

/// One bounded bucket: matches when the compared value is `< below`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rung {
    /// Exclusive upper bound
    pub below: f64,
    /// Bucket selected
    pub bucket: Bucket,
    /// Sentence template
    pub template: &'static str,
}

/// Catch-all after the last rung.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tail {
    /// Single bucket
    Fixed(Bucket, &'static str),
    /// Split on the sign of the original value (`> 0` is positive)
    BySign {
        /// Bucket and template for positive values
        positive: (Bucket, &'static str),
        /// Bucket and template for zero or negative values
        negative: (Bucket, &'static str),
    },
}

/// Ordered rungs plus tail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ladder {
    /// Comparison scale
    pub scale: Scale,
    /// Rungs in ascending bound order
    pub rungs: &'static [Rung],
    /// Catch-all bucket
    pub tail: Tail,
}

static CORRELATION_STRENGTH: Ladder = Ladder {
    scale: Scale::Absolute,
    rungs: &[
        Rung {
            below: 0.1,
            bucket: Bucket::Negligible,
            template: "There is practically no linear relationship between {x} and {y}.",
        },
        Rung {
            below: 0.3,
            bucket: Bucket::Weak,
            template: "There is a weak linear relationship between {x} and {y}.",
        },
        Rung {
            below: 0.5,
            bucket: Bucket::Moderate,
            template: "There is a moderate linear relationship between {x} and {y}.",
        },
    ],
    tail: Tail::Fixed(
        Bucket::Strong,
        "There is a strong linear relationship between {x} and {y}.",
    ),
};

static SIGNIFICANCE: Ladder = Ladder {
    scale: Scale::Signed,
    rungs: &[Rung {
        below: 0.05,
        bucket: Bucket::Significant,
        template: "At the 0.05 significance level H0 is rejected; \
                   the relationship between {x} and {y} is significant.",
    }],
    tail: Tail::Fixed(
        Bucket::NotSignificant,
        "At the 0.05 significance level H0 is not rejected; \
         the relationship between {x} and {y} is not significant.",
    ),
};

static REGRESSION_SLOPE: Ladder = Ladder {
    scale: Scale::Absolute,
    rungs: &[Rung {
        below: 0.1,
        bucket: Bucket::Negligible,
        template: "The regression slope is close to zero; \
                   changes in {x} have no notable effect on {y}.",
    }],
    tail: Tail::BySign {
        positive: (
            Bucket::Positive,
            "Positive slope; higher {x} goes together with more {y}.",
        ),
        negative: (
            Bucket::Negative,
            "Negative slope; higher {x} goes together with less {y}.",
        ),
    },
};

static R_SQUARED: Ladder = Ladder {
    scale: Scale::Signed,
    rungs: &[
        Rung {
            below: 0.1,
            bucket: Bucket::VeryLow,
            template: "Very low; {x} explains almost none of the variation in {y}.",
        },
        Rung {
            below: 0.3,
            bucket: Bucket::Low,
            template: "Low; {x} explains a small part of the variation in {y}.",
        },
        Rung {
            below: 0.5,
            bucket: Bucket::Moderate,
            template: "Moderate; part of the variation in {y} is explained by {x}.",
        },
    ],
    tail: Tail::Fixed(
        Bucket::High,
        "High; {x} explains most of the variation in {y}.",
    ),
};

// `>= 0.7` high and `>= 0.6` marginal, written as ascending strict bounds
static ACCURACY: Ladder = Ladder {
    scale: Scale::Signed,
    rungs: &[
        Rung {
            below: 0.6,
            bucket: Bucket::Low,
            template: "Accuracy is low; {x} alone is not a good predictor of {y}.",
        },
        Rung {
            below: 0.7,
            bucket: Bucket::Marginal,
            template: "Accuracy is only slightly above chance; \
                       {x} has a limited effect on predicting {y}.",
        },
    ],
    tail: Tail::Fixed(
        Bucket::High,
        "{y} is predicted from {x} with relatively high accuracy.",
    ),
};

static RANK_CORRELATION: Ladder = Ladder {
    scale: Scale::Absolute,
    rungs: &[Rung {
        below: 0.1,
        bucket: Bucket::Negligible,
        template: "There is no meaningful monotonic relationship between {x} and {y}; \
                   {y} is not explained by {x} alone.",
    }],
    tail: Tail::BySign {
        positive: (
            Bucket::Positive,
            "There is a positive monotonic relationship between {x} and {y}; \
             higher {x} tends to come with higher {y}.",
        ),
        negative: (
            Bucket::Negative,
            "There is a negative monotonic relationship between {x} and {y}; \
             higher {x} tends to come with lower {y}.",
        ),
    },
};

static COEFFICIENT_SIGN: Ladder = Ladder {
    scale: Scale::Signed,
    rungs: &[],
    tail: Tail::BySign {
        positive: (
            Bucket::Positive,
            "Higher {x} raises the odds of a higher {y}; \
             the effect size should be checked against additional variables.",
        ),
        negative: (
            Bucket::Negative,
            "Higher {x} goes with slightly lower odds of a higher {y}, \
             an inverse relationship that may not be statistically significant.",
        ),
    },
};

/// Ladder for a metric kind.
#[must_use]
pub fn ladder(kind: MetricKind) -> &'static Ladder {
    match kind {
        MetricKind::CorrelationStrength => &CORRELATION_STRENGTH,
        MetricKind::Significance => &SIGNIFICANCE,
        MetricKind::RegressionSlope => &REGRESSION_SLOPE,
        MetricKind::RSquared => &R_SQUARED,
        MetricKind::Accuracy => &ACCURACY,
        MetricKind::RankCorrelation => &RANK_CORRELATION,
        MetricKind::CoefficientSign => &COEFFICIENT_SIGN,
    }
}
