//! Piecewise EBIT/Revenue weighting.
//!
//! A [`WeightSchedule`] is an ordered list of [`WeightRule`]s evaluated top to
//! bottom against the EBIT percentage; the first matching rule supplies the
//! weights, and a default pair applies when none match. Boundary handling
//! (strict or inclusive) is part of each rule, so the published variants can
//! be reproduced exactly:
//!
//! | EBIT %      | Standard       | Banded        | Inclusive      |
//! |-------------|----------------|---------------|----------------|
//! | 3           | (0.7, 0.3)     | (0.7, 0.3)    | (0.9, 0.1)     |
//! | 10          | (0.3, 0.7)     | (0.3, 0.7)    | (0.5, 0.5)     |
//! | 30          | (0.3, 0.7)     | (0.2, 0.8)    | (0.3, 0.7)     |
//! | 40          | (0.2, 0.8)     | (0.1, 0.9)    | (0.2, 0.8)     |
//! | 50          | (0.1, 0.9)     | (0.05, 0.95)  | (0.1, 0.9)     |

use valuation_core::types::{Result, ValuationError, WeightPair};

/// Comparison a rule applies to the EBIT percentage.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Bound {
    /// `percentage < threshold`
    Below(f64),
    /// `percentage <= threshold`
    AtMost(f64),
    /// `percentage > threshold`
    Above(f64),
    /// `percentage >= threshold`
    AtLeast(f64),
}

impl Bound {
    /// Whether `percentage` satisfies this bound.
    #[inline]
    pub fn matches(&self, percentage: f64) -> bool {
        match *self {
            Bound::Below(t) => percentage < t,
            Bound::AtMost(t) => percentage <= t,
            Bound::Above(t) => percentage > t,
            Bound::AtLeast(t) => percentage >= t,
        }
    }

    /// The threshold compared against.
    pub fn threshold(&self) -> f64 {
        match *self {
            Bound::Below(t) | Bound::AtMost(t) | Bound::Above(t) | Bound::AtLeast(t) => t,
        }
    }
}

impl std::fmt::Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bound::Below(t) => write!(f, "< {}%", t),
            Bound::AtMost(t) => write!(f, "<= {}%", t),
            Bound::Above(t) => write!(f, "> {}%", t),
            Bound::AtLeast(t) => write!(f, ">= {}%", t),
        }
    }
}

/// A single bucket of a weight schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightRule {
    /// Condition on the EBIT percentage
    pub bound: Bound,
    /// Weights used when `bound` matches
    pub weights: WeightPair,
}

impl WeightRule {
    /// Create a rule.
    pub fn new(bound: Bound, weights: WeightPair) -> Self {
        Self { bound, weights }
    }
}

/// Named schedule presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScheduleVariant {
    /// Low buckets with `<`, high buckets with `>`, default (0.3, 0.7)
    #[default]
    Standard,
    /// Ascending `<` buckets, default (0.05, 0.95)
    Banded,
    /// Ascending `<=` buckets, default (0.05, 0.95)
    Inclusive,
}

impl ScheduleVariant {
    /// Build the schedule for this preset.
    pub fn schedule(&self) -> WeightSchedule {
        match self {
            ScheduleVariant::Standard => WeightSchedule::standard(),
            ScheduleVariant::Banded => WeightSchedule::banded(),
            ScheduleVariant::Inclusive => WeightSchedule::inclusive(),
        }
    }
}

impl std::str::FromStr for ScheduleVariant {
    type Err = ValuationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(ScheduleVariant::Standard),
            "banded" => Ok(ScheduleVariant::Banded),
            "inclusive" => Ok(ScheduleVariant::Inclusive),
            other => Err(ValuationError::invalid_input(format!(
                "Unknown schedule: {}. Supported: standard, banded, inclusive",
                other
            ))),
        }
    }
}

/// Ordered weight rules with a fallback pair.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightSchedule {
    rules: Vec<WeightRule>,
    default: WeightPair,
}

// Preset pairs all pass `WeightPair::new`; see test_preset_weights_are_valid_pairs.
const fn pair(ebit_weight: f64, revenue_weight: f64) -> WeightPair {
    WeightPair {
        ebit_weight,
        revenue_weight,
    }
}

impl WeightSchedule {
    /// Create a schedule from ordered rules and a default.
    pub fn new(rules: Vec<WeightRule>, default: WeightPair) -> Self {
        Self { rules, default }
    }

    /// Schedule used by the interactive valuation page.
    ///
    /// `<3`, `<5`, `<10`, then `>50`, `>40`, `>30`, default (0.3, 0.7).
    pub fn standard() -> Self {
        Self::new(
            vec![
                WeightRule::new(Bound::Below(3.0), pair(0.9, 0.1)),
                WeightRule::new(Bound::Below(5.0), pair(0.7, 0.3)),
                WeightRule::new(Bound::Below(10.0), pair(0.5, 0.5)),
                WeightRule::new(Bound::Above(50.0), pair(0.05, 0.95)),
                WeightRule::new(Bound::Above(40.0), pair(0.1, 0.9)),
                WeightRule::new(Bound::Above(30.0), pair(0.2, 0.8)),
            ],
            WeightPair::NAIVE,
        )
    }

    /// Schedule used by the earnout table: ascending strict upper bounds.
    pub fn banded() -> Self {
        Self::ascending(Bound::Below)
    }

    /// Banded schedule with inclusive upper bounds.
    pub fn inclusive() -> Self {
        Self::ascending(Bound::AtMost)
    }

    fn ascending(bound: fn(f64) -> Bound) -> Self {
        Self::new(
            vec![
                WeightRule::new(bound(3.0), pair(0.9, 0.1)),
                WeightRule::new(bound(5.0), pair(0.7, 0.3)),
                WeightRule::new(bound(10.0), pair(0.5, 0.5)),
                WeightRule::new(bound(30.0), pair(0.3, 0.7)),
                WeightRule::new(bound(40.0), pair(0.2, 0.8)),
                WeightRule::new(bound(50.0), pair(0.1, 0.9)),
            ],
            pair(0.05, 0.95),
        )
    }

    /// Weights for `ebit_percentage`: first matching rule, else the default.
    ///
    /// A NaN percentage matches no rule and selects the default.
    pub fn select(&self, ebit_percentage: f64) -> WeightPair {
        self.rules
            .iter()
            .find(|rule| rule.bound.matches(ebit_percentage))
            .map(|rule| rule.weights)
            .unwrap_or(self.default)
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[WeightRule] {
        &self.rules
    }

    /// Weights used when no rule matches.
    pub fn default_weights(&self) -> WeightPair {
        self.default
    }

    /// Check every threshold is finite.
    pub fn validate(&self) -> Result<()> {
        match self.rules.iter().find(|r| !r.bound.threshold().is_finite()) {
            Some(rule) => Err(ValuationError::invalid_input(format!(
                "weight rule threshold must be finite, got {}",
                rule.bound
            ))),
            None => Ok(()),
        }
    }
}

impl Default for WeightSchedule {
    fn default() -> Self {
        Self::standard()
    }
}

/// Select weights with the [`WeightSchedule::standard`] schedule.
///
/// # Examples
/// ```
/// use valuation_engine::weights::select_weights;
///
/// assert_eq!(select_weights(2.5).ebit_weight, 0.9);
/// assert_eq!(select_weights(60.0).revenue_weight, 0.95);
/// ```
pub fn select_weights(ebit_percentage: f64) -> WeightPair {
    WeightSchedule::standard().select(ebit_percentage)
}
