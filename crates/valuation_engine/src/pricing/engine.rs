//! Pricing engine.
//!
//! [`compute_price`] is the stateless pricing step; [`PricingEngine`] bundles
//! a calibrated scaling factor with a schedule, constraints and rounding so
//! repeated quotes reuse one calibration.

use tracing::{debug, info};
use valuation_core::math::rounding::Rounding;
use valuation_core::types::{
    ebit_percentage, CalibrationSet, Result, PriceResult, ScalingFactor, ValuationError,
};

use super::constraints::PriceConstraints;
use super::scaling::calibrate;
use crate::weights::{ScheduleVariant, WeightSchedule};

/// Price one company.
///
/// `ebit_percentage = (ebit / revenue) * 100` selects weights from
/// `schedule`; the weighted sum is multiplied by `scaling_factor`, then
/// `constraints` and `rounding` are applied. The rounded price is clamped
/// back into `[floor, ceiling]` when a bound is not on the rounding grid.
///
/// # Errors
/// - `DivisionByZero` when `revenue` is zero
/// - `InvalidInput` when an input is not finite
///
/// # Examples
/// ```
/// use valuation_core::math::rounding::Rounding;
/// use valuation_engine::pricing::{compute_price, PriceConstraints};
/// use valuation_engine::weights::WeightSchedule;
///
/// let result = compute_price(
///     100.0,
///     1000.0,
///     2.0,
///     &WeightSchedule::standard(),
///     &PriceConstraints::none(),
///     Rounding::Cents,
/// )
/// .unwrap();
/// assert_eq!(result.price, 2.0 * (0.3 * 100.0 + 0.7 * 1000.0));
/// ```
pub fn compute_price(
    ebit: f64,
    revenue: f64,
    scaling_factor: f64,
    schedule: &WeightSchedule,
    constraints: &PriceConstraints,
    rounding: Rounding,
) -> Result<PriceResult> {
    if !ebit.is_finite() || !revenue.is_finite() {
        return Err(ValuationError::invalid_input(format!(
            "EBIT and Revenue must be finite, got {} / {}",
            ebit, revenue
        )));
    }

    let ebit_percentage = ebit_percentage(ebit, revenue)?;
    let weights = schedule.select(ebit_percentage);
    let unconstrained_price = weights.blend(ebit, revenue) * scaling_factor;
    let (constrained, constraint) = constraints.apply(unconstrained_price, ebit, revenue)?;

    Ok(PriceResult {
        price: constraints.clamp(rounding.apply(constrained)),
        unconstrained_price,
        ebit_percentage,
        weights,
        scaling_factor,
        constraint,
    })
}

/// Engine presets matching the published valuation pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EnginePreset {
    /// Standard schedule, no constraints, rounded to cents
    #[default]
    Page,
    /// Banded schedule, earnout constraints, rounded to integers
    Earnout,
}

impl std::str::FromStr for EnginePreset {
    type Err = ValuationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "page" => Ok(EnginePreset::Page),
            "earnout" => Ok(EnginePreset::Earnout),
            other => Err(ValuationError::invalid_input(format!(
                "Unknown preset: {}. Supported: page, earnout",
                other
            ))),
        }
    }
}

impl std::fmt::Display for EnginePreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnginePreset::Page => write!(f, "page"),
            EnginePreset::Earnout => write!(f, "earnout"),
        }
    }
}

/// Everything needed to build a [`PricingEngine`].
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Calibration examples
    pub calibration: CalibrationSet,
    /// Weight schedule
    pub schedule: WeightSchedule,
    /// Price constraints
    pub constraints: PriceConstraints,
    /// Final rounding
    pub rounding: Rounding,
}

impl EngineConfig {
    /// Configuration for `preset` over the standard calibration set.
    pub fn preset(preset: EnginePreset) -> Self {
        match preset {
            EnginePreset::Page => Self::valuation_page(),
            EnginePreset::Earnout => Self::earnout_table(),
        }
    }

    /// Interactive valuation page: standard schedule, unconstrained, cents.
    pub fn valuation_page() -> Self {
        Self {
            calibration: CalibrationSet::standard(),
            schedule: ScheduleVariant::Standard.schedule(),
            constraints: PriceConstraints::none(),
            rounding: Rounding::Cents,
        }
    }

    /// Earnout table: banded schedule, `[300, 2025]` with a protected 900
    /// floor, whole-number prices.
    pub fn earnout_table() -> Self {
        let calibration = CalibrationSet::standard();
        Self {
            constraints: PriceConstraints::earnout(&calibration),
            calibration,
            schedule: ScheduleVariant::Banded.schedule(),
            rounding: Rounding::Integer,
        }
    }

    /// Replace the schedule.
    pub fn with_schedule(mut self, schedule: WeightSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Replace the constraints.
    pub fn with_constraints(mut self, constraints: PriceConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Replace the rounding.
    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::valuation_page()
    }
}

/// Calibrated pricing engine.
#[derive(Debug, Clone)]
pub struct PricingEngine {
    config: EngineConfig,
    scaling: ScalingFactor,
}

impl PricingEngine {
    /// Validate `config` and calibrate its scaling factor.
    ///
    /// # Errors
    /// Propagates schedule/constraint validation and calibration errors.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.schedule.validate()?;
        config.constraints.validate()?;
        let scaling = calibrate(&config.calibration)?;

        info!(
            examples = config.calibration.len(),
            scaling_factor = scaling.value,
            rules = config.schedule.rules().len(),
            constrained = !config.constraints.is_empty(),
            "Pricing engine ready"
        );
        Ok(Self { config, scaling })
    }

    /// Engine for a named preset.
    pub fn from_preset(preset: EnginePreset) -> Result<Self> {
        Self::new(EngineConfig::preset(preset))
    }

    /// Price a company with this engine's calibration.
    pub fn price(&self, ebit: f64, revenue: f64) -> Result<PriceResult> {
        let result = compute_price(
            ebit,
            revenue,
            self.scaling.value,
            &self.config.schedule,
            &self.config.constraints,
            self.config.rounding,
        )?;
        debug!(
            ebit,
            revenue,
            ebit_percentage = result.ebit_percentage,
            price = result.price,
            constraint = %result.constraint,
            "Priced company"
        );
        Ok(result)
    }

    /// The calibrated scaling factor.
    pub fn scaling_factor(&self) -> &ScalingFactor {
        &self.scaling
    }

    /// The configuration the engine was built from.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
