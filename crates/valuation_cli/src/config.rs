//! CLI configuration loading
//!
//! Loads configuration from an optional TOML file, then applies
//! `VALUATION__<SECTION>__<KEY>` environment overrides
//! (e.g. `VALUATION__PRICING__PRESET=earnout`).

use serde::{Deserialize, Serialize};
use std::path::Path;

use valuation_core::math::rounding::Rounding;
use valuation_core::types::{CalibrationExample, CalibrationSet, WeightPair};
use valuation_engine::earnout::EarnoutTerms;
use valuation_engine::linear::LinearModelConfig;
use valuation_engine::pricing::{EngineConfig, EnginePreset, PriceConstraints, ProtectedFloor};
use valuation_engine::weights::{ScheduleVariant, WeightRule, WeightSchedule};

use crate::{CliError, Result};

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "VALUATION";

/// CLI configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CliConfig {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Pricing engine settings
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Earnout table settings
    #[serde(default)]
    pub earnout: EarnoutConfig,

    /// Linear valuation model settings
    #[serde(default)]
    pub linear: LinearModelConfig,
}

/// General CLI settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Log level used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Pricing engine settings.
///
/// `preset` selects the base configuration; every other field, when set,
/// overrides the corresponding part of the preset.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PricingConfig {
    /// Base preset
    #[serde(default)]
    pub preset: EnginePreset,

    /// Named schedule override
    pub schedule: Option<ScheduleVariant>,

    /// Custom weight rules; replaces any named schedule
    pub rules: Option<Vec<WeightRule>>,

    /// Weights used when no custom rule matches
    pub default_weights: Option<WeightPair>,

    /// Rounding override
    pub rounding: Option<Rounding>,

    /// Ceiling override
    pub ceiling: Option<f64>,

    /// Floor override
    pub floor: Option<f64>,

    /// Protected floor override, referencing the calibration minimums
    pub protected_floor: Option<ProtectedFloorConfig>,

    /// Custom calibration examples
    pub calibration: Option<Vec<CalibrationExample>>,
}

/// Protected floor settings
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ProtectedFloorConfig {
    /// Guaranteed price
    pub price: f64,
    /// Maximum relative variation from the calibration minimums
    pub tolerance: f64,
}

/// Earnout settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EarnoutConfig {
    /// Engine preset used to price both years
    #[serde(default = "default_earnout_preset")]
    pub preset: EnginePreset,

    /// Commercial terms
    #[serde(flatten)]
    pub terms: EarnoutTerms,
}

impl Default for EarnoutConfig {
    fn default() -> Self {
        Self {
            preset: default_earnout_preset(),
            terms: EarnoutTerms::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_earnout_preset() -> EnginePreset {
    EnginePreset::Earnout
}

impl CliConfig {
    /// Load configuration from `path` (if it exists) and the environment.
    pub fn load(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        let config: CliConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.general.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.general.log_level, valid_log_levels
            ));
        }

        if self.pricing.rules.is_none() && self.pricing.default_weights.is_some() {
            errors.push("default_weights requires custom rules".to_string());
        }

        for preset in [self.pricing.preset, self.earnout.preset] {
            if let Err(e) = self.engine_config(preset).and_then(|c| {
                c.schedule.validate()?;
                c.constraints.validate()?;
                Ok(())
            }) {
                errors.push(format!("pricing ({}): {}", preset, e));
            }
        }

        if let Err(e) = self.earnout.terms.validate() {
            errors.push(format!("earnout: {}", e));
        }
        if let Err(e) = self.linear.validate() {
            errors.push(format!("linear: {}", e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CliError::InvalidConfig(errors.join("; ")))
        }
    }

    /// Engine configuration for `preset` with this file's overrides applied.
    pub fn engine_config(
        &self,
        preset: EnginePreset,
    ) -> valuation_core::types::Result<EngineConfig> {
        let pricing = &self.pricing;
        let mut engine = EngineConfig::preset(preset);

        if let Some(examples) = &pricing.calibration {
            engine.calibration = CalibrationSet::new(examples.clone())?;
            // Re-anchor a preset protected floor on the new minimums
            if let Some(protected) = engine.constraints.protected_floor {
                engine.constraints.protected_floor = Some(ProtectedFloor::from_calibration(
                    protected.price,
                    protected.tolerance,
                    &engine.calibration,
                ));
            }
        }

        if let Some(rules) = &pricing.rules {
            let default = pricing.default_weights.unwrap_or(WeightPair::NAIVE);
            engine.schedule = WeightSchedule::new(rules.clone(), default);
        } else if let Some(variant) = pricing.schedule {
            engine.schedule = variant.schedule();
        }

        if let Some(rounding) = pricing.rounding {
            engine.rounding = rounding;
        }

        let mut constraints: PriceConstraints = engine.constraints;
        if let Some(ceiling) = pricing.ceiling {
            constraints.ceiling = Some(ceiling);
        }
        if let Some(floor) = pricing.floor {
            constraints.floor = Some(floor);
        }
        if let Some(protected) = pricing.protected_floor {
            constraints.protected_floor = Some(ProtectedFloor::from_calibration(
                protected.price,
                protected.tolerance,
                &engine.calibration,
            ));
        }
        engine.constraints = constraints;

        Ok(engine)
    }
}
