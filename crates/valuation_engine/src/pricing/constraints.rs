//! Price caps and floors.
//!
//! Three independent, optional constraints are applied to the weighted price:
//!
//! 1. **Protected floor**: a price below `price` is lifted back to `price`
//!    while both EBIT and Revenue stay within `tolerance` of the calibration
//!    minimums.
//! 2. **Floor**: otherwise the price never drops below `floor`.
//! 3. **Ceiling**: the price never exceeds `ceiling`.
//!
//! Construction validates `floor <= protected price <= ceiling`, so the
//! result always lies in `[floor, ceiling]`.

use valuation_core::types::{CalibrationSet, ConstraintOutcome, Result, ValuationError};

/// Relative variation `|current - minimum| / minimum`.
///
/// # Errors
/// `DivisionByZero` when `minimum` is zero.
pub fn variation(current: f64, minimum: f64) -> Result<f64> {
    if minimum == 0.0 {
        return Err(ValuationError::division_by_zero("variation reference minimum"));
    }
    Ok((current - minimum).abs() / minimum)
}

/// Floor that holds while the company stays close to the smallest
/// calibration deal.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProtectedFloor {
    /// Price guaranteed while within tolerance
    pub price: f64,
    /// Maximum relative variation from the minimums, e.g. 0.15
    pub tolerance: f64,
    /// Reference EBIT, normally the calibration minimum
    pub min_ebit: f64,
    /// Reference Revenue, normally the calibration minimum
    pub min_revenue: f64,
}

impl ProtectedFloor {
    /// Protected floor referencing the minimums of `set`.
    pub fn from_calibration(price: f64, tolerance: f64, set: &CalibrationSet) -> Self {
        Self {
            price,
            tolerance,
            min_ebit: set.min_ebit(),
            min_revenue: set.min_revenue(),
        }
    }

    /// Whether both inputs lie within tolerance of the reference minimums.
    pub fn applies_to(&self, ebit: f64, revenue: f64) -> Result<bool> {
        Ok(variation(ebit, self.min_ebit)? <= self.tolerance
            && variation(revenue, self.min_revenue)? <= self.tolerance)
    }
}

/// Optional ceiling, floor and protected floor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PriceConstraints {
    /// Maximum price
    pub ceiling: Option<f64>,
    /// Minimum price
    pub floor: Option<f64>,
    /// Conditional floor near the calibration minimums
    pub protected_floor: Option<ProtectedFloor>,
}

impl PriceConstraints {
    /// No constraints.
    pub fn none() -> Self {
        Self::default()
    }

    /// Cap, floor and protected floor of the earnout table, referencing `set`.
    ///
    /// Ceiling 2025, floor 300, protected price 900 within 15%.
    pub fn earnout(set: &CalibrationSet) -> Self {
        Self {
            ceiling: Some(2025.0),
            floor: Some(300.0),
            protected_floor: Some(ProtectedFloor::from_calibration(900.0, 0.15, set)),
        }
    }

    /// Set the ceiling.
    pub fn with_ceiling(mut self, ceiling: f64) -> Self {
        self.ceiling = Some(ceiling);
        self
    }

    /// Set the floor.
    pub fn with_floor(mut self, floor: f64) -> Self {
        self.floor = Some(floor);
        self
    }

    /// Set the protected floor.
    pub fn with_protected_floor(mut self, protected: ProtectedFloor) -> Self {
        self.protected_floor = Some(protected);
        self
    }

    /// Check bounds are finite and ordered.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("ceiling", self.ceiling), ("floor", self.floor)] {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(ValuationError::invalid_constraint(format!(
                        "{} must be finite, got {}",
                        name, v
                    )));
                }
            }
        }

        if let (Some(floor), Some(ceiling)) = (self.floor, self.ceiling) {
            if floor > ceiling {
                return Err(ValuationError::invalid_constraint(format!(
                    "floor {} exceeds ceiling {}",
                    floor, ceiling
                )));
            }
        }

        if let Some(protected) = self.protected_floor {
            if !protected.price.is_finite()
                || protected.tolerance.is_nan()
                || protected.tolerance < 0.0
            {
                return Err(ValuationError::invalid_constraint(format!(
                    "protected floor needs a finite price and non-negative tolerance, got {} / {}",
                    protected.price, protected.tolerance
                )));
            }
            if protected.min_ebit == 0.0 || protected.min_revenue == 0.0 {
                return Err(ValuationError::invalid_constraint(
                    "protected floor reference minimums must be non-zero",
                ));
            }
            if self.floor.is_some_and(|f| protected.price < f)
                || self.ceiling.is_some_and(|c| protected.price > c)
            {
                return Err(ValuationError::invalid_constraint(format!(
                    "protected floor {} lies outside [floor, ceiling]",
                    protected.price
                )));
            }
        }
        Ok(())
    }

    /// Apply the constraints to `price` for the given inputs.
    ///
    /// # Examples
    /// ```
    /// use valuation_core::types::{CalibrationSet, ConstraintOutcome};
    /// use valuation_engine::pricing::PriceConstraints;
    ///
    /// let constraints = PriceConstraints::earnout(&CalibrationSet::standard());
    /// let (price, outcome) = constraints.apply(891.43, 230.0, 2300.0).unwrap();
    /// assert_eq!(price, 900.0);
    /// assert_eq!(outcome, ConstraintOutcome::ProtectedFloor);
    /// ```
    pub fn apply(&self, price: f64, ebit: f64, revenue: f64) -> Result<(f64, ConstraintOutcome)> {
        if let Some(protected) = self.protected_floor {
            if price < protected.price && protected.applies_to(ebit, revenue)? {
                return Ok((protected.price, ConstraintOutcome::ProtectedFloor));
            }
        }

        if let Some(floor) = self.floor {
            if price < floor {
                return Ok((floor, ConstraintOutcome::Floored));
            }
        }

        if let Some(ceiling) = self.ceiling {
            if price > ceiling {
                return Ok((ceiling, ConstraintOutcome::Capped));
            }
        }

        Ok((price, ConstraintOutcome::Unconstrained))
    }

    /// True when no constraint is configured.
    pub fn is_empty(&self) -> bool {
        self.ceiling.is_none() && self.floor.is_none() && self.protected_floor.is_none()
    }

    /// Clamp `price` into `[floor, ceiling]`, ignoring the protected floor.
    ///
    /// Used after rounding, which can move a bound that is not on the
    /// rounding grid back outside the range.
    pub fn clamp(&self, price: f64) -> f64 {
        let price = self.floor.map_or(price, |floor| price.max(floor));
        self.ceiling.map_or(price, |ceiling| price.min(ceiling))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_keeps_price_inside_bounds() {
        let constraints = PriceConstraints::none()
            .with_floor(300.4)
            .with_ceiling(2025.6);
        assert_eq!(constraints.clamp(300.0), 300.4);
        assert_eq!(constraints.clamp(2026.0), 2025.6);
        assert_eq!(constraints.clamp(1000.0), 1000.0);
        assert_eq!(PriceConstraints::none().clamp(-5.0), -5.0);
    }

    fn earnout() -> PriceConstraints {
        PriceConstraints::earnout(&CalibrationSet::standard())
    }

    #[test]
    fn test_variation() {
        assert!((variation(264.5, 230.0).unwrap() - 0.15).abs() < 1e-12);
        assert!((variation(195.5, 230.0).unwrap() - 0.15).abs() < 1e-12);
        assert!(variation(1.0, 0.0).is_err());
    }

    #[test]
    fn test_earnout_preset_is_valid() {
        assert!(earnout().validate().is_ok());
        assert!(PriceConstraints::none().validate().is_ok());
        assert!(PriceConstraints::none().is_empty());
    }

    #[test]
    fn test_protected_floor_within_tolerance() {
        let (price, outcome) = earnout().apply(850.0, 250.0, 2500.0).unwrap();
        assert_eq!(price, 900.0);
        assert_eq!(outcome, ConstraintOutcome::ProtectedFloor);
    }

    #[test]
    fn test_protected_floor_needs_both_inputs_close() {
        // Revenue within 15%, EBIT 30% below the minimum
        let (price, outcome) = earnout().apply(850.0, 161.0, 2300.0).unwrap();
        assert_eq!(price, 850.0);
        assert_eq!(outcome, ConstraintOutcome::Unconstrained);
    }

    #[test]
    fn test_hard_floor() {
        let (price, outcome) = earnout().apply(120.0, 50.0, 400.0).unwrap();
        assert_eq!(price, 300.0);
        assert_eq!(outcome, ConstraintOutcome::Floored);
    }

    #[test]
    fn test_ceiling() {
        let (price, outcome) = earnout().apply(3875.78, 1000.0, 10000.0).unwrap();
        assert_eq!(price, 2025.0);
        assert_eq!(outcome, ConstraintOutcome::Capped);
    }

    #[test]
    fn test_above_protected_price_untouched() {
        let (price, outcome) = earnout().apply(950.0, 230.0, 2300.0).unwrap();
        assert_eq!(price, 950.0);
        assert_eq!(outcome, ConstraintOutcome::Unconstrained);
    }

    #[test]
    fn test_floor_above_ceiling_rejected() {
        let constraints = PriceConstraints::none().with_floor(500.0).with_ceiling(400.0);
        assert!(matches!(
            constraints.validate(),
            Err(ValuationError::InvalidConstraint(_))
        ));
    }

    #[test]
    fn test_protected_price_outside_bounds_rejected() {
        let set = CalibrationSet::standard();
        let constraints = PriceConstraints::none()
            .with_ceiling(800.0)
            .with_protected_floor(ProtectedFloor::from_calibration(900.0, 0.15, &set));
        assert!(constraints.validate().is_err());
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let set = CalibrationSet::standard();
        let constraints = PriceConstraints::none()
            .with_protected_floor(ProtectedFloor::from_calibration(900.0, -0.1, &set));
        assert!(constraints.validate().is_err());
    }

    #[test]
    fn test_non_finite_ceiling_rejected() {
        assert!(PriceConstraints::none()
            .with_ceiling(f64::NAN)
            .validate()
            .is_err());
    }
}
