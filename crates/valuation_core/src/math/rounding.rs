//! Price rounding.
//!
//! Ties are rounded half-to-even so that `2.5` becomes `2` and `3.5`
//! becomes `4`, the convention the historical price sheets were produced
//! with.

/// Rounding applied to a final price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Rounding {
    /// Round to two decimal places.
    #[default]
    Cents,
    /// Round to a whole number.
    Integer,
    /// Leave the price untouched.
    None,
}

impl Rounding {
    /// Apply this rounding to `value`.
    ///
    /// # Examples
    /// ```
    /// use valuation_core::math::rounding::Rounding;
    ///
    /// assert_eq!(Rounding::Cents.apply(891.4285714285714), 891.43);
    /// assert_eq!(Rounding::Integer.apply(1356.52), 1357.0);
    /// assert_eq!(Rounding::Integer.apply(2.5), 2.0);
    /// assert_eq!(Rounding::None.apply(1.005), 1.005);
    /// ```
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Rounding::Cents => round_to(value, 2),
            Rounding::Integer => value.round_ties_even(),
            Rounding::None => value,
        }
    }
}

impl std::str::FromStr for Rounding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cents" | "2dp" => Ok(Rounding::Cents),
            "integer" | "int" => Ok(Rounding::Integer),
            "none" => Ok(Rounding::None),
            other => Err(format!(
                "Unknown rounding: {}. Supported: cents, integer, none",
                other
            )),
        }
    }
}

/// Round `value` to `decimals` places, ties to even.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ties_to_even() {
        assert_eq!(Rounding::Integer.apply(0.5), 0.0);
        assert_eq!(Rounding::Integer.apply(1.5), 2.0);
        assert_eq!(Rounding::Integer.apply(-2.5), -2.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1234.567, 2), 1234.57);
        assert_eq!(round_to(2.675, 0), 3.0);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Cents".parse::<Rounding>(), Ok(Rounding::Cents));
        assert_eq!("int".parse::<Rounding>(), Ok(Rounding::Integer));
        assert!("floor".parse::<Rounding>().is_err());
    }
}
