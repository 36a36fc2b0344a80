//! Price value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A non-negative, finite unit price.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    /// Zero price.
    pub const ZERO: Self = Self(0.0);

    /// Creates a Price, returning error if not finite or negative.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::invalid_format(
                "price",
                "must be a finite number",
            ));
        }
        if value < 0.0 {
            return Err(ValidationError::invalid_format(
                "price",
                "must not be negative",
            ));
        }
        Ok(Self(value))
    }

    /// Returns the value as f64.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Price of `quantity` units.
    pub fn times(&self, quantity: u32) -> f64 {
        self.0 * f64::from(quantity)
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = f64::deserialize(deserializer)?;
        Price::try_new(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_accepts_zero_and_positive() {
        assert_eq!(Price::try_new(0.0).unwrap().value(), 0.0);
        assert_eq!(Price::try_new(1999.0).unwrap().value(), 1999.0);
    }

    #[test]
    fn price_rejects_negative() {
        assert!(Price::try_new(-1.0).is_err());
    }

    #[test]
    fn price_rejects_non_finite() {
        assert!(Price::try_new(f64::NAN).is_err());
        assert!(Price::try_new(f64::INFINITY).is_err());
    }

    #[test]
    fn times_multiplies_by_quantity() {
        let price = Price::try_new(100.0).unwrap();
        assert_eq!(price.times(5), 500.0);
    }

    #[test]
    fn deserialize_validates() {
        assert!(serde_json::from_str::<Price>("12.5").is_ok());
        assert!(serde_json::from_str::<Price>("-3").is_err());
    }
}
