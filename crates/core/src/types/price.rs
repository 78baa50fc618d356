//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog records carry prices as plain JSON numbers in rupees. `Price`
//! keeps that wire shape while refusing negative amounts.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative price in rupees.
///
/// ## Examples
///
/// ```
/// use beez_core::Price;
/// use rust_decimal::{Decimal, RoundingStrategy};
///
/// let price = Price::new(Decimal::new(1250, 2)).unwrap();
/// assert_eq!(price.display(), "RS:12.50");
///
/// assert!(Price::new(Decimal::new(-1, 0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// Prefix used when displaying prices.
    pub const CURRENCY_PREFIX: &'static str = "RS:";

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of cents.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `cents` is below zero.
    pub fn from_cents(cents: i64) -> Result<Self, PriceError> {
        Self::new(Decimal::new(cents, 2))
    }

    /// The amount in rupees.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display, always with two decimal places (e.g., "RS:19.99").
    ///
    /// Halves round away from zero.
    #[must_use]
    pub fn display(&self) -> String {
        let mut amount = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        amount.rescale(2);
        format!("{}{amount}", Self::CURRENCY_PREFIX)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

// Persisted as a JSON number to stay compatible with existing cart records.
impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_to_two_places() {
        assert_eq!(Price::new(Decimal::new(5, 0)).unwrap().display(), "RS:5.00");
        assert_eq!(Price::from_cents(1999).unwrap().display(), "RS:19.99");
    }

    #[test]
    fn test_display_rounds() {
        let price = Price::new(Decimal::new(12_345, 3)).unwrap();
        assert_eq!(price.to_string(), "RS:12.35");
        // Even neighbours round up too.
        assert_eq!(Price::new(Decimal::new(1_125, 3)).unwrap().display(), "RS:1.13");
        assert_eq!(Price::new(Decimal::new(12_344, 3)).unwrap().display(), "RS:12.34");
    }

    #[test]
    fn test_negative_rejected() {
        assert!(matches!(
            Price::from_cents(-1),
            Err(PriceError::Negative(_))
        ));
        assert!(Price::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_serializes_as_number() {
        let price = Price::from_cents(1250).unwrap();
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "12.5");
    }

    #[test]
    fn test_deserialize_number_and_reject_negative() {
        let price: Price = serde_json::from_str("450").unwrap();
        assert_eq!(price.display(), "RS:450.00");
        let price: Price = serde_json::from_str("19.99").unwrap();
        assert_eq!(price, Price::from_cents(1999).unwrap());
        assert!(serde_json::from_str::<Price>("-3.5").is_err());
    }
}
