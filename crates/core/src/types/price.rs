//! Non-negative prices using decimal arithmetic.
//!
//! Everything on the menu is priced in US dollars; there is no currency
//! conversion or tax, so a price is a single non-negative [`Decimal`].

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when constructing a [`Price`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
}

/// A menu price in dollars.
///
/// Serialized as a decimal string (e.g. `"4.75"`) so no precision is lost
/// through JSON or the session store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
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
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    /// The underlying amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether this price is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

/// Formats as `$X.YY`.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0.round_dp(2))
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_negative_amounts() {
        assert!(matches!(
            Price::new(Decimal::new(-1, 2)),
            Err(PriceError::Negative(_))
        ));
        assert!(Price::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_display_uses_two_decimals() {
        assert_eq!(Price::from_cents(250).to_string(), "$2.50");
        assert_eq!(Price::from_cents(5).to_string(), "$0.05");
        assert_eq!(Price::ZERO.to_string(), "$0.00");
        assert_eq!(Price::new(Decimal::new(3, 0)).unwrap().to_string(), "$3.00");
    }

    #[test]
    fn test_line_arithmetic() {
        let espresso = Price::from_cents(250);
        let latte = Price::from_cents(475);
        let total: Price = [espresso * 2, latte * 1].into_iter().sum();
        assert_eq!(total, Price::from_cents(975));
    }

    #[test]
    fn test_serializes_as_decimal_string() {
        let json = serde_json::to_string(&Price::from_cents(425)).unwrap();
        assert_eq!(json, "\"4.25\"");
        let parsed: Price = serde_json::from_str("\"4.25\"").unwrap();
        assert_eq!(parsed, Price::from_cents(425));
        assert!(serde_json::from_str::<Price>("\"-4.25\"").is_err());
    }
}
