//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are entered as free text in the add-product form and stored as a
//! JSON number. Parsing snaps the amount to the value that number reads back
//! as, so a record compares equal by value after a save and reload. Totals
//! are summed in decimal, so they do not pick up floating-point drift.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is empty or only whitespace.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a number.
    #[error("price must be a number")]
    NotANumber,
    /// The number is zero or negative.
    #[error("price must be greater than zero")]
    NotPositive,
    /// The number is too large to be stored.
    #[error("price is out of range")]
    OutOfRange,
}

/// A unit price.
///
/// ## Constraints
///
/// - Must parse as a decimal number (plain or scientific notation)
/// - Must be strictly greater than zero
/// - Digits beyond what a JSON number keeps are rounded away
///
/// ## Examples
///
/// ```
/// use stockroom_core::Price;
///
/// assert!(Price::parse("9.99").is_ok());
/// assert!(Price::parse(" 12 ").is_ok());
///
/// assert!(Price::parse("").is_err());      // empty
/// assert!(Price::parse("abc").is_err());   // not a number
/// assert!(Price::parse("0").is_err());     // not positive
/// assert!(Price::parse("-1.50").is_err()); // not positive
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// Parse a `Price` from form text.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, is not a number, or is not
    /// greater than zero.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PriceError::Empty);
        }

        let amount = Decimal::from_str(s)
            .or_else(|_| Decimal::from_scientific(s))
            .map_err(|_| PriceError::NotANumber)?;

        Self::new(amount)
    }

    /// Create a price from a decimal amount.
    ///
    /// The amount is rounded to the nearest value that survives storage.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::NotPositive` if the amount is zero or negative,
    /// or `PriceError::OutOfRange` if it cannot be stored.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount <= Decimal::ZERO {
            return Err(PriceError::NotPositive);
        }
        let amount = storable(amount).ok_or(PriceError::OutOfRange)?;
        if amount <= Decimal::ZERO {
            return Err(PriceError::NotPositive);
        }
        Ok(Self(amount.normalize()))
    }

    /// Returns the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Value of `quantity` units at this price.
    ///
    /// Saturates at `Decimal::MAX` instead of overflowing.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Decimal {
        self.0.saturating_mul(Decimal::from(quantity))
    }
}

/// Displays with exactly two fraction digits.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_amount(self.0))
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// `amount` as it reads back from a JSON number.
///
/// Mirrors `rust_decimal::serde::float`: written through `to_f64`, read
/// back by parsing the float's shortest decimal form.
fn stored_form(amount: Decimal) -> Option<Decimal> {
    let float = amount.to_f64().filter(|f| f.is_finite())?;
    Decimal::from_str(&float.to_string()).ok()
}

/// The first amount reached from `amount` that is unchanged by storage.
fn storable(amount: Decimal) -> Option<Decimal> {
    let mut current = amount;
    for _ in 0..4 {
        let stored = stored_form(current)?;
        if stored == current {
            return Some(current);
        }
        current = stored;
    }
    None
}

/// Format an amount with exactly two fraction digits, rounding half away
/// from zero.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded =
        amount.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_prices() {
        assert_eq!(Price::parse("9.99").unwrap().amount(), Decimal::new(999, 2));
        assert_eq!(Price::parse("  4 ").unwrap().amount(), Decimal::from(4));
        assert_eq!(Price::parse("1e2").unwrap().amount(), Decimal::from(100));
        assert!(Price::parse("0.01").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Price::parse(""), Err(PriceError::Empty));
        assert_eq!(Price::parse("   "), Err(PriceError::Empty));
    }

    #[test]
    fn test_parse_not_a_number() {
        assert_eq!(Price::parse("abc"), Err(PriceError::NotANumber));
        assert_eq!(Price::parse("NaN"), Err(PriceError::NotANumber));
        assert_eq!(Price::parse("1.2.3"), Err(PriceError::NotANumber));
    }

    #[test]
    fn test_parse_not_positive() {
        assert_eq!(Price::parse("0"), Err(PriceError::NotPositive));
        assert_eq!(Price::parse("0.00"), Err(PriceError::NotPositive));
        assert_eq!(Price::parse("-5"), Err(PriceError::NotPositive));
    }

    #[test]
    fn test_times() {
        let price = Price::parse("9.99").unwrap();
        assert_eq!(price.times(3), Decimal::new(2997, 2));
        assert_eq!(price.times(0), Decimal::ZERO);
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Price::parse("5").unwrap().to_string(), "5.00");
        assert_eq!(Price::parse("9.9").unwrap().to_string(), "9.90");
        assert_eq!(Price::parse("0.125").unwrap().to_string(), "0.13");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Decimal::ZERO), "0.00");
        assert_eq!(format_amount(Decimal::new(29_97, 2)), "29.97");
        assert_eq!(format_amount(Decimal::new(1_005, 3)), "1.01");
    }

    #[test]
    fn test_long_fraction_survives_storage() {
        let price = Price::parse("0.12345678901234567891").unwrap();
        assert_ne!(price.amount(), Decimal::from_str("0.12345678901234567891").unwrap());

        let json = serde_json::to_string(&price).unwrap();
        let reloaded: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, price);
        assert_eq!(serde_json::to_string(&reloaded).unwrap(), json);
    }

    #[test]
    fn test_short_prices_are_kept_exactly() {
        for input in ["9.99", "0.01", "1234.5", "0.105"] {
            let price = Price::parse(input).unwrap();
            assert_eq!(price.amount(), Decimal::from_str(input).unwrap());
        }
    }

    #[test]
    fn test_parse_out_of_range() {
        assert_eq!(
            Price::parse("79228162514264337593543950335"),
            Err(PriceError::OutOfRange)
        );
    }

    #[test]
    fn test_serializes_as_number() {
        let price = Price::parse("9.99").unwrap();
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "9.99");

        let parsed: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, price);
    }
}
