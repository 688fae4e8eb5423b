//! Prices

use std::{fmt, ops::Deref};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, INR, USD},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while parsing prices and currencies.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// The price string was not in the form `AMOUNT CURRENCY`.
    #[error("Invalid price format: {0}")]
    InvalidFormat(String),

    /// The amount was negative.
    #[error("Price must not be negative: {0}")]
    Negative(String),

    /// The amount has more decimal places than the currency's minor unit.
    #[error("Price is finer than one minor unit: {0}")]
    TooPrecise(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Represents a price in pence/cents.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price {
    value: i64,
}

impl Price {
    /// A price of nothing.
    pub const ZERO: Price = Price { value: 0 };

    /// Creates a new Price from minor units
    pub const fn new(value: i64) -> Self {
        Price { value }
    }

    /// Returns the price in minor units.
    pub const fn to_minor_units(self) -> i64 {
        self.value
    }

    /// Price of `quantity` units, saturating at the `i64` bounds.
    pub fn times(self, quantity: i64) -> i64 {
        self.value.saturating_mul(quantity)
    }

    /// Converts the price to [`Money`] in the given currency.
    pub fn to_money(self, currency: &'static Currency) -> Money<'static, Currency> {
        Money::from_minor(self.value, currency)
    }
}

impl Deref for Price {
    type Target = i64;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.value < 0 { "-" } else { "" };
        let abs = self.value.unsigned_abs();

        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

/// Looks up a supported ISO currency by its alpha code.
///
/// # Errors
///
/// Returns [`PriceError::UnknownCurrency`] for codes outside GBP, USD, EUR and INR.
pub fn parse_currency(code: &str) -> Result<&'static Currency, PriceError> {
    match code.trim() {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        "INR" => Ok(INR),
        other => Err(PriceError::UnknownCurrency(other.to_string())),
    }
}

/// Parse price string (e.g., "29.99 USD") into a [`Price`] and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a non-negative decimal, if it has more than two
/// decimal places, or if the currency code is not recognized.
pub fn parse_price(s: &str) -> Result<(Price, &'static Currency), PriceError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(PriceError::InvalidFormat(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| PriceError::InvalidFormat(s.to_string()))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PriceError::Negative(s.to_string()));
    }

    if amount.normalize().scale() > 2 {
        return Err(PriceError::TooPrecise(s.to_string()));
    }

    let minor_units = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .as_ref()
        .and_then(ToPrimitive::to_i64)
        .ok_or_else(|| PriceError::InvalidFormat(s.to_string()))?;

    Ok((Price::new(minor_units), parse_currency(currency_code)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_price() {
        let price = Price::new(1000);

        assert_eq!(price.value, 1000);
    }

    #[test]
    fn price_derefs_to_i64() {
        let price = Price { value: 100 };

        assert_eq!(*price, 100);
    }

    #[test]
    fn times_saturates() {
        assert_eq!(Price::new(250).times(3), 750);
        assert_eq!(Price::new(i64::MAX).times(2), i64::MAX);
    }

    #[test]
    fn display_formats_major_and_minor_units() {
        assert_eq!(Price::new(2999).to_string(), "29.99");
        assert_eq!(Price::new(5).to_string(), "0.05");
        assert_eq!(Price::new(-150).to_string(), "-1.50");
    }

    #[test]
    fn to_money_uses_currency() {
        let money = Price::new(599).to_money(USD);

        assert_eq!(money, Money::from_minor(599, USD));
    }

    #[test]
    fn parse_price_accepts_known_currencies() -> Result<(), PriceError> {
        let (usd_price, usd) = parse_price("29.99 USD")?;
        let (inr_price, inr) = parse_price("450 INR")?;

        assert_eq!(usd_price, Price::new(2999));
        assert_eq!(usd, USD);
        assert_eq!(inr_price, Price::new(45_000));
        assert_eq!(inr, INR);

        Ok(())
    }

    #[test]
    fn parse_price_rejects_invalid_format() {
        let result = parse_price("2.99USD");

        assert!(matches!(result, Err(PriceError::InvalidFormat(_))));
    }

    #[test]
    fn parse_price_rejects_negative_amount() {
        let result = parse_price("-1.00 GBP");

        assert!(matches!(result, Err(PriceError::Negative(_))));
    }

    #[test]
    fn parse_price_rejects_sub_minor_amounts() {
        let result = parse_price("29.999 USD");

        assert!(matches!(result, Err(PriceError::TooPrecise(_))));
    }

    #[test]
    fn parse_price_accepts_trailing_zeros() -> Result<(), PriceError> {
        let (price, _currency) = parse_price("29.990 USD")?;

        assert_eq!(price, Price::new(2999));

        Ok(())
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("2.99 ABC");

        assert!(matches!(result, Err(PriceError::UnknownCurrency(code)) if code == "ABC"));
    }
}
