//! Store configuration

use std::{fs, path::Path};

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::iso::{Currency, USD};
use serde::Deserialize;
use thiserror::Error;

use crate::prices::{Price, PriceError, parse_currency, parse_price};

/// Flat shipping fee charged on non-empty carts, in minor units.
pub const DEFAULT_SHIPPING_FEE: Price = Price::new(599);

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price or currency
    #[error(transparent)]
    Price(#[from] PriceError),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// The shipping fee is priced in a different currency to the store
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),
}

/// Raw config document
#[derive(Debug, Deserialize)]
struct ConfigFile {
    currency: Option<String>,
    shipping_fee: Option<String>,
    tax_rate: Option<String>,
}

/// Store configuration
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Currency both ledgers and the order summary are priced in
    pub currency: &'static Currency,

    /// Flat shipping fee for non-empty carts
    pub shipping_fee: Price,

    /// Sales tax applied to the subtotal
    pub tax_rate: Percentage,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            currency: USD,
            shipping_fee: DEFAULT_SHIPPING_FEE,
            tax_rate: Percentage::from(Decimal::new(8, 2)),
        }
    }
}

impl StoreConfig {
    /// Parse a YAML config document. Missing keys keep their defaults.
    ///
    /// ```yaml
    /// currency: GBP
    /// shipping_fee: "4.99 GBP"
    /// tax_rate: "20%"
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed, a value cannot be parsed,
    /// or the shipping fee currency differs from the store currency.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = serde_norway::from_str(contents)?;
        let mut config = StoreConfig::default();

        if let Some(code) = file.currency.as_deref() {
            config.currency = parse_currency(code)?;
        }

        if let Some(fee) = file.shipping_fee.as_deref() {
            let (fee, currency) = parse_price(fee)?;

            if currency != config.currency {
                return Err(ConfigError::CurrencyMismatch(
                    config.currency.iso_alpha_code.to_string(),
                    currency.iso_alpha_code.to_string(),
                ));
            }

            config.shipping_fee = fee;
        }

        if let Some(rate) = file.tax_rate.as_deref() {
            config.tax_rate = parse_percentage(rate)?;
        }

        Ok(config)
    }

    /// Load a YAML config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }
}

/// Parse percentage string (e.g., "8%" or "0.08") into a `Percentage`
///
/// # Errors
///
/// Returns an error if the string cannot be parsed as a decimal.
pub fn parse_percentage(s: &str) -> Result<Percentage, ConfigError> {
    let trimmed = s.trim();

    let (number, scale) = match trimmed.strip_suffix('%') {
        Some(percent_str) => (percent_str.trim(), Decimal::ONE_HUNDRED),
        None => (trimmed, Decimal::ONE),
    };

    let value = number
        .parse::<Decimal>()
        .map_err(|_err| ConfigError::InvalidPercentage(s.to_string()))?;

    Ok(Percentage::from(value / scale))
}
