//! Order summary

use std::io;

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{cart::CartLedger, config::StoreConfig, prices::Price};

/// Errors that can occur when building or printing a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Tax could not be represented in minor units.
    #[error("Tax on {0} minor units is out of range")]
    TaxOutOfRange(i64),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Checkout totals for a cart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderSummary {
    subtotal: i64,
    shipping: i64,
    tax: i64,
    currency: &'static Currency,
}

impl OrderSummary {
    /// Price the cart's current entries.
    ///
    /// The subtotal is recomputed from the entries, not taken from the cart's
    /// running amount. Shipping is only charged on a positive subtotal.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::TaxOutOfRange`] if the tax does not fit in an `i64`.
    pub fn for_cart(cart: &CartLedger, config: &StoreConfig) -> Result<Self, SummaryError> {
        let subtotal = cart.subtotal();

        let shipping = if subtotal > 0 {
            config.shipping_fee.to_minor_units()
        } else {
            0
        };

        let tax = (config.tax_rate * Decimal::from(subtotal))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .ok_or(SummaryError::TaxOutOfRange(subtotal))?;

        Ok(OrderSummary {
            subtotal,
            shipping,
            tax,
            currency: cart.currency(),
        })
    }

    /// Sum of line totals
    pub fn subtotal(&self) -> Money<'static, Currency> {
        Money::from_minor(self.subtotal, self.currency)
    }

    /// Shipping charge
    pub fn shipping(&self) -> Money<'static, Currency> {
        Money::from_minor(self.shipping, self.currency)
    }

    /// Sales tax
    pub fn tax(&self) -> Money<'static, Currency> {
        Money::from_minor(self.tax, self.currency)
    }

    /// Amount due
    pub fn total(&self) -> Money<'static, Currency> {
        Money::from_minor(self.total_minor(), self.currency)
    }

    /// Amount due, in minor units
    pub fn total_minor(&self) -> i64 {
        self.subtotal
            .saturating_add(self.shipping)
            .saturating_add(self.tax)
    }

    /// Prints the cart lines followed by the totals.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn write_to(
        &self,
        mut out: impl io::Write,
        cart: &CartLedger,
    ) -> Result<(), SummaryError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Options", "Qty", "Unit Price", "Line Total"]);

        for (idx, item) in cart.iter().enumerate() {
            let options = [item.color(), item.size()]
                .into_iter()
                .filter(|option| !option.is_empty())
                .collect::<Vec<_>>()
                .join(" / ");

            builder.push_record([
                format!("#{:<3}", idx + 1),
                item.name().to_string(),
                options,
                item.quantity().to_string(),
                format!("{}", item.unit_price().to_money(self.currency)),
                format!("{}", Price::new(item.line_total()).to_money(self.currency)),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(3..6), Alignment::right());

        writeln!(out, "\n{table}").map_err(|_err| SummaryError::IO)?;

        let lines = [
            (" Subtotal:", format!("{}", self.subtotal())),
            (" Shipping:", format!("{}", self.shipping())),
            (" Tax:", format!("{}", self.tax())),
            (" Total:", format!("{}", self.total())),
        ];

        let label_width = lines.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        let value_width = lines.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

        for (label, value) in &lines {
            writeln!(out, "{label:<label_width$} {value:>value_width$}")
                .map_err(|_err| SummaryError::IO)?;
        }

        writeln!(out).map_err(|_err| SummaryError::IO)
    }
}
