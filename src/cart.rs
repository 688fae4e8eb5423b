//! Cart
//!
//! The cart ledger keeps its running totals up to date as commands are applied
//! rather than recomputing them from the entries. Amount changes are booked at a
//! single unit price per unit added or removed, so `total_amount` only matches
//! [`CartLedger::subtotal`] while callers keep prices consistent per product.

use rusty_money::{Money, iso::Currency};
use tracing::trace;

use crate::{
    items::{CartCandidate, CartItem},
    products::ProductId,
};

/// Cart
#[derive(Debug, Clone, PartialEq)]
pub struct CartLedger {
    items: Vec<CartItem>,
    total_quantity: i64,
    total_amount: i64,
    currency: &'static Currency,
}

impl CartLedger {
    /// Create an empty cart priced in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        CartLedger {
            items: Vec::new(),
            total_quantity: 0,
            total_amount: 0,
            currency,
        }
    }

    /// Rebuild a cart from previously captured state, keeping the totals as given.
    pub(crate) fn from_parts(
        items: Vec<CartItem>,
        total_quantity: i64,
        total_amount: i64,
        currency: &'static Currency,
    ) -> Self {
        CartLedger {
            items,
            total_quantity,
            total_amount,
            currency,
        }
    }

    /// Add one unit of the candidate.
    ///
    /// A new entry is appended with a quantity of one; an existing entry has its
    /// quantity bumped and keeps its stored name, image, colour, size and price.
    /// The amount always grows by the candidate's price.
    pub fn add_one(&mut self, candidate: CartCandidate) {
        let unit_price = candidate.unit_price;

        match self.items.iter_mut().find(|item| item.id() == candidate.id) {
            Some(item) => item.set_quantity(item.quantity().saturating_add(1)),
            None => self.items.push(CartItem::from_candidate(candidate)),
        }

        self.total_quantity = self.total_quantity.saturating_add(1);
        self.total_amount = self.total_amount.saturating_add(*unit_price);
    }

    /// Remove one unit of the entry, dropping the entry when its last unit goes.
    pub fn remove_one(&mut self, id: ProductId) {
        let Some(position) = self.position(id) else {
            trace!(%id, "remove_one target not in cart");
            return;
        };

        let Some(item) = self.items.get_mut(position) else {
            return;
        };

        let unit_price = item.unit_price();

        if item.quantity() == 1 {
            self.items.remove(position);
        } else {
            item.set_quantity(item.quantity().saturating_sub(1));
        }

        self.total_quantity = self.total_quantity.saturating_sub(1);
        self.total_amount = self.total_amount.saturating_sub(*unit_price);
    }

    /// Remove the entry and all of its units, returning it.
    pub fn remove_entry(&mut self, id: ProductId) -> Option<CartItem> {
        let Some(position) = self.position(id) else {
            trace!(%id, "remove_entry target not in cart");
            return None;
        };

        let item = self.items.remove(position);

        self.total_quantity = self.total_quantity.saturating_sub(item.quantity());
        self.total_amount = self.total_amount.saturating_sub(item.line_total());

        Some(item)
    }

    /// Overwrite the quantity of an entry.
    ///
    /// The quantity is not clamped: zero or negative values are recorded as given
    /// and the entry stays in the cart.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) {
        let Some(item) = self.items.iter_mut().find(|item| item.id() == id) else {
            trace!(%id, quantity, "set_quantity target not in cart");
            return;
        };

        let delta = quantity.saturating_sub(item.quantity());

        item.set_quantity(quantity);

        self.total_quantity = self.total_quantity.saturating_add(delta);
        self.total_amount = self
            .total_amount
            .saturating_add(item.unit_price().times(delta));
    }

    /// Empty the cart and zero its totals.
    pub fn clear(&mut self) {
        self.items.clear();
        self.total_quantity = 0;
        self.total_amount = 0;
    }

    /// Entries in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Iterate over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter()
    }

    /// Get an entry by product id.
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Check if the cart holds an entry for the product.
    pub fn contains(&self, id: ProductId) -> bool {
        self.position(id).is_some()
    }

    /// Get the number of distinct entries in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Running unit count.
    pub fn total_quantity(&self) -> i64 {
        self.total_quantity
    }

    /// Running amount, in minor units.
    pub fn total_amount_minor(&self) -> i64 {
        self.total_amount
    }

    /// Running amount.
    pub fn total_amount(&self) -> Money<'static, Currency> {
        Money::from_minor(self.total_amount, self.currency)
    }

    /// Sum of unit price times quantity over the current entries, in minor units.
    pub fn subtotal(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, item| acc.saturating_add(item.line_total()))
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};

    use crate::prices::Price;

    use super::*;

    fn tee(price: i64) -> CartCandidate {
        CartCandidate::new(ProductId(1), "T", Price::new(price))
    }

    fn quantities(cart: &CartLedger) -> Vec<(u64, i64)> {
        cart.iter().map(|item| (item.id().0, item.quantity())).collect()
    }

    #[test]
    fn new_cart_is_empty() {
        let cart = CartLedger::new(GBP);

        assert!(cart.is_empty());
        assert_eq!(cart.total_quantity(), 0);
        assert_eq!(cart.total_amount(), Money::from_minor(0, GBP));
        assert_eq!(cart.currency(), GBP);
    }

    #[test]
    fn add_one_appends_then_increments() {
        let mut cart = CartLedger::new(USD);

        cart.add_one(tee(1000));
        cart.add_one(tee(1000));

        assert_eq!(quantities(&cart), vec![(1, 2)]);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.total_amount_minor(), 2000);
    }

    #[test]
    fn add_one_keeps_existing_descriptive_fields() {
        let mut cart = CartLedger::new(USD);

        cart.add_one(tee(1000).with_color("white").with_size("M"));
        cart.add_one(
            tee(1000)
                .with_color("black")
                .with_size("XL")
                .with_image("x.jpg"),
        );

        let item = cart.get(ProductId(1));

        assert_eq!(item.map(CartItem::color), Some("white"));
        assert_eq!(item.map(CartItem::size), Some("M"));
        assert_eq!(item.map(CartItem::image), Some(""));
    }

    #[test]
    fn add_one_books_the_candidate_price() {
        let mut cart = CartLedger::new(USD);

        cart.add_one(tee(1000));
        cart.add_one(tee(1500));

        assert_eq!(cart.total_amount_minor(), 2500);
        assert_eq!(
            cart.get(ProductId(1)).map(CartItem::unit_price),
            Some(Price::new(1000))
        );
        assert_eq!(cart.subtotal(), 2000);
    }

    #[test]
    fn remove_one_books_the_stored_price() {
        let mut cart = CartLedger::new(USD);

        cart.add_one(tee(1000));
        cart.add_one(tee(1500));
        cart.remove_one(ProductId(1));

        assert_eq!(cart.total_quantity(), 1);
        assert_eq!(cart.total_amount_minor(), 1500);
    }

    #[test]
    fn remove_one_missing_is_a_no_op() {
        let mut cart = CartLedger::new(USD);
        cart.add_one(tee(1000));

        let before = cart.clone();
        cart.remove_one(ProductId(99));

        assert_eq!(cart, before);
    }

    #[test]
    fn remove_entry_subtracts_every_unit() {
        let mut cart = CartLedger::new(USD);
        cart.add_one(tee(1000));
        cart.add_one(tee(1000));
        cart.add_one(CartCandidate::new(ProductId(2), "Mug", Price::new(450)));

        let removed = cart.remove_entry(ProductId(1));

        assert_eq!(removed.map(|item| item.quantity()), Some(2));
        assert_eq!(quantities(&cart), vec![(2, 1)]);
        assert_eq!(cart.total_quantity(), 1);
        assert_eq!(cart.total_amount_minor(), 450);
    }

    #[test]
    fn remove_entry_missing_returns_none() {
        let mut cart = CartLedger::new(USD);

        assert_eq!(cart.remove_entry(ProductId(1)), None);
        assert_eq!(cart.total_quantity(), 0);
    }

    #[test]
    fn set_quantity_applies_the_difference() {
        let mut cart = CartLedger::new(USD);
        cart.add_one(tee(1000));

        cart.set_quantity(ProductId(1), 5);

        assert_eq!(quantities(&cart), vec![(1, 5)]);
        assert_eq!(cart.total_quantity(), 5);
        assert_eq!(cart.total_amount_minor(), 5000);

        cart.set_quantity(ProductId(1), 2);

        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.total_amount_minor(), 2000);
    }

    #[test]
    fn set_quantity_keeps_non_positive_entries() {
        let mut cart = CartLedger::new(USD);
        cart.add_one(tee(1000));

        cart.set_quantity(ProductId(1), 0);

        assert_eq!(quantities(&cart), vec![(1, 0)]);
        assert_eq!(cart.total_quantity(), 0);
        assert_eq!(cart.total_amount_minor(), 0);

        cart.set_quantity(ProductId(1), -2);

        assert_eq!(quantities(&cart), vec![(1, -2)]);
        assert_eq!(cart.total_quantity(), -2);
        assert_eq!(cart.total_amount_minor(), -2000);
    }

    #[test]
    fn set_quantity_missing_is_a_no_op() {
        let mut cart = CartLedger::new(USD);

        cart.set_quantity(ProductId(1), 3);

        assert!(cart.is_empty());
        assert_eq!(cart.total_quantity(), 0);
    }

    #[test]
    fn clear_resets_items_and_totals() {
        let mut cart = CartLedger::new(USD);
        cart.add_one(tee(1000));
        cart.add_one(tee(1200));

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total_quantity(), 0);
        assert_eq!(cart.total_amount_minor(), 0);
        assert_eq!(cart.currency(), USD);
    }

    #[test]
    fn contains_and_len_track_entries() {
        let mut cart = CartLedger::new(USD);
        cart.add_one(tee(1000));
        cart.add_one(tee(1000));

        assert!(cart.contains(ProductId(1)));
        assert!(!cart.contains(ProductId(2)));
        assert_eq!(cart.len(), 1);
    }
}
