//! Wishlist
//!
//! `total_quantity` is an event counter, not a derived value: every `add` bumps
//! it and every `remove` drops it, whether or not the collection changed. It can
//! therefore exceed [`WishlistLedger::len`] or go negative.

use tracing::trace;

use crate::{
    items::{WishlistCandidate, WishlistItem},
    products::ProductId,
};

/// Wishlist
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WishlistLedger {
    items: Vec<WishlistItem>,
    total_quantity: i64,
}

impl WishlistLedger {
    /// Create an empty wishlist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(items: Vec<WishlistItem>, total_quantity: i64) -> Self {
        WishlistLedger {
            items,
            total_quantity,
        }
    }

    /// Add the candidate unless an entry with its id is already present.
    ///
    /// The counter goes up either way.
    pub fn add(&mut self, candidate: WishlistCandidate) {
        if self.contains(candidate.id) {
            trace!(id = %candidate.id, "wishlist already holds product");
        } else {
            self.items.push(WishlistItem::from_candidate(candidate));
        }

        self.total_quantity = self.total_quantity.saturating_add(1);
    }

    /// Remove the entry if present.
    ///
    /// The counter goes down either way.
    pub fn remove(&mut self, id: ProductId) {
        if self.take(id).is_none() {
            trace!(%id, "remove target not on wishlist");
        }

        self.total_quantity = self.total_quantity.saturating_sub(1);
    }

    /// Take the entry out so it can be moved elsewhere, leaving the counter untouched.
    pub fn move_out(&mut self, id: ProductId) -> Option<WishlistItem> {
        self.take(id)
    }

    /// Empty the wishlist and zero its counter.
    pub fn clear(&mut self) {
        self.items.clear();
        self.total_quantity = 0;
    }

    /// Entries in insertion order.
    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    /// Iterate over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &WishlistItem> {
        self.items.iter()
    }

    /// Get an entry by product id.
    pub fn get(&self, id: ProductId) -> Option<&WishlistItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Check if the wishlist holds an entry for the product.
    pub fn contains(&self, id: ProductId) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    /// Get the number of entries on the wishlist.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the wishlist is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add/remove event counter.
    pub fn total_quantity(&self) -> i64 {
        self.total_quantity
    }

    fn take(&mut self, id: ProductId) -> Option<WishlistItem> {
        let position = self.items.iter().position(|item| item.id() == id)?;

        Some(self.items.remove(position))
    }
}
