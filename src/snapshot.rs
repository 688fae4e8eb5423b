//! Snapshots
//!
//! Plain, serializable copies of ledger state for whoever persists a session.
//! Restoring keeps the stored totals exactly; they are never recomputed.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::CartLedger,
    items::{CartItem, WishlistItem},
    prices::{PriceError, parse_currency},
    products::ProductId,
    store::Store,
    wishlist::WishlistLedger,
};

/// Errors raised while restoring or encoding snapshots.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The stored currency code is not supported.
    #[error(transparent)]
    Currency(#[from] PriceError),

    /// Two stored entries share a product id.
    #[error("Snapshot holds product {0} more than once")]
    DuplicateItem(ProductId),

    /// The stored cart is priced in a different currency to the store.
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// YAML encoding or decoding failed.
    #[error("Failed to encode or decode snapshot: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// Cart state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    /// ISO currency code
    pub currency: String,

    /// Entries in insertion order
    pub items: Vec<CartItem>,

    /// Running unit count
    pub total_quantity: i64,

    /// Running amount in minor units
    pub total_amount: i64,
}

impl From<&CartLedger> for CartSnapshot {
    fn from(cart: &CartLedger) -> Self {
        CartSnapshot {
            currency: cart.currency().iso_alpha_code.to_string(),
            items: cart.items().to_vec(),
            total_quantity: cart.total_quantity(),
            total_amount: cart.total_amount_minor(),
        }
    }
}

impl TryFrom<CartSnapshot> for CartLedger {
    type Error = SnapshotError;

    fn try_from(snapshot: CartSnapshot) -> Result<Self, Self::Error> {
        let currency = parse_currency(&snapshot.currency)?;

        ensure_unique(snapshot.items.iter().map(CartItem::id))?;

        Ok(CartLedger::from_parts(
            snapshot.items,
            snapshot.total_quantity,
            snapshot.total_amount,
            currency,
        ))
    }
}

/// Wishlist state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistSnapshot {
    /// Entries in insertion order
    pub items: Vec<WishlistItem>,

    /// Add/remove event counter
    pub total_wishlist_quantity: i64,
}

impl From<&WishlistLedger> for WishlistSnapshot {
    fn from(wishlist: &WishlistLedger) -> Self {
        WishlistSnapshot {
            items: wishlist.items().to_vec(),
            total_wishlist_quantity: wishlist.total_quantity(),
        }
    }
}

impl TryFrom<WishlistSnapshot> for WishlistLedger {
    type Error = SnapshotError;

    fn try_from(snapshot: WishlistSnapshot) -> Result<Self, Self::Error> {
        ensure_unique(snapshot.items.iter().map(WishlistItem::id))?;

        Ok(WishlistLedger::from_parts(
            snapshot.items,
            snapshot.total_wishlist_quantity,
        ))
    }
}

/// Whole-store state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Cart state
    pub cart: CartSnapshot,

    /// Wishlist state
    pub wishlist: WishlistSnapshot,
}

impl StoreSnapshot {
    /// Encode as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Yaml`] if serialization fails.
    pub fn to_yaml(&self) -> Result<String, SnapshotError> {
        Ok(serde_norway::to_string(self)?)
    }

    /// Decode from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Yaml`] if the document is malformed.
    pub fn from_yaml(contents: &str) -> Result<Self, SnapshotError> {
        Ok(serde_norway::from_str(contents)?)
    }
}

impl From<&Store> for StoreSnapshot {
    fn from(store: &Store) -> Self {
        StoreSnapshot {
            cart: store.cart().into(),
            wishlist: store.wishlist().into(),
        }
    }
}

fn ensure_unique(ids: impl Iterator<Item = ProductId>) -> Result<(), SnapshotError> {
    let mut seen = FxHashSet::default();

    for id in ids {
        if !seen.insert(id) {
            return Err(SnapshotError::DuplicateItem(id));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use crate::{
        items::{CartCandidate, WishlistCandidate},
        prices::Price,
    };

    use super::*;

    fn cart() -> CartLedger {
        let mut cart = CartLedger::new(GBP);

        cart.add_one(CartCandidate::new(ProductId(1), "Tee", Price::new(1000)).with_size("M"));
        cart.add_one(CartCandidate::new(ProductId(1), "Tee", Price::new(1200)));

        cart
    }

    #[test]
    fn cart_snapshot_keeps_incremental_totals() -> TestResult {
        let original = cart();

        let snapshot = CartSnapshot::from(&original);

        assert_eq!(snapshot.currency, "GBP");
        assert_eq!(snapshot.total_amount, 2200);

        let restored = CartLedger::try_from(snapshot)?;

        assert_eq!(restored, original);
        assert_eq!(restored.total_amount_minor(), 2200);
        assert_eq!(restored.subtotal(), 2000);

        Ok(())
    }

    #[test]
    fn cart_snapshot_rejects_unknown_currency() {
        let mut snapshot = CartSnapshot::from(&cart());
        snapshot.currency = "XYZ".to_string();

        let result = CartLedger::try_from(snapshot);

        assert!(matches!(
            result,
            Err(SnapshotError::Currency(PriceError::UnknownCurrency(code))) if code == "XYZ"
        ));
    }

    #[test]
    fn cart_snapshot_rejects_duplicate_ids() {
        let mut snapshot = CartSnapshot::from(&cart());
        let duplicate = snapshot.items.first().cloned();
        snapshot.items.extend(duplicate);

        let result = CartLedger::try_from(snapshot);

        assert!(matches!(
            result,
            Err(SnapshotError::DuplicateItem(ProductId(1)))
        ));
    }

    #[test]
    fn wishlist_snapshot_keeps_counter() -> TestResult {
        let mut wishlist = WishlistLedger::new();
        wishlist.add(WishlistCandidate::new(ProductId(7), "Bag", Price::new(4999)));
        wishlist.add(WishlistCandidate::new(ProductId(7), "Bag", Price::new(4999)));

        let restored = WishlistLedger::try_from(WishlistSnapshot::from(&wishlist))?;

        assert_eq!(restored.len(), 1);
        assert_eq!(restored.total_quantity(), 2);

        Ok(())
    }

    #[test]
    fn store_snapshot_yaml_round_trip() -> TestResult {
        let snapshot = StoreSnapshot {
            cart: CartSnapshot::from(&cart()),
            wishlist: WishlistSnapshot::from(&WishlistLedger::new()),
        };

        let yaml = snapshot.to_yaml()?;

        assert!(yaml.contains("total_amount: 2200"));
        assert_eq!(StoreSnapshot::from_yaml(&yaml)?, snapshot);

        Ok(())
    }
}
