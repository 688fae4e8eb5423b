//! Store
//!
//! Composition root for one cart and one wishlist. The presentation layer sends
//! [`Action`]s here; each action is applied to exactly one ledger, except
//! [`Action::MoveToCart`], which touches both.

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    cart::CartLedger,
    config::StoreConfig,
    items::{CartCandidate, WishlistCandidate},
    products::ProductId,
    snapshot::{SnapshotError, StoreSnapshot},
    summary::{OrderSummary, SummaryError},
    wishlist::WishlistLedger,
};

/// Intents the presentation layer can dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Add one unit to the cart.
    AddToCart(CartCandidate),

    /// Remove one unit from the cart.
    RemoveFromCart {
        /// Target product
        id: ProductId,
    },

    /// Remove a cart entry with all of its units.
    RemoveItemCompletely {
        /// Target product
        id: ProductId,
    },

    /// Overwrite a cart entry's quantity.
    UpdateItemQuantity {
        /// Target product
        id: ProductId,

        /// New quantity
        quantity: i64,
    },

    /// Empty the cart.
    ClearCart,

    /// Add a product to the wishlist.
    AddToWishlist(WishlistCandidate),

    /// Remove a product from the wishlist.
    RemoveFromWishlist {
        /// Target product
        id: ProductId,
    },

    /// Move a wishlist entry into the cart.
    MoveToCart {
        /// Target product
        id: ProductId,
    },

    /// Empty the wishlist.
    ClearWishlist,
}

/// Cart and wishlist for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct Store {
    cart: CartLedger,
    wishlist: WishlistLedger,
    config: StoreConfig,
}

impl Store {
    /// Create a store with empty ledgers.
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Store {
            cart: CartLedger::new(config.currency),
            wishlist: WishlistLedger::new(),
            config,
        }
    }

    /// Restore a store from a snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] if either ledger cannot be rebuilt, or
    /// [`SnapshotError::CurrencyMismatch`] if the cart is priced in a different
    /// currency to the configuration.
    pub fn restore(config: StoreConfig, snapshot: StoreSnapshot) -> Result<Self, SnapshotError> {
        let cart = CartLedger::try_from(snapshot.cart)?;

        if cart.currency() != config.currency {
            return Err(SnapshotError::CurrencyMismatch(
                config.currency.iso_alpha_code.to_string(),
                cart.currency().iso_alpha_code.to_string(),
            ));
        }
        let wishlist = WishlistLedger::try_from(snapshot.wishlist)?;

        info!(
            cart_items = cart.len(),
            wishlist_items = wishlist.len(),
            "restored store"
        );

        Ok(Store {
            cart,
            wishlist,
            config,
        })
    }

    /// Capture the plain state of both ledgers.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot::from(self)
    }

    /// Apply an action.
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::AddToCart(candidate) => self.cart.add_one(candidate),
            Action::RemoveFromCart { id } => self.cart.remove_one(id),
            Action::RemoveItemCompletely { id } => {
                self.cart.remove_entry(id);
            }
            Action::UpdateItemQuantity { id, quantity } => self.cart.set_quantity(id, quantity),
            Action::ClearCart => {
                info!("clearing cart");
                self.cart.clear();
            }
            Action::AddToWishlist(candidate) => self.wishlist.add(candidate),
            Action::RemoveFromWishlist { id } => self.wishlist.remove(id),
            Action::MoveToCart { id } => self.move_to_cart(id),
            Action::ClearWishlist => {
                info!("clearing wishlist");
                self.wishlist.clear();
            }
        }

        debug!(
            cart_quantity = self.cart.total_quantity(),
            cart_amount = self.cart.total_amount_minor(),
            wishlist_quantity = self.wishlist.total_quantity(),
            "applied action"
        );
    }

    /// Take an entry off the wishlist and add one unit of it to the cart.
    ///
    /// The wishlist counter is left as it was.
    pub fn move_to_cart(&mut self, id: ProductId) {
        if let Some(item) = self.wishlist.move_out(id) {
            self.cart.add_one(CartCandidate::from(&item));
        }
    }

    /// Remove the product from the wishlist if present, otherwise add it.
    pub fn toggle_wishlist(&mut self, candidate: WishlistCandidate) {
        if self.wishlist.contains(candidate.id) {
            self.dispatch(Action::RemoveFromWishlist { id: candidate.id });
        } else {
            self.dispatch(Action::AddToWishlist(candidate));
        }
    }

    /// Price the cart for checkout.
    ///
    /// # Errors
    ///
    /// Returns a [`SummaryError`] if the totals cannot be computed.
    pub fn order_summary(&self) -> Result<OrderSummary, SummaryError> {
        OrderSummary::for_cart(&self.cart, &self.config)
    }

    /// Cart ledger
    pub fn cart(&self) -> &CartLedger {
        &self.cart
    }

    /// Wishlist ledger
    pub fn wishlist(&self) -> &WishlistLedger {
        &self.wishlist
    }

    /// Store configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

/// A store that can be shared between threads.
///
/// Every dispatch holds the lock for the whole action, so the entries and the
/// totals of a ledger are never observed half-updated.
#[derive(Debug, Clone)]
pub struct SharedStore {
    inner: Arc<Mutex<Store>>,
}

impl SharedStore {
    /// Wrap a store.
    pub fn new(store: Store) -> Self {
        SharedStore {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Apply an action under the lock.
    pub fn dispatch(&self, action: Action) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .dispatch(action);
    }

    /// Run a read-only closure against the store under the lock.
    pub fn read<R>(&self, f: impl FnOnce(&Store) -> R) -> R {
        let store = self.inner.lock().unwrap_or_else(PoisonError::into_inner);

        f(&store)
    }
}
