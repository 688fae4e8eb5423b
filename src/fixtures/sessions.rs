//! Session Fixtures
//!
//! A session is a scripted list of shopper interactions, referring to catalog
//! products by id.

use serde::Deserialize;

use crate::{
    items::{CartCandidate, WishlistCandidate},
    products::{Catalog, ProductId},
    store::{Action, Store},
};

use super::FixtureError;

/// Wrapper for session steps in YAML
#[derive(Debug, Deserialize)]
pub struct SessionFixture {
    /// Steps in the order they are replayed
    pub steps: Vec<SessionStep>,
}

/// One scripted interaction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionStep {
    /// Add one unit of a catalog product to the cart.
    AddToCart {
        /// Catalog product
        id: ProductId,

        /// Chosen colour
        #[serde(default)]
        color: Option<String>,

        /// Chosen size
        #[serde(default)]
        size: Option<String>,
    },

    /// Remove one unit from the cart.
    RemoveFromCart {
        /// Cart entry
        id: ProductId,
    },

    /// Remove a cart entry entirely.
    RemoveItemCompletely {
        /// Cart entry
        id: ProductId,
    },

    /// Set a cart entry's quantity.
    UpdateItemQuantity {
        /// Cart entry
        id: ProductId,

        /// New quantity
        quantity: i64,
    },

    /// Empty the cart.
    ClearCart,

    /// Add a catalog product to the wishlist.
    AddToWishlist {
        /// Catalog product
        id: ProductId,
    },

    /// Remove a product from the wishlist.
    RemoveFromWishlist {
        /// Wishlist entry
        id: ProductId,
    },

    /// Add or remove a catalog product, like the heart button.
    ToggleWishlist {
        /// Catalog product
        id: ProductId,
    },

    /// Move a wishlist entry into the cart.
    MoveToCart {
        /// Wishlist entry
        id: ProductId,
    },

    /// Empty the wishlist.
    ClearWishlist,
}

impl SessionStep {
    /// Apply the step to a store, resolving product ids against the catalog.
    ///
    /// Only steps that add something need the product to exist in the catalog;
    /// removals are passed through as-is.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::ProductNotFound`] if an adding step names an
    /// unknown product.
    pub fn apply(self, catalog: &Catalog, store: &mut Store) -> Result<(), FixtureError> {
        let lookup = |id: ProductId| {
            catalog
                .get(id)
                .ok_or_else(|| FixtureError::ProductNotFound(id.to_string()))
        };

        match self {
            SessionStep::AddToCart { id, color, size } => {
                let mut candidate = CartCandidate::from(lookup(id)?);
                candidate.color = color;
                candidate.size = size;

                store.dispatch(Action::AddToCart(candidate));
            }
            SessionStep::RemoveFromCart { id } => store.dispatch(Action::RemoveFromCart { id }),
            SessionStep::RemoveItemCompletely { id } => {
                store.dispatch(Action::RemoveItemCompletely { id });
            }
            SessionStep::UpdateItemQuantity { id, quantity } => {
                store.dispatch(Action::UpdateItemQuantity { id, quantity });
            }
            SessionStep::ClearCart => store.dispatch(Action::ClearCart),
            SessionStep::AddToWishlist { id } => {
                store.dispatch(Action::AddToWishlist(WishlistCandidate::from(lookup(id)?)));
            }
            SessionStep::RemoveFromWishlist { id } => {
                store.dispatch(Action::RemoveFromWishlist { id });
            }
            SessionStep::ToggleWishlist { id } => {
                store.toggle_wishlist(WishlistCandidate::from(lookup(id)?));
            }
            SessionStep::MoveToCart { id } => store.dispatch(Action::MoveToCart { id }),
            SessionStep::ClearWishlist => store.dispatch(Action::ClearWishlist),
        }

        Ok(())
    }
}
