//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::CartLedger,
    config::{ConfigError, StoreConfig},
    fixtures::{Fixture, FixtureError, sessions::SessionStep},
    items::{CartCandidate, CartItem, WishlistCandidate, WishlistItem},
    prices::{Price, PriceError},
    products::{ALL_CATEGORIES, Catalog, CatalogError, Product, ProductId},
    snapshot::{CartSnapshot, SnapshotError, StoreSnapshot, WishlistSnapshot},
    store::{Action, SharedStore, Store},
    summary::{OrderSummary, SummaryError},
    wishlist::WishlistLedger,
};
