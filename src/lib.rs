//! Storefront
//!
//! Cart and wishlist state for a retail storefront: line-item ledgers with
//! incrementally maintained totals, a store that routes shopper actions to them,
//! and checkout pricing on top.

pub mod cart;
pub mod config;
pub mod fixtures;
pub mod items;
pub mod prelude;
pub mod prices;
pub mod products;
pub mod snapshot;
pub mod store;
pub mod summary;
pub mod utils;
pub mod wishlist;
