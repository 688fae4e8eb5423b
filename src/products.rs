//! Products

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::prices::Price;

/// Category name that matches every product.
pub const ALL_CATEGORIES: &str = "All";

/// Product identifier, as issued by the catalog.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors related to catalog construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Two products share the same id.
    #[error("Duplicate product id {0}")]
    DuplicateProduct(ProductId),
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Product price
    pub price: Price,

    /// Price before discount, if the product is on sale
    pub original_price: Option<Price>,

    /// Image URL
    pub image: String,

    /// Category name
    pub category: String,

    /// Available colours
    pub colors: SmallVec<[String; 4]>,

    /// Available sizes
    pub sizes: SmallVec<[String; 4]>,

    /// Average review rating
    pub rating: f32,

    /// Whether the product can currently be bought
    pub in_stock: bool,
}

/// Read-only, ordered product catalog.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    index: FxHashMap<ProductId, usize>,
}

impl Catalog {
    /// Create a catalog from products in display order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateProduct`] if two products share an id.
    pub fn new(products: impl Into<Vec<Product>>) -> Result<Self, CatalogError> {
        let products = products.into();
        let mut index = FxHashMap::default();

        for (position, product) in products.iter().enumerate() {
            if index.insert(product.id, position).is_some() {
                return Err(CatalogError::DuplicateProduct(product.id));
            }
        }

        Ok(Catalog { products, index })
    }

    /// Get a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.index
            .get(&id)
            .and_then(|&position| self.products.get(position))
    }

    /// Iterate over the products in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Products in the given category, compared case-insensitively.
    /// [`ALL_CATEGORIES`] matches everything.
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Product> {
        self.products.iter().filter(move |product| {
            category == ALL_CATEGORIES || product.category.eq_ignore_ascii_case(category)
        })
    }

    /// [`ALL_CATEGORIES`] followed by each distinct category in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories = vec![ALL_CATEGORIES];

        for product in &self.products {
            if !categories.contains(&product.category.as_str()) {
                categories.push(&product.category);
            }
        }

        categories
    }

    /// Up to `limit` other products, in catalog order.
    pub fn related(&self, id: ProductId, limit: usize) -> impl Iterator<Item = &Product> {
        self.products
            .iter()
            .filter(move |product| product.id != id)
            .take(limit)
    }

    /// Get the number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
