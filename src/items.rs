//! Items
//!
//! Line items held by the cart and wishlist ledgers, and the candidates callers
//! pass in to create them.

use serde::{Deserialize, Serialize};

use crate::{
    prices::Price,
    products::{Product, ProductId},
};

/// A product a caller wants to put in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartCandidate {
    /// Product id
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Price of one unit
    pub unit_price: Price,

    /// Image URL
    #[serde(default)]
    pub image: String,

    /// Selected colour
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Selected size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl CartCandidate {
    /// Creates a candidate without colour or size.
    pub fn new(id: ProductId, name: impl Into<String>, unit_price: Price) -> Self {
        Self {
            id,
            name: name.into(),
            unit_price,
            image: String::new(),
            color: None,
            size: None,
        }
    }

    /// Sets the image URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Sets the selected colour.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets the selected size.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }
}

impl From<&Product> for CartCandidate {
    fn from(product: &Product) -> Self {
        CartCandidate::new(product.id, product.name.clone(), product.price)
            .with_image(product.image.clone())
    }
}

/// One cart entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    id: ProductId,
    name: String,
    image: String,
    unit_price: Price,
    quantity: i64,
    color: String,
    size: String,
}

impl CartItem {
    /// Builds a new entry with a quantity of one.
    pub(crate) fn from_candidate(candidate: CartCandidate) -> Self {
        Self {
            id: candidate.id,
            name: candidate.name,
            image: candidate.image,
            unit_price: candidate.unit_price,
            quantity: 1,
            color: candidate.color.unwrap_or_default(),
            size: candidate.size.unwrap_or_default(),
        }
    }

    /// Returns a copy of this entry with a different quantity.
    #[must_use]
    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.set_quantity(quantity);
        self
    }

    pub(crate) fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
    }

    /// Product id
    pub fn id(&self) -> ProductId {
        self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Image URL
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Unit price captured when the entry was created
    pub fn unit_price(&self) -> Price {
        self.unit_price
    }

    /// Units held
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Selected colour, empty when none was chosen
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Selected size, empty when none was chosen
    pub fn size(&self) -> &str {
        &self.size
    }

    /// Unit price multiplied by quantity, in minor units.
    pub fn line_total(&self) -> i64 {
        self.unit_price.times(self.quantity)
    }
}

/// A product a caller wants to put on the wishlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistCandidate {
    /// Product id
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Current price
    pub unit_price: Price,

    /// Price before discount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Price>,

    /// Image URL
    #[serde(default)]
    pub image: String,

    /// Stock flag; treated as in stock when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
}

impl WishlistCandidate {
    /// Creates a candidate with no discount or stock information.
    pub fn new(id: ProductId, name: impl Into<String>, unit_price: Price) -> Self {
        Self {
            id,
            name: name.into(),
            unit_price,
            original_price: None,
            image: String::new(),
            in_stock: None,
        }
    }

    /// Sets the pre-discount price.
    #[must_use]
    pub fn with_original_price(mut self, original_price: Price) -> Self {
        self.original_price = Some(original_price);
        self
    }

    /// Sets the image URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Sets the stock flag.
    #[must_use]
    pub fn with_in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = Some(in_stock);
        self
    }
}

impl From<&Product> for WishlistCandidate {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            original_price: product.original_price,
            image: product.image.clone(),
            in_stock: Some(product.in_stock),
        }
    }
}

/// One wishlist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistItem {
    id: ProductId,
    name: String,
    image: String,
    unit_price: Price,
    original_price: Option<Price>,
    in_stock: bool,
}

impl WishlistItem {
    pub(crate) fn from_candidate(candidate: WishlistCandidate) -> Self {
        Self {
            id: candidate.id,
            name: candidate.name,
            image: candidate.image,
            unit_price: candidate.unit_price,
            original_price: candidate.original_price,
            in_stock: candidate.in_stock.unwrap_or(true),
        }
    }

    /// Product id
    pub fn id(&self) -> ProductId {
        self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Image URL
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Price captured when the entry was created
    pub fn unit_price(&self) -> Price {
        self.unit_price
    }

    /// Price before discount, if any
    pub fn original_price(&self) -> Option<Price> {
        self.original_price
    }

    /// Stock flag captured when the entry was created
    pub fn in_stock(&self) -> bool {
        self.in_stock
    }
}

impl From<&WishlistItem> for CartCandidate {
    fn from(item: &WishlistItem) -> Self {
        CartCandidate::new(item.id, item.name.clone(), item.unit_price)
            .with_image(item.image.clone())
    }
}
