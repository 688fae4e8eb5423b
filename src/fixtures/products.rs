//! Product Fixtures

use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    prices::parse_price,
    products::{Product, ProductId},
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Products in display order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product id
    pub id: u64,

    /// Product name
    pub name: String,

    /// Product price (e.g., "29.99 USD")
    pub price: String,

    /// Price before discount (e.g., "39.99 USD")
    #[serde(default)]
    pub original_price: Option<String>,

    /// Image URL
    #[serde(default)]
    pub image: String,

    /// Category name
    pub category: String,

    /// Available colours
    #[serde(default)]
    pub colors: Vec<String>,

    /// Available sizes
    #[serde(default)]
    pub sizes: Vec<String>,

    /// Average review rating
    #[serde(default)]
    pub rating: f32,

    /// Stock flag, in stock when absent
    #[serde(default = "in_stock_by_default")]
    pub in_stock: bool,
}

fn in_stock_by_default() -> bool {
    true
}

impl ProductFixture {
    /// Currency code of the product's price, for consistency checks before conversion.
    ///
    /// # Errors
    ///
    /// Returns an error if the price string is invalid.
    pub fn currency_code(&self) -> Result<&'static str, FixtureError> {
        let (_price, currency) = parse_price(&self.price)?;

        Ok(currency.iso_alpha_code)
    }
}

impl TryFrom<ProductFixture> for Product {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let (price, currency) = parse_price(&fixture.price)?;

        let original_price = match fixture.original_price.as_deref() {
            Some(original) => {
                let (original_price, original_currency) = parse_price(original)?;

                if original_currency != currency {
                    return Err(FixtureError::CurrencyMismatch(
                        currency.iso_alpha_code.to_string(),
                        original_currency.iso_alpha_code.to_string(),
                    ));
                }

                Some(original_price)
            }
            None => None,
        };

        Ok(Product {
            id: ProductId(fixture.id),
            name: fixture.name,
            price,
            original_price,
            image: fixture.image,
            category: fixture.category,
            colors: fixture.colors.into_iter().collect(),
            sizes: fixture.sizes.into_iter().collect(),
            rating: fixture.rating,
            in_stock: fixture.in_stock,
        })
    }
}
