//! Fixtures
//!
//! YAML-backed catalogs, store configuration and scripted sessions, laid out as
//! `<base>/products/<name>.yml`, `<base>/config/<name>.yml` and
//! `<base>/sessions/<name>.yml`.

use std::{fs, path::PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::{
    config::{ConfigError, StoreConfig},
    fixtures::{
        products::ProductsFixture,
        sessions::{SessionFixture, SessionStep},
    },
    prices::PriceError,
    products::{Catalog, CatalogError, Product},
    store::Store,
};

pub mod products;
pub mod sessions;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price or currency
    #[error(transparent)]
    Price(#[from] PriceError),

    /// Invalid catalog
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Invalid store configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Currency mismatch between products, or between products and the store
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Loaded catalog
    catalog: Catalog,

    /// Loaded store configuration
    config: StoreConfig,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: Catalog::default(),
            config: StoreConfig::default(),
        }
    }

    /// Load store configuration from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_config(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("config").join(format!("{name}.yml"));

        self.config = StoreConfig::load(file_path)?;

        Ok(self)
    }

    /// Load the catalog from a YAML fixture file, replacing any loaded before.
    ///
    /// Every product must be priced in the configured store currency.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, a price is invalid,
    /// a currency differs from the store's, or product ids repeat.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;

        let expected = self.config.currency.iso_alpha_code;
        let mut products = Vec::with_capacity(fixture.products.len());

        for product_fixture in fixture.products {
            let found = product_fixture.currency_code()?;

            if found != expected {
                return Err(FixtureError::CurrencyMismatch(
                    expected.to_string(),
                    found.to_string(),
                ));
            }

            products.push(Product::try_from(product_fixture)?);
        }

        self.catalog = Catalog::new(products)?;

        debug!(products = self.catalog.len(), path = %file_path.display(), "loaded catalog");

        Ok(self)
    }

    /// Load the steps of a scripted session
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn session(&self, name: &str) -> Result<Vec<SessionStep>, FixtureError> {
        let file_path = self.base_path.join("sessions").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: SessionFixture = serde_norway::from_str(&contents)?;

        Ok(fixture.steps)
    }

    /// Replay a scripted session against a store, returning the number of steps applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be loaded or a step names an unknown product.
    /// Steps before the failing one stay applied.
    pub fn replay(&self, name: &str, store: &mut Store) -> Result<usize, FixtureError> {
        let steps = self.session(name)?;
        let count = steps.len();

        for step in steps {
            step.apply(&self.catalog, store)?;
        }

        Ok(count)
    }

    /// Load config and catalog sharing a set name.
    ///
    /// # Errors
    ///
    /// Returns an error if either fixture file cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_config(name)?.load_products(name)?;

        Ok(fixture)
    }

    /// An empty store using the loaded configuration.
    pub fn store(&self) -> Store {
        Store::new(self.config.clone())
    }

    /// Get the catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Get the store configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use rusty_money::iso::GBP;
    use tempfile::tempdir;
    use testresult::TestResult;

    use crate::products::ProductId;

    use super::*;

    fn write_fixture(base: &Path, category: &str, name: &str, contents: &str) -> TestResult {
        let dir = base.join(category);

        fs::create_dir_all(&dir)?;
        fs::write(dir.join(format!("{name}.yml")), contents)?;

        Ok(())
    }

    const PRODUCTS: &str = "products:\n\
        - id: 1\n  name: Tee\n  price: \"10.00 GBP\"\n  category: Men\n\
        - id: 2\n  name: Mug\n  price: \"4.50 GBP\"\n  category: Home\n";

    #[test]
    fn fixture_loads_config_and_products() -> TestResult {
        let dir = tempdir()?;

        write_fixture(dir.path(), "config", "uk", "currency: GBP\nshipping_fee: \"2.00 GBP\"\n")?;
        write_fixture(dir.path(), "products", "uk", PRODUCTS)?;

        let mut fixture = Fixture::with_base_path(dir.path());
        fixture.load_config("uk")?.load_products("uk")?;

        assert_eq!(fixture.config().currency, GBP);
        assert_eq!(fixture.catalog().len(), 2);
        assert_eq!(
            fixture.catalog().get(ProductId(2)).map(|product| product.name.as_str()),
            Some("Mug")
        );

        Ok(())
    }

    #[test]
    fn products_must_match_store_currency() -> TestResult {
        let dir = tempdir()?;

        write_fixture(dir.path(), "products", "uk", PRODUCTS)?;

        let mut fixture = Fixture::with_base_path(dir.path());
        let result = fixture.load_products("uk");

        assert!(matches!(
            result,
            Err(FixtureError::CurrencyMismatch(expected, found)) if expected == "USD" && found == "GBP"
        ));

        Ok(())
    }

    #[test]
    fn duplicate_products_are_rejected() -> TestResult {
        let dir = tempdir()?;

        write_fixture(dir.path(), "config", "uk", "currency: GBP\n")?;
        write_fixture(
            dir.path(),
            "products",
            "uk",
            "products:\n\
             - { id: 1, name: Tee, price: \"10.00 GBP\", category: Men }\n\
             - { id: 1, name: Mug, price: \"4.50 GBP\", category: Home }\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        let result = fixture.load_config("uk")?.load_products("uk").map(|_| ());

        assert!(matches!(
            result,
            Err(FixtureError::Catalog(CatalogError::DuplicateProduct(ProductId(1))))
        ));

        Ok(())
    }

    #[test]
    fn replay_applies_every_step() -> TestResult {
        let dir = tempdir()?;

        write_fixture(dir.path(), "config", "uk", "currency: GBP\n")?;
        write_fixture(dir.path(), "products", "uk", PRODUCTS)?;
        write_fixture(
            dir.path(),
            "sessions",
            "basic",
            "steps:\n\
             - { type: add_to_cart, id: 1 }\n\
             - { type: add_to_cart, id: 1 }\n\
             - { type: add_to_wishlist, id: 2 }\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        fixture.load_config("uk")?.load_products("uk")?;

        let mut store = fixture.store();
        let applied = fixture.replay("basic", &mut store)?;

        assert_eq!(applied, 3);
        assert_eq!(store.cart().total_quantity(), 2);
        assert_eq!(store.cart().total_amount_minor(), 2000);
        assert_eq!(store.wishlist().len(), 1);

        Ok(())
    }

    #[test]
    fn bundled_sessions_parse() -> TestResult {
        let fixture = Fixture::new();

        assert_eq!(fixture.session("checkout")?.len(), 12);
        assert_eq!(
            fixture.session("abandon")?.last(),
            Some(&SessionStep::ClearWishlist)
        );

        Ok(())
    }

    #[test]
    fn missing_session_is_an_io_error() {
        let fixture = Fixture::with_base_path("./does-not-exist");

        let result = fixture.session("nope");

        assert!(matches!(result, Err(FixtureError::Io(_))));
    }
}
