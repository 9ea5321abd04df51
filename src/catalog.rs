//! Catalog
//!
//! The fixed list of products the till can sell. A catalog is built once at start-up
//! and never changes for the lifetime of the process.

use std::{fs, path::Path};

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Product identifier, as typed in at the till.
pub type ProductId = u32;

/// Errors raised while building or loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading the catalog file
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("failed to parse catalog YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Two products share an id.
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),

    /// Product ids start at 1.
    #[error("product id must be at least 1 (product {0:?})")]
    InvalidId(String),

    /// A product has a negative price.
    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),

    /// The catalog has no products.
    #[error("catalog has no products")]
    Empty,
}

/// Product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Unit price
    pub price: Decimal,
}

impl Product {
    /// Create a new product.
    pub fn new(id: ProductId, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }
}

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
struct CatalogFile {
    products: Vec<Product>,
}

/// Catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    positions: FxHashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog from products, keeping their declaration order.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] when the list is empty, an id is zero or repeated, or a
    /// price is negative.
    pub fn new(products: impl Into<Vec<Product>>) -> Result<Self, CatalogError> {
        let products = products.into();

        if products.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut positions = FxHashMap::default();

        for (position, product) in products.iter().enumerate() {
            if product.id == 0 {
                return Err(CatalogError::InvalidId(product.name.clone()));
            }

            if product.price < Decimal::ZERO {
                return Err(CatalogError::NegativePrice(product.id));
            }

            if positions.insert(product.id, position).is_some() {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }

        Ok(Self {
            products,
            positions,
        })
    }

    /// The built-in café menu.
    pub fn cafe() -> Self {
        let products = vec![
            Product::new(1, "Coffee", Decimal::new(250, 2)),
            Product::new(2, "Black Tea", Decimal::new(100, 2)),
            Product::new(3, "Matcha Tea", Decimal::new(200, 2)),
            Product::new(4, "Yerba Mate", Decimal::new(150, 2)),
            Product::new(5, "Hot Chocolate Delux", Decimal::new(800, 2)),
            Product::new(6, "Matcha Shake Delux", Decimal::new(1200, 2)),
        ];

        let positions = products
            .iter()
            .enumerate()
            .map(|(position, product)| (product.id, position))
            .collect();

        Self {
            products,
            positions,
        }
    }

    /// Parse a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the YAML is malformed or the products are invalid.
    pub fn from_yaml(contents: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_norway::from_str(contents)?;

        Self::new(file.products)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the file cannot be read, parsed or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Products in declaration order.
    pub fn list(&self) -> &[Product] {
        &self.products
    }

    /// Find a product by id.
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.positions
            .get(&id)
            .and_then(|&position| self.products.get(position))
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn cafe_lists_products_in_declaration_order() {
        let catalog = Catalog::cafe();

        let ids: Vec<ProductId> = catalog.list().iter().map(|p| p.id).collect();

        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn find_returns_product() {
        let catalog = Catalog::cafe();

        let coffee = catalog.find(1).map(|p| (p.name.as_str(), p.price));

        assert_eq!(coffee, Some(("Coffee", Decimal::new(250, 2))));
    }

    #[test]
    fn find_unknown_id_is_absent() {
        let catalog = Catalog::cafe();

        assert!(catalog.find(999).is_none());
        assert!(catalog.find(0).is_none());
    }

    #[test]
    fn new_rejects_duplicate_ids() {
        let result = Catalog::new(vec![
            Product::new(1, "Coffee", Decimal::ONE),
            Product::new(1, "Tea", Decimal::ONE),
        ]);

        assert!(matches!(result, Err(CatalogError::DuplicateId(1))));
    }

    #[test]
    fn new_rejects_zero_id() {
        let result = Catalog::new(vec![Product::new(0, "Coffee", Decimal::ONE)]);

        assert!(matches!(result, Err(CatalogError::InvalidId(name)) if name == "Coffee"));
    }

    #[test]
    fn new_rejects_negative_price() {
        let result = Catalog::new(vec![Product::new(3, "Refund", Decimal::new(-1, 0))]);

        assert!(matches!(result, Err(CatalogError::NegativePrice(3))));
    }

    #[test]
    fn new_rejects_empty_list() {
        assert!(matches!(Catalog::new(Vec::new()), Err(CatalogError::Empty)));
    }

    #[test]
    fn new_accepts_free_products() -> TestResult {
        let catalog = Catalog::new(vec![Product::new(7, "Water", Decimal::ZERO)])?;

        assert_eq!(catalog.len(), 1);

        Ok(())
    }

    #[test]
    fn from_yaml_parses_products() -> TestResult {
        let yaml = r#"
products:
  - id: 10
    name: Flat White
    price: "3.20"
  - id: 11
    name: Scone
    price: "2.05"
"#;

        let catalog = Catalog::from_yaml(yaml)?;

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find(11).map(|p| p.price), Some(Decimal::new(205, 2)));

        Ok(())
    }

    #[test]
    fn from_yaml_rejects_malformed_documents() {
        let result = Catalog::from_yaml("products: [oops");

        assert!(matches!(result, Err(CatalogError::Yaml(_))));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let result = Catalog::load("./does-not-exist/catalog.yml");

        assert!(matches!(result, Err(CatalogError::Io(_))));
    }
}
