//! Storefront Catalog Store
//!
//! Provides the product model and the storage abstraction used by the
//! product directory service. The `ProductStorage` trait defines a contract
//! for loading the whole product collection and appending new products to it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use thiserror::Error;

/// A product record as persisted and served over the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique id, assigned by the store on creation
    pub id: u64,
    #[serde(rename = "nome")]
    pub name: String,
    /// Price exactly as supplied by the caller (integer or float)
    #[serde(rename = "preco")]
    pub price: Number,
}

/// A product that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "preco")]
    pub price: Number,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: impl Into<Number>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
        }
    }

    /// Attach an id, producing the stored representation
    pub fn with_id(self, id: u64) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
        }
    }
}

/// Next id after `ids`: one past the current maximum, or 1 when empty
pub fn next_product_id(ids: impl IntoIterator<Item = u64>) -> CatalogStoreResult<u64> {
    let max = ids.into_iter().max().unwrap_or(0);
    max.checked_add(1).ok_or_else(|| {
        CatalogStoreError::Unexpected(format!("no product id left after {}", max))
    })
}

/// Errors that can occur during catalog store operations
#[derive(Error, Debug)]
pub enum CatalogStoreError {
    #[error("I/O error on backing store {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Result type for ProductStorage operations
pub type CatalogStoreResult<T> = Result<T, CatalogStoreError>;

/// Health of a backing store as seen by a probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreHealth {
    /// Readable and decodable
    Up,
    /// Readable but the contents do not decode; reads return an empty collection
    Degraded,
}

/// Trait defining the contract for product storage implementations
#[async_trait]
pub trait ProductStorage: Send + Sync + std::fmt::Debug {
    /// Load the full collection in stored order.
    ///
    /// Never fails: a missing, unreadable or corrupt store is an empty collection.
    async fn load(&self) -> Vec<Product>;

    /// Assign the next id to `product`, append it and persist the whole collection
    async fn append(&self, product: NewProduct) -> CatalogStoreResult<Product>;

    /// Find a product by id
    async fn get(&self, id: u64) -> Option<Product> {
        self.load().await.into_iter().find(|p| p.id == id)
    }

    /// Prepare the backing store for use (e.g. create an empty file)
    async fn ensure_initialized(&self) -> CatalogStoreResult<()> {
        Ok(())
    }

    /// Probe the backing store
    async fn health_check(&self) -> CatalogStoreResult<StoreHealth> {
        Ok(StoreHealth::Up)
    }
}

pub mod file;
pub mod memory;

pub use file::JsonFileProductStore;
pub use memory::InMemoryProductStore;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn next_id_starts_at_one() {
        assert_eq!(next_product_id([]).unwrap(), 1);
    }

    #[test]
    fn next_id_is_past_the_maximum_not_the_length() {
        let products = vec![
            NewProduct::new("a", 1).with_id(7),
            NewProduct::new("b", 2).with_id(3),
        ];
        assert_eq!(next_product_id(products.iter().map(|p| p.id)).unwrap(), 8);
    }

    #[test]
    fn next_id_fails_instead_of_wrapping_at_the_largest_id() {
        let err = next_product_id([5, u64::MAX]).unwrap_err();
        assert!(matches!(err, CatalogStoreError::Unexpected(_)));
    }

    #[test]
    fn product_uses_portuguese_wire_names_and_keeps_number_form() {
        let product = NewProduct::new("Caneta", 10).with_id(1);
        assert_eq!(
            serde_json::to_value(&product).unwrap(),
            json!({"id": 1, "nome": "Caneta", "preco": 10})
        );

        let decoded: Product =
            serde_json::from_value(json!({"id": 2, "nome": "Lapis", "preco": 2.5})).unwrap();
        assert_eq!(decoded.price.as_f64(), Some(2.5));
        assert!(decoded.price.is_f64());
    }
}
