//! In-memory implementation of ProductStorage
//!
//! This implementation is primarily intended for testing and development purposes.

use crate::{next_product_id, CatalogStoreResult, NewProduct, Product, ProductStorage};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of ProductStorage
///
/// All data is lost when the last clone is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductStore {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryProductStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with `products`
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }
}

#[async_trait]
impl ProductStorage for InMemoryProductStore {
    async fn load(&self) -> Vec<Product> {
        self.products.read().await.clone()
    }

    async fn append(&self, product: NewProduct) -> CatalogStoreResult<Product> {
        let mut products = self.products.write().await;
        let id = next_product_id(products.iter().map(|p| p.id))?;
        let created = product.with_id(id);
        products.push(created.clone());
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CatalogStoreError;

    #[tokio::test]
    async fn empty_store_loads_nothing() {
        let store = InMemoryProductStore::new();
        assert!(store.load().await.is_empty());
        assert_eq!(store.get(1).await, None);
    }

    #[tokio::test]
    async fn append_assigns_increasing_ids() {
        let store = InMemoryProductStore::with_products(vec![NewProduct::new("Mesa", 300).with_id(4)]);

        let first = store.append(NewProduct::new("Cadeira", 120)).await.unwrap();
        let second = store.append(NewProduct::new("Sofa", 900)).await.unwrap();

        assert_eq!(first.id, 5);
        assert_eq!(second.id, 6);
        assert_eq!(store.get(5).await, Some(first));
        assert_eq!(store.load().await.len(), 3);
    }

    #[tokio::test]
    async fn append_after_the_largest_id_fails_without_mutation() {
        let store =
            InMemoryProductStore::with_products(vec![NewProduct::new("Mesa", 300).with_id(u64::MAX)]);

        let err = store.append(NewProduct::new("Cadeira", 120)).await.unwrap_err();

        assert!(matches!(err, CatalogStoreError::Unexpected(_)));
        assert_eq!(store.load().await.len(), 1);
    }

    #[tokio::test]
    async fn clones_share_the_same_collection() {
        let store = InMemoryProductStore::new();
        let other = store.clone();
        store.append(NewProduct::new("Livro", 45)).await.unwrap();
        assert_eq!(other.load().await.len(), 1);
    }
}
