//! JSON file implementation of ProductStorage
//!
//! The whole collection lives in a single file holding a JSON array. Every
//! read reloads the file and every append rewrites it in full; nothing is
//! cached between calls.
//!
//! Entries are decoded one at a time. An entry that does not decode as a
//! product is left out of reads but kept verbatim when the file is rewritten.

use crate::{
    next_product_id, CatalogStoreError, CatalogStoreResult, NewProduct, Product, ProductStorage,
    StoreHealth,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// File-backed product store
///
/// Appends go through a single-writer lock so two concurrent creates on the
/// same instance cannot compute the same id. Reads do not take the lock.
/// Separate processes sharing one file are not coordinated.
#[derive(Debug)]
pub struct JsonFileProductStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileProductStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> CatalogStoreError {
        CatalogStoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    /// Read the raw array entries, distinguishing "missing" from other failures
    async fn read_entries(&self) -> CatalogStoreResult<Option<Vec<Value>>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        let entries = serde_json::from_slice(&bytes)?;
        Ok(Some(entries))
    }

    /// Entries as stored, with a missing or unreadable file read as empty
    async fn load_entries(&self) -> Vec<Value> {
        match self.read_entries().await {
            Ok(Some(entries)) => entries,
            Ok(None) => {
                debug!(path = %self.path.display(), "Backing store missing, treating as empty");
                Vec::new()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Backing store unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    fn decode_entries(&self, entries: &[Value]) -> Vec<Product> {
        entries
            .iter()
            .filter_map(|entry| match Product::deserialize(entry) {
                Ok(product) => Some(product),
                Err(e) => {
                    warn!(
                        path = %self.path.display(),
                        error = %e,
                        %entry,
                        "Skipping undecodable product entry"
                    );
                    None
                }
            })
            .collect()
    }

    async fn write_entries<T: Serialize>(&self, entries: &[T]) -> CatalogStoreResult<()> {
        let data = serde_json::to_vec_pretty(entries)?;
        tokio::fs::write(&self.path, data)
            .await
            .map_err(|e| self.io_error(e))
    }
}

/// Integer `id` of a raw entry, whether or not the rest of it decodes
fn entry_id(entry: &Value) -> Option<u64> {
    entry.get("id").and_then(Value::as_u64)
}

#[async_trait]
impl ProductStorage for JsonFileProductStore {
    async fn load(&self) -> Vec<Product> {
        let entries = self.load_entries().await;
        self.decode_entries(&entries)
    }

    /// Appends and rewrites the file.
    ///
    /// The new id is past every integer id in the file, including entries
    /// that do not decode. A failed write is logged and the created product
    /// is still returned; only a failure to serialise the collection or to
    /// assign an id is reported as an error.
    async fn append(&self, product: NewProduct) -> CatalogStoreResult<Product> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.load_entries().await;
        let id = next_product_id(entries.iter().filter_map(entry_id))?;
        let created = product.with_id(id);
        entries.push(serde_json::to_value(&created)?);

        match self.write_entries(&entries).await {
            Ok(()) => debug!(id = created.id, path = %self.path.display(), "Persisted product collection"),
            Err(CatalogStoreError::SerializationError(e)) => {
                return Err(CatalogStoreError::SerializationError(e))
            }
            Err(e) => error!(error = %e, "Could not save product collection"),
        }

        Ok(created)
    }

    async fn ensure_initialized(&self) -> CatalogStoreResult<()> {
        match tokio::fs::try_exists(&self.path).await {
            Ok(true) => Ok(()),
            Ok(false) => {
                info!(path = %self.path.display(), "Creating empty product store");
                self.write_entries::<Value>(&[]).await
            }
            Err(e) => Err(self.io_error(e)),
        }
    }

    /// `Degraded` when the file is not a JSON array or holds entries that
    /// reads skip
    async fn health_check(&self) -> CatalogStoreResult<StoreHealth> {
        match self.read_entries().await {
            Ok(None) => Ok(StoreHealth::Up),
            Ok(Some(entries)) => {
                if entries.iter().all(|entry| Product::deserialize(entry).is_ok()) {
                    Ok(StoreHealth::Up)
                } else {
                    Ok(StoreHealth::Degraded)
                }
            }
            Err(CatalogStoreError::SerializationError(_)) => Ok(StoreHealth::Degraded),
            Err(e) => Err(e),
        }
    }
}
