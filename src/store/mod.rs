//! Storage backend capability for the product registry.
//!
//! Three interchangeable strategies implement [`ProductStore`], selected at
//! startup from configuration: a local key-value file (unauthenticated), a
//! remote per-user document collection on `SQLite`/`SeaORM`, and an in-process
//! memory store for embedding and tests. The registry only ever sees the
//! trait: an async load/save/delete capability.

use crate::{
    config::{BackendKind, StorageConfig},
    errors::Result,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

pub mod kv;
pub mod local;
pub mod memory;
pub mod remote;

pub use kv::KvFile;
pub use local::{LocalStore, Theme};
pub use memory::MemoryStore;
pub use remote::RemoteStore;

/// A persisted product record.
///
/// `id` is assigned by the backend at save time and is the storage key;
/// `code` is the scanner-readable value matched on lookup. Neither is ever
/// mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Backend-assigned unique handle, stable for the record's lifetime
    pub id: String,
    /// Product name, non-empty
    pub name: String,
    /// Optional description, empty string when absent
    pub description: String,
    /// The 12-digit barcode value
    pub code: String,
    /// When the backend saved the record
    pub created_at: DateTime<Utc>,
}

/// A product about to be saved: everything but the backend-assigned fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    /// Trimmed, validated product name
    pub name: String,
    /// Trimmed description, possibly empty
    pub description: String,
    /// Freshly generated barcode value
    pub code: String,
}

/// Async persistence capability consumed by the registry.
///
/// `save` assigns the id and timestamp; `delete` of an unknown id is not an
/// error (the reference behavior tolerates it silently).
#[async_trait]
pub trait ProductStore {
    /// Loads every product visible to this store, in the store's own order.
    async fn load(&self) -> Result<Vec<Product>>;

    /// Persists a new product, assigning its id and creation timestamp.
    async fn save(&self, draft: &ProductDraft) -> Result<()>;

    /// Deletes the product with the given id, if present.
    async fn delete(&self, id: &str) -> Result<()>;
}

/// Boxed store handle the registry owns.
pub type SharedStore = Box<dyn ProductStore + Send + Sync>;

/// Opens the storage backend selected by configuration.
///
/// # Errors
/// Returns an error if the backing file or database cannot be opened or its
/// schema cannot be created.
pub async fn open_store(config: &StorageConfig) -> Result<SharedStore> {
    match config.backend {
        BackendKind::Local => {
            info!(path = %config.path.display(), "opening local key-value store");
            Ok(Box::new(LocalStore::new(KvFile::new(&config.path))))
        }
        BackendKind::Remote => {
            info!(owner = %config.owner_id, "opening remote document store");
            let db = crate::config::database::create_connection().await?;
            crate::config::database::create_tables(&db).await?;
            Ok(Box::new(RemoteStore::new(db, config.owner_id.clone())))
        }
        BackendKind::Memory => {
            info!("opening in-memory store");
            Ok(Box::new(MemoryStore::new()))
        }
    }
}
