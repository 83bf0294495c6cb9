//! In-process storage strategy, used for embedding and tests.

use super::{Product, ProductDraft, ProductStore};
use crate::errors::{Error, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use uuid::Uuid;

/// Product store holding its rows in memory. Ids are UUIDv4 strings; load
/// order is append order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Product>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with the given products.
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            rows: Mutex::new(products),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Product>>> {
        self.rows
            .lock()
            .map_err(|_| Error::persistence("memory store lock poisoned"))
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn load(&self) -> Result<Vec<Product>> {
        Ok(self.lock()?.clone())
    }

    async fn save(&self, draft: &ProductDraft) -> Result<()> {
        self.lock()?.push(Product {
            id: Uuid::new_v4().to_string(),
            name: draft.name.clone(),
            description: draft.description.clone(),
            code: draft.code.clone(),
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.lock()?.retain(|p| p.id != id);
        Ok(())
    }
}
