//! Product registry - the in-memory product collection and its operations.
//!
//! The registry owns an ordered sequence of products mirrored from a storage
//! backend. Every mutation goes through the backend and then reloads the
//! authoritative state wholesale (read-after-write), so what the caller sees
//! afterwards is what the source of truth holds, even under concurrent use
//! of the same backend elsewhere. The `&mut self` receivers keep a single
//! registry from overlapping its own persistence round-trips.

use crate::{
    core::code,
    errors::{Error, Result},
    store::{Product, ProductDraft, SharedStore},
};
use tracing::{info, instrument, warn};

/// The in-memory product collection, backed by a pluggable store.
pub struct Registry {
    store: SharedStore,
    products: Vec<Product>,
}

impl Registry {
    /// Creates an empty registry over the given store. Call [`reload`] to
    /// populate it from the backend.
    ///
    /// [`reload`]: Registry::reload
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            products: Vec::new(),
        }
    }

    /// Adds a new product: validates the name, generates a barcode value,
    /// persists a draft through the backend, reloads, and returns the
    /// product as the backend now reports it.
    ///
    /// # Errors
    /// Returns `Validation` if `name` trims to empty; `Persistence` if the
    /// saved product cannot be found after the reload; any backend error
    /// otherwise. Validation failures leave the registry untouched.
    #[instrument(skip(self, description))]
    pub async fn add(&mut self, name: &str, description: &str) -> Result<Product> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::validation("Product name is required"));
        }

        let draft = ProductDraft {
            name: name.to_string(),
            description: description.trim().to_string(),
            code: code::generate(),
        };
        self.store.save(&draft).await?;
        self.reload().await?;

        let product = self
            .find_by_code(&draft.code)
            .cloned()
            .ok_or_else(|| Error::persistence("saved product missing after reload"))?;
        info!(code = %product.code, "added product '{}'", product.name);
        Ok(product)
    }

    /// Removes the product with the given id and reloads. Confirmation is
    /// the caller's duty; an id the backend does not know is tolerated.
    ///
    /// # Errors
    /// Returns any backend delete or reload error.
    #[instrument(skip(self))]
    pub async fn remove(&mut self, id: &str) -> Result<()> {
        self.store.delete(id).await?;
        self.reload().await
    }

    /// Removes every product, one deletion at a time, continuing past
    /// individual failures, then reloads once. The post-reload state
    /// reflects whatever subset of deletions succeeded.
    ///
    /// # Errors
    /// Returns a reload error only; failed deletions are logged and the
    /// operation itself reports success (reference behavior).
    #[instrument(skip(self))]
    pub async fn remove_all(&mut self) -> Result<()> {
        let ids: Vec<String> = self.products.iter().map(|p| p.id.clone()).collect();
        for id in ids {
            if let Err(e) = self.store.delete(&id).await {
                warn!("failed to delete product {id}: {e}");
            }
        }
        self.reload().await
    }

    /// Finds the product whose stored code equals `code` byte-for-byte.
    /// No trimming, no case folding; first match wins on a collision.
    #[must_use]
    pub fn find_by_code(&self, code: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.code == code)
    }

    /// Replaces the in-memory sequence wholesale from the backend. On
    /// failure the current sequence is left unchanged and the error
    /// propagates.
    ///
    /// # Errors
    /// Returns any backend load error.
    #[instrument(skip(self))]
    pub async fn reload(&mut self) -> Result<()> {
        self.products = self.store.load().await?;
        Ok(())
    }

    /// Wipes the in-memory sequence without touching the backend. The
    /// sign-out touchpoint for the authenticated variant.
    pub fn clear(&mut self) {
        self.products.clear();
    }

    /// The current in-memory sequence, in backend order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the registry currently holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
