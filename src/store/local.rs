//! Local storage variant: unauthenticated persistence in a [`KvFile`].
//!
//! The entire product list is one JSON-serialized array stored as a string
//! under a fixed key, exactly the shape the original kept in browser local
//! storage. A second fixed key holds the theme preference flag.

use super::{KvFile, Product, ProductDraft, ProductStore};
use crate::errors::Result;
use async_trait::async_trait;
use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

/// Fixed key holding the serialized product array.
const PRODUCTS_KEY: &str = "barcode-products";
/// Fixed key holding the theme preference flag.
const THEME_KEY: &str = "barcode-theme";

/// Display theme preference. `"dark"` selects dark; any other stored value,
/// or a missing key, means light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Light theme (the default)
    #[default]
    Light,
    /// Dark theme
    Dark,
}

impl Theme {
    /// Parses the persisted flag value.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    /// The flag value persisted for this theme.
    pub const fn as_flag(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// Product store backed by a local key-value file. Ids are assigned as
/// UUIDv4 strings; load order is append order.
#[derive(Debug, Clone)]
pub struct LocalStore {
    kv: KvFile,
}

impl LocalStore {
    /// Wraps the given key-value file.
    pub const fn new(kv: KvFile) -> Self {
        Self { kv }
    }

    async fn read_products(&self) -> Result<Vec<Product>> {
        match self.kv.get(PRODUCTS_KEY).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    async fn write_products(&self, products: &[Product]) -> Result<()> {
        let raw = serde_json::to_string(products)?;
        self.kv.set(PRODUCTS_KEY, &raw).await
    }

    /// Loads the persisted theme preference; missing or unknown flags read
    /// as light.
    ///
    /// # Errors
    /// Returns an error if the key-value file cannot be read.
    pub async fn load_theme(&self) -> Result<Theme> {
        let flag = self.kv.get(THEME_KEY).await?;
        Ok(Theme::from_flag(flag.as_deref()))
    }

    /// Persists the theme preference.
    ///
    /// # Errors
    /// Returns an error if the key-value file cannot be written.
    pub async fn save_theme(&self, theme: Theme) -> Result<()> {
        self.kv.set(THEME_KEY, theme.as_flag()).await
    }
}

#[async_trait]
impl ProductStore for LocalStore {
    #[instrument(skip(self))]
    async fn load(&self) -> Result<Vec<Product>> {
        self.read_products().await
    }

    #[instrument(skip(self, draft), fields(code = %draft.code))]
    async fn save(&self, draft: &ProductDraft) -> Result<()> {
        let mut products = self.read_products().await?;
        products.push(Product {
            id: Uuid::new_v4().to_string(),
            name: draft.name.clone(),
            description: draft.description.clone(),
            code: draft.code.clone(),
            created_at: Utc::now(),
        });
        self.write_products(&products).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<()> {
        let mut products = self.read_products().await?;
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() != before {
            self.write_products(&products).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> LocalStore {
        LocalStore::new(KvFile::new(dir.path().join("barcode.json")))
    }

    fn draft(name: &str, code: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            description: String::new(),
            code: code.to_string(),
        }
    }

    #[tokio::test]
    async fn test_load_empty() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = store_in(&dir);
        assert!(store.load().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_save_assigns_id_and_timestamp() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = store_in(&dir);

        store.save(&draft("Widget", "000000001001")).await?;
        let products = store.load().await?;
        assert_eq!(products.len(), 1);
        assert!(!products[0].id.is_empty());
        assert_eq!(products[0].name, "Widget");
        assert_eq!(products[0].code, "000000001001");
        Ok(())
    }

    #[tokio::test]
    async fn test_load_preserves_append_order() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = store_in(&dir);

        store.save(&draft("First", "000000000001")).await?;
        store.save(&draft("Second", "000000000002")).await?;

        let products = store.load().await?;
        assert_eq!(products[0].name, "First");
        assert_eq!(products[1].name, "Second");
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_removes_only_matching_id() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = store_in(&dir);

        store.save(&draft("Keep", "000000000001")).await?;
        store.save(&draft("Drop", "000000000002")).await?;
        let id = store
            .load()
            .await?
            .iter()
            .find(|p| p.name == "Drop")
            .unwrap()
            .id
            .clone();

        store.delete(&id).await?;
        let products = store.load().await?;
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Keep");

        // Deleting an unknown id is tolerated
        store.delete("no-such-id").await?;
        assert_eq!(store.load().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_products_key_holds_a_string_encoded_array() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = store_in(&dir);
        store.save(&draft("Widget", "000000001001")).await?;

        let kv = KvFile::new(dir.path().join("barcode.json"));
        let raw = kv.get("barcode-products").await?.unwrap();
        let parsed: Vec<Product> = serde_json::from_str(&raw)?;
        assert_eq!(parsed.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_theme_round_trip_and_default() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = store_in(&dir);

        assert_eq!(store.load_theme().await?, Theme::Light);

        store.save_theme(Theme::Dark).await?;
        assert_eq!(store.load_theme().await?, Theme::Dark);

        store.save_theme(Theme::Dark.toggled()).await?;
        assert_eq!(store.load_theme().await?, Theme::Light);
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_theme_flag_means_light() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let kv = KvFile::new(dir.path().join("barcode.json"));
        kv.set("barcode-theme", "solarized").await?;

        let store = LocalStore::new(kv);
        assert_eq!(store.load_theme().await?, Theme::Light);
        Ok(())
    }
}
