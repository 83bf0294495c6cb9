//! Remote storage variant: a per-user document collection on `SeaORM`.
//!
//! Every row is tagged with its owner's identifier; loads filter by owner and
//! order by creation time descending, so the newest product lists first. The
//! owner identity is supplied at construction by whatever session management
//! sits in front of the store.

use super::{Product, ProductDraft, ProductStore};
use crate::{
    entities::{Product as ProductEntity, ProductColumn, product},
    errors::Result,
};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{DatabaseConnection, QueryOrder, Set, prelude::*};
use tracing::instrument;

/// Product store backed by the shared database, scoped to one owner.
#[derive(Debug, Clone)]
pub struct RemoteStore {
    db: DatabaseConnection,
    owner_id: String,
}

impl RemoteStore {
    /// Creates a store over `db` scoped to `owner_id`.
    pub const fn new(db: DatabaseConnection, owner_id: String) -> Self {
        Self { db, owner_id }
    }
}

impl From<product::Model> for Product {
    fn from(model: product::Model) -> Self {
        Self {
            id: model.id.to_string(),
            name: model.name,
            description: model.description,
            code: model.code,
            created_at: model.created_at,
        }
    }
}

#[async_trait]
impl ProductStore for RemoteStore {
    #[instrument(skip(self), fields(owner = %self.owner_id))]
    async fn load(&self) -> Result<Vec<Product>> {
        let models = ProductEntity::find()
            .filter(ProductColumn::OwnerId.eq(&self.owner_id))
            .order_by_desc(ProductColumn::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self, draft), fields(owner = %self.owner_id, code = %draft.code))]
    async fn save(&self, draft: &ProductDraft) -> Result<()> {
        let row = product::ActiveModel {
            owner_id: Set(self.owner_id.clone()),
            name: Set(draft.name.clone()),
            description: Set(draft.description.clone()),
            code: Set(draft.code.clone()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        row.insert(&self.db).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(owner = %self.owner_id))]
    async fn delete(&self, id: &str) -> Result<()> {
        // Non-numeric ids cannot exist in this store; deleting one is the
        // same tolerated no-op as deleting an unknown row id.
        let Ok(row_id) = id.parse::<i64>() else {
            return Ok(());
        };
        ProductEntity::delete_many()
            .filter(ProductColumn::Id.eq(row_id))
            .filter(ProductColumn::OwnerId.eq(&self.owner_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;
    use chrono::{Duration, Utc};

    fn draft(name: &str, code: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            description: String::new(),
            code: code.to_string(),
        }
    }

    async fn insert_at(
        db: &DatabaseConnection,
        owner: &str,
        name: &str,
        created_at: chrono::DateTime<Utc>,
    ) -> Result<()> {
        let row = product::ActiveModel {
            owner_id: Set(owner.to_string()),
            name: Set(name.to_string()),
            description: Set(String::new()),
            code: Set("000000000000".to_string()),
            created_at: Set(created_at),
            ..Default::default()
        };
        row.insert(db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_save_and_load() -> Result<()> {
        let db = setup_test_db().await?;
        let store = RemoteStore::new(db, "alice".to_string());

        store.save(&draft("Widget", "123456789012")).await?;
        let products = store.load().await?;
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Widget");
        assert_eq!(products[0].code, "123456789012");
        assert!(products[0].id.parse::<i64>().is_ok());
        Ok(())
    }

    #[tokio::test]
    async fn test_rows_are_owner_scoped() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = RemoteStore::new(db.clone(), "alice".to_string());
        let bob = RemoteStore::new(db, "bob".to_string());

        alice.save(&draft("Alice's", "000000000001")).await?;
        bob.save(&draft("Bob's", "000000000002")).await?;

        let alice_products = alice.load().await?;
        assert_eq!(alice_products.len(), 1);
        assert_eq!(alice_products[0].name, "Alice's");

        let bob_products = bob.load().await?;
        assert_eq!(bob_products.len(), 1);
        assert_eq!(bob_products[0].name, "Bob's");
        Ok(())
    }

    #[tokio::test]
    async fn test_load_orders_newest_first() -> Result<()> {
        let db = setup_test_db().await?;
        let now = Utc::now();
        insert_at(&db, "alice", "Oldest", now - Duration::hours(2)).await?;
        insert_at(&db, "alice", "Newest", now).await?;
        insert_at(&db, "alice", "Middle", now - Duration::hours(1)).await?;

        let store = RemoteStore::new(db, "alice".to_string());
        let names: Vec<_> = store.load().await?.into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Newest", "Middle", "Oldest"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_is_owner_scoped() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = RemoteStore::new(db.clone(), "alice".to_string());
        let bob = RemoteStore::new(db, "bob".to_string());

        bob.save(&draft("Bob's", "000000000002")).await?;
        let bob_id = bob.load().await?[0].id.clone();

        // Alice cannot delete Bob's row
        alice.delete(&bob_id).await?;
        assert_eq!(bob.load().await?.len(), 1);

        bob.delete(&bob_id).await?;
        assert!(bob.load().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_unknown_or_malformed_id_is_noop() -> Result<()> {
        let db = setup_test_db().await?;
        let store = RemoteStore::new(db, "alice".to_string());
        store.save(&draft("Widget", "000000000001")).await?;

        store.delete("999999").await?;
        store.delete("not-a-row-id").await?;
        assert_eq!(store.load().await?.len(), 1);
        Ok(())
    }
}
