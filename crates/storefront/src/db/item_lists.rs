//! Persistent key-value storage of cart/wishlist lists.
//!
//! One row per storage key; the value is the full serialized list. Writes
//! replace the whole list (last writer wins), matching the storage model
//! the lists were designed around.

use sqlx::PgPool;

use super::RepositoryError;
use crate::models::ItemList;

/// Repository for per-identity item lists.
pub struct ItemListRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ItemListRepository<'a> {
    /// Create a new item list repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Load the list stored under a key. Missing keys yield an empty list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored JSON is invalid.
    pub async fn load(&self, key: &str) -> Result<ItemList, RepositoryError> {
        let row: Option<(String,)> = sqlx::query_as(
            r"
            SELECT items
            FROM storefront.item_list
            WHERE list_key = $1
            ",
        )
        .bind(key)
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some((json,)) => serde_json::from_str(&json).map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid item list for key {key}: {e}"))
            }),
            None => Ok(ItemList::new()),
        }
    }

    /// Persist the full list under a key, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    /// Returns `RepositoryError::DataCorruption` if the list cannot be serialized.
    pub async fn save(&self, key: &str, list: &ItemList) -> Result<(), RepositoryError> {
        let json = serde_json::to_string(list).map_err(|e| {
            RepositoryError::DataCorruption(format!("failed to serialize item list: {e}"))
        })?;

        sqlx::query(
            r"
            INSERT INTO storefront.item_list (list_key, items, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (list_key)
            DO UPDATE SET items = EXCLUDED.items, updated_at = NOW()
            ",
        )
        .bind(key)
        .bind(json)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Delete the list stored under a key (e.g., after a successful order).
    ///
    /// Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn clear(&self, key: &str) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            DELETE FROM storefront.item_list
            WHERE list_key = $1
            ",
        )
        .bind(key)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
