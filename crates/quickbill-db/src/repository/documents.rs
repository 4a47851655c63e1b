//! # Document Repository
//!
//! Key-value storage of whole JSON documents.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  documents                                                              │
//! │  ┌────────────┬──────────────────────────────────┬──────────────────┐   │
//! │  │ key        │ value                            │ updated_at       │   │
//! │  ├────────────┼──────────────────────────────────┼──────────────────┤   │
//! │  │ menu       │ [{"name":"Samosa","price":20}..] │ 2026-10-19T09:05 │   │
//! │  │ restaurant │ {"name":"THE SNACK BAR",...}     │ 2026-10-19T09:06 │   │
//! │  └────────────┴──────────────────────────────────┴──────────────────┘   │
//! │                                                                         │
//! │  put() overwrites the whole value; there are no partial updates.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use quickbill_core::document::{self, Decoded};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Repository for the key-value document table.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: SqlitePool,
}

impl DocumentRepository {
    /// Creates a new DocumentRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DocumentRepository { pool }
    }

    /// Gets the raw value stored under `key`.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM documents WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub async fn put(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key = %key, bytes = value.len(), "Writing document");

        sqlx::query(
            r#"
            INSERT INTO documents (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Reads and decodes the document under `key`.
    ///
    /// Only storage failures are errors; unparseable content comes back as
    /// [`Decoded::Corrupt`].
    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> DbResult<Decoded<T>> {
        let raw = self.get(key).await?;
        Ok(document::decode(raw.as_deref()))
    }

    /// Encodes `value` as JSON and stores it under `key`.
    pub async fn save<T: Serialize>(&self, key: &str, value: &T) -> DbResult<()> {
        let encoded = document::encode(value).map_err(|e| DbError::Encode {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.put(key, &encoded).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use quickbill_core::document::{MENU_KEY, RESTAURANT_KEY};
    use quickbill_core::{Menu, MenuItem, Money, RestaurantDetails};

    async fn repo() -> (Database, DocumentRepository) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.documents();
        (db, repo)
    }

    #[tokio::test]
    async fn test_missing_key() {
        let (_db, repo) = repo().await;

        assert_eq!(repo.get(MENU_KEY).await.unwrap(), None);
        assert_eq!(repo.load::<Menu>(MENU_KEY).await.unwrap(), Decoded::Missing);
    }

    #[tokio::test]
    async fn test_put_overwrites_whole_value() {
        let (_db, repo) = repo().await;

        repo.put("menu", "[]").await.unwrap();
        repo.put("menu", r#"[{"name":"Tea","price":15}]"#).await.unwrap();

        assert_eq!(
            repo.get("menu").await.unwrap().as_deref(),
            Some(r#"[{"name":"Tea","price":15}]"#)
        );

        let updated_at: String =
            sqlx::query_scalar("SELECT updated_at FROM documents WHERE key = 'menu'")
                .fetch_one(&repo.pool)
                .await
                .unwrap();
        assert!(!updated_at.is_empty());

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents")
            .fetch_one(&repo.pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_corrupt_value_loads_as_corrupt() {
        let (_db, repo) = repo().await;
        repo.put(MENU_KEY, "not json at all").await.unwrap();

        let decoded = repo.load::<Menu>(MENU_KEY).await.unwrap();
        assert!(matches!(decoded, Decoded::Corrupt(_)));
        assert_eq!(decoded.unwrap_or_else(Menu::default).len(), 6);
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let (_db, repo) = repo().await;
        let menu = Menu::new(vec![MenuItem::new("Tea", Money::from_rupees(15))]);

        repo.save(MENU_KEY, &menu).await.unwrap();

        assert_eq!(
            repo.get(MENU_KEY).await.unwrap().as_deref(),
            Some(r#"[{"name":"Tea","price":15}]"#)
        );
        assert_eq!(repo.load::<Menu>(MENU_KEY).await.unwrap(), Decoded::Found(menu));
    }

    #[tokio::test]
    async fn test_saving_same_document_twice_is_stable() {
        let (_db, repo) = repo().await;
        let details = RestaurantDetails::default();

        repo.save(RESTAURANT_KEY, &details).await.unwrap();
        let first = repo.get(RESTAURANT_KEY).await.unwrap();
        repo.save(RESTAURANT_KEY, &details).await.unwrap();
        let second = repo.get(RESTAURANT_KEY).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_documents_persist_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quickbill.db");

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        db.documents()
            .save(RESTAURANT_KEY, &RestaurantDetails::default())
            .await
            .unwrap();
        db.close().await;

        let reopened = Database::new(DbConfig::new(&path)).await.unwrap();
        let decoded = reopened
            .documents()
            .load::<RestaurantDetails>(RESTAURANT_KEY)
            .await
            .unwrap();
        assert_eq!(decoded, Decoded::Found(RestaurantDetails::default()));
    }
}
