//! # Database State
//!
//! Wraps the `Database` connection and turns stored documents into typed
//! values for the console.
//!
//! ## Loading Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  documents table            load_document::<T>(key, default)           │
//! │                                                                         │
//! │  row missing ─────────────► default          (debug!)                   │
//! │  row holds bad JSON ──────► default          (warn!, never an error)    │
//! │  row holds a T ───────────► stored value                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use quickbill_core::document::Decoded;
use quickbill_db::{Database, DbResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

/// Wrapper around `Database` for the console state.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database connection.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }

    /// Loads the document under `key`, falling back to `default` when it is
    /// missing or unreadable.
    pub async fn load_document<T, F>(&self, key: &str, default: F) -> DbResult<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        let decoded = self.db.documents().load::<T>(key).await?;
        if let Decoded::Corrupt(reason) = &decoded {
            warn!(key = %key, reason = %reason, "Stored document is corrupt, using defaults");
        } else if let Decoded::Missing = decoded {
            debug!(key = %key, "No stored document, using defaults");
        }
        Ok(decoded.unwrap_or_else(default))
    }

    /// Overwrites the document under `key`.
    pub async fn save_document<T: Serialize>(&self, key: &str, value: &T) -> DbResult<()> {
        self.db.documents().save(key, value).await?;
        debug!(key = %key, "Document saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickbill_core::document::MENU_KEY;
    use quickbill_core::Menu;
    use quickbill_db::DbConfig;

    async fn state() -> DbState {
        DbState::new(Database::new(DbConfig::in_memory()).await.unwrap())
    }

    #[tokio::test]
    async fn test_missing_document_uses_default() {
        let db = state().await;
        let menu: Menu = db.load_document(MENU_KEY, Menu::default).await.unwrap();
        assert_eq!(menu.len(), 6);
    }

    #[tokio::test]
    async fn test_corrupt_document_uses_default() {
        let db = state().await;
        db.inner().documents().put(MENU_KEY, "{{not json").await.unwrap();

        let menu: Menu = db.load_document(MENU_KEY, Menu::default).await.unwrap();
        assert_eq!(menu, Menu::default());
    }

    #[tokio::test]
    async fn test_saved_document_is_loaded() {
        let db = state().await;
        let menu = Menu::new(vec![]);
        db.save_document(MENU_KEY, &menu).await.unwrap();

        let loaded: Menu = db.load_document(MENU_KEY, Menu::default).await.unwrap();
        assert!(loaded.is_empty());
    }
}
