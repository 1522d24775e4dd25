use std::sync::Arc;

use diesel::RunQueryDsl;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::db::sqlite::SqliteItemStore;
use crate::db::{DatabaseError, ItemStore, StorageHandle};

const CREATE_ITEMS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS items (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    )
"#;

#[derive(Clone)]
pub struct DatabaseManager {
    handle: StorageHandle,
    item_store: Arc<dyn ItemStore>,
}

impl DatabaseManager {
    /// Opens the configured database. Fails if the file cannot be opened or
    /// does not answer a trivial query.
    pub async fn new(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let path = config.sqlite_path();
        let handle = StorageHandle::open(&path).await?;
        info!("connected to sqlite database: {}", path);

        let item_store = Arc::new(SqliteItemStore::new(handle.clone()));

        Ok(Self { handle, item_store })
    }

    /// Ensures the `items` table exists. Safe to run against an initialized database.
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        self.handle
            .execute(|conn| diesel::sql_query(CREATE_ITEMS_TABLE).execute(conn))
            .await
            .map_err(|e| match e {
                DatabaseError::Query(message) => DatabaseError::Migration(message),
                other => other,
            })?;

        info!("table 'items' ensured to exist");
        Ok(())
    }

    pub fn item_store(&self) -> Arc<dyn ItemStore> {
        self.item_store.clone()
    }

    pub fn sqlite_path(&self) -> &str {
        self.handle.path()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::NamedTempFile;

    use super::DatabaseManager;
    use crate::config::DatabaseConfig;
    use crate::db::DatabaseError;

    #[tokio::test]
    async fn sqlite_items_survive_reopen() {
        let file = NamedTempFile::new().expect("temp sqlite file");
        let db_path = file.path().to_string_lossy().to_string();

        let config = DatabaseConfig {
            filename: format!("sqlite://{db_path}"),
        };

        let manager = DatabaseManager::new(&config).await.expect("db manager");
        assert_eq!(manager.sqlite_path(), db_path);
        manager.migrate().await.expect("migrate");

        let created = manager
            .item_store()
            .create_item("apple")
            .await
            .expect("insert item");

        manager
            .item_store()
            .update_item(created.id, "avocado")
            .await
            .expect("update item")
            .expect("item exists");
        drop(manager);

        let manager_reopened = DatabaseManager::new(&config).await.expect("db manager reopened");
        manager_reopened.migrate().await.expect("migrate reopened");

        let persisted = manager_reopened
            .item_store()
            .get_item(created.id)
            .await
            .expect("query after reopen")
            .expect("item exists after reopen");
        assert_eq!(persisted.name, "avocado");

        assert!(
            manager_reopened
                .item_store()
                .delete_item(created.id)
                .await
                .expect("delete after reopen")
        );

        let after_delete = manager_reopened
            .item_store()
            .get_item(created.id)
            .await
            .expect("query after delete");
        assert!(after_delete.is_none());
    }

    #[tokio::test]
    async fn migrate_is_idempotent() {
        let config = DatabaseConfig {
            filename: ":memory:".to_string(),
        };
        let manager = DatabaseManager::new(&config).await.expect("db manager");
        manager.migrate().await.expect("first migrate");
        manager.item_store().create_item("kept").await.expect("insert");
        manager.migrate().await.expect("second migrate");

        let items = manager.item_store().list_items().await.expect("list");
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn new_fails_when_database_cannot_be_opened() {
        let config = DatabaseConfig {
            filename: "/nonexistent/items-api/api.db".to_string(),
        };
        let result = DatabaseManager::new(&config).await;
        assert!(matches!(result, Err(DatabaseError::Connection(_))));
    }
}
