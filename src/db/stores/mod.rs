use async_trait::async_trait;

use super::DatabaseError;
use super::models::Item;

#[async_trait]
pub trait ItemStore: Send + Sync {
    /// All items in storage order.
    async fn list_items(&self) -> Result<Vec<Item>, DatabaseError>;
    async fn get_item(&self, id: i64) -> Result<Option<Item>, DatabaseError>;
    /// Inserts `name` and returns the item with its store-assigned id.
    async fn create_item(&self, name: &str) -> Result<Item, DatabaseError>;
    /// Replaces the name of item `id`. `None` when no such item exists.
    async fn update_item(&self, id: i64, name: &str) -> Result<Option<Item>, DatabaseError>;
    /// Returns `false` when no such item exists.
    async fn delete_item(&self, id: i64) -> Result<bool, DatabaseError>;
}
