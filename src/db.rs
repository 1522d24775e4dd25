pub use self::error::DatabaseError;
pub use self::handle::StorageHandle;
pub use self::manager::DatabaseManager;
pub use self::models::{Item, NewItem};
pub use self::stores::ItemStore;

pub mod error;
pub mod handle;
pub mod manager;
pub mod models;
pub mod schema_sqlite;
pub mod sqlite;
pub mod stores;
