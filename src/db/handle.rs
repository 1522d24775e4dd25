use std::sync::Arc;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use parking_lot::Mutex;

use super::DatabaseError;

/// The one connection to the SQLite database, shared by every request.
///
/// Each operation runs on the blocking pool while holding the lock, so at most
/// one statement is in flight against the database at any time. Reads and
/// writes queue on the same lock.
#[derive(Clone)]
pub struct StorageHandle {
    conn: Arc<Mutex<SqliteConnection>>,
    path: Arc<String>,
}

impl StorageHandle {
    /// Opens `path` and checks the connection with a trivial statement.
    pub async fn open(path: &str) -> Result<Self, DatabaseError> {
        let db_path = path.to_string();
        let conn = tokio::task::spawn_blocking(move || {
            let mut conn = SqliteConnection::establish(&db_path)
                .map_err(|e| DatabaseError::Connection(e.to_string()))?;
            diesel::sql_query("SELECT 1")
                .execute(&mut conn)
                .map_err(|e| DatabaseError::Connection(e.to_string()))?;
            Ok::<_, DatabaseError>(conn)
        })
        .await
        .map_err(|e| DatabaseError::Connection(format!("database task failed: {e}")))??;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: Arc::new(path.to_string()),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Runs a statement that reports the number of affected rows.
    pub async fn execute<F>(&self, op: F) -> Result<usize, DatabaseError>
    where
        F: FnOnce(&mut SqliteConnection) -> QueryResult<usize> + Send + 'static,
    {
        self.query(op).await
    }

    /// Runs `op` against the connection with the lock held for its whole duration.
    pub async fn query<F, T>(&self, op: F) -> Result<T, DatabaseError>
    where
        F: FnOnce(&mut SqliteConnection) -> QueryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = conn.lock();
            op(&mut *guard).map_err(|e| DatabaseError::Query(e.to_string()))
        })
        .await
        .map_err(|e| DatabaseError::Query(format!("database task failed: {e}")))?
    }
}
