use rusqlite::Connection;
use std::path::Path;
use tokio::task;
use crate::error::{KingraphError, Result};

/// Database connection wrapper
pub struct Db {
    path: std::path::PathBuf,
}

impl Db {
    /// Create a new database connection manager
    pub fn new<P: AsRef<Path>>(db_path: P) -> Self {
        Self {
            path: db_path.as_ref().to_path_buf(),
        }
    }

    /// Open a new database connection with the pragmas this service relies on:
    /// WAL for concurrent readers, NORMAL sync, and enforced foreign keys
    /// between relation rows and person rows.
    pub fn open_connection(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)
            .map_err(KingraphError::Database)?;
        set_pragmas(&conn)?;
        Ok(conn)
    }

    /// Execute a closure with a database connection in a blocking task
    pub async fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let path = self.path.clone();
        task::spawn_blocking(move || {
            let mut conn = Connection::open(&path)
                .map_err(KingraphError::Database)?;
            set_pragmas(&conn)?;
            f(&mut conn)
        })
        .await
        .map_err(|e| {
            KingraphError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("blocking database task failed: {}", e),
            ))
        })?
    }
}

fn set_pragmas(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL; \
         PRAGMA synchronous = NORMAL; \
         PRAGMA foreign_keys = ON; \
         PRAGMA temp_store = MEMORY;",
    )?;
    Ok(())
}

pub mod migrate;
