//! Database layer for the task store.

pub mod tasks;

use anyhow::{Result, anyhow};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Database handle wrapping a single SQLite connection.
///
/// Clones share the same connection; statements run one at a time.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create the database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "PRAGMA journal_mode=WAL;
             PRAGMA busy_timeout=5000;",
        )?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.run_migrations()?;
        info!(path = %path.display(), "Database opened");

        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.run_migrations()?;

        Ok(db)
    }

    fn run_migrations(&self) -> Result<()> {
        self.with_conn_mut(|conn| {
            let report = embedded::migrations::runner().run(conn)?;
            debug!(
                applied = report.applied_migrations().len(),
                "Migrations complete"
            );
            Ok(())
        })
    }

    /// Execute a function with exclusive access to the connection.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|_| anyhow!("database connection lock poisoned"))?;
        f(&conn)
    }

    /// Execute a function with mutable access to the connection.
    pub fn with_conn_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        let mut conn = self
            .conn
            .lock()
            .map_err(|_| anyhow!("database connection lock poisoned"))?;
        f(&mut conn)
    }

    /// Close the connection.
    ///
    /// Fails if other handles to the same connection are still alive.
    pub fn close(self) -> Result<()> {
        let mutex = Arc::try_unwrap(self.conn)
            .map_err(|_| anyhow!("database is still in use and cannot be closed"))?;
        let conn = mutex
            .into_inner()
            .map_err(|_| anyhow!("database connection lock poisoned"))?;
        conn.close().map_err(|(_, e)| anyhow!(e))?;
        info!("Database closed");
        Ok(())
    }
}

/// Get the current timestamp in milliseconds.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
