//! Opening the `SQLite` database and bringing its schema up to date.

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::StorageError;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// How long a statement waits on a locked database file before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// An open, migrated `SQLite` database.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open `database_url`, creating the file if needed, and apply pending
    /// migrations.
    ///
    /// Accepts any `sqlx` `SQLite` URL, e.g. `sqlite:usuarios.db?mode=rwc` or
    /// `sqlite::memory:`. An in-memory database is kept alive for as long as
    /// the returned value is.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Url`] for a malformed URL,
    /// [`StorageError::Connect`] if the file cannot be opened and
    /// [`StorageError::Migrate`] if the schema cannot be brought up to date.
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let connect_options = SqliteConnectOptions::from_str(database_url)
            .map_err(|source| StorageError::Url {
                url: database_url.to_string(),
                source,
            })?
            .create_if_missing(true)
            .busy_timeout(BUSY_TIMEOUT);

        let in_memory = is_in_memory(database_url);
        let pool = pool_options(in_memory)
            .connect_with(connect_options)
            .await
            .map_err(StorageError::Connect)?;

        MIGRATOR.run(&pool).await?;
        tracing::debug!(in_memory, "database ready");

        Ok(Self { pool })
    }

    /// Borrow the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Wait for checked-out connections to return, then close them all.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// An in-memory database is dropped with its last connection, so the pool
/// must never let its connections idle out or expire.
fn pool_options(in_memory: bool) -> SqlitePoolOptions {
    let options = SqlitePoolOptions::new();
    if in_memory {
        options
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        options
    }
}
