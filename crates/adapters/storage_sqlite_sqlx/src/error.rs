//! Failures of the `SQLite` adapter, split by the stage that produced them.

use usuarios_domain::error::UsuariosError;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The connection URL could not be turned into connect options.
    #[error("invalid database url {url:?}")]
    Url {
        url: String,
        #[source]
        source: sqlx::Error,
    },

    /// The database file could not be opened or created.
    #[error("failed to open database")]
    Connect(#[source] sqlx::Error),

    #[error("failed to apply schema migrations")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// A statement against an open database failed.
    #[error("query failed")]
    Query(#[from] sqlx::Error),
}

impl From<StorageError> for UsuariosError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
