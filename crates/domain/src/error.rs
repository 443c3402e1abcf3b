//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`UsuariosError`] via `From`.

/// Top-level error returned by application services and ports.
#[derive(Debug, thiserror::Error)]
pub enum UsuariosError {
    /// Input could not be interpreted as a domain value.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The storage backend failed or is unavailable.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Reasons a value is rejected before reaching storage.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A path or query parameter is not a valid [`UsuarioId`](crate::id::UsuarioId).
    #[error("invalid usuario id: {0:?}")]
    InvalidId(String),
}
