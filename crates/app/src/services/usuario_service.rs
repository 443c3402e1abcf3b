//! Usuario service — use-cases for managing usuarios.

use usuarios_domain::error::UsuariosError;
use usuarios_domain::id::UsuarioId;
use usuarios_domain::usuario::Usuario;

use crate::ports::UsuarioRepository;

/// Application service for usuario list/create/delete.
///
/// Calls are forwarded to the repository without transformation.
pub struct UsuarioService<R> {
    repo: R,
}

impl<R: UsuarioRepository> UsuarioService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// List all usuarios.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_all(&self) -> Result<Vec<Usuario>, UsuariosError> {
        let usuarios = self.repo.find_all().await?;
        tracing::debug!(count = usuarios.len(), "listed usuarios");
        Ok(usuarios)
    }

    /// Store a new usuario and return it with its assigned id.
    ///
    /// Any id supplied by the caller is discarded so storage always issues a
    /// fresh one.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn create(&self, usuario: Usuario) -> Result<Usuario, UsuariosError> {
        if let Some(ignored) = usuario.id {
            tracing::debug!(%ignored, "discarding client supplied id");
        }
        let created = self.repo.save(usuario.without_id()).await?;
        tracing::info!(id = ?created.id, "usuario created");
        Ok(created)
    }

    /// Delete a usuario by id. Deleting a missing id is not an error.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn delete_by_id(&self, id: UsuarioId) -> Result<(), UsuariosError> {
        self.repo.delete_by_id(id).await?;
        tracing::info!(%id, "usuario deleted");
        Ok(())
    }
}
