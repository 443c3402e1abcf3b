//! Storage port — repository trait for persisting usuarios.

use std::future::Future;

use usuarios_domain::error::UsuariosError;
use usuarios_domain::id::UsuarioId;
use usuarios_domain::usuario::Usuario;

/// Persistence operations over [`Usuario`] records.
///
/// Every method maps to a single storage statement; implementations must not
/// add validation or business rules.
pub trait UsuarioRepository {
    /// Return every stored record. Order is implementation-defined.
    fn find_all(&self) -> impl Future<Output = Result<Vec<Usuario>, UsuariosError>> + Send;

    /// Insert the record when `id` is `None`, otherwise insert-or-update by id.
    ///
    /// Returns the stored record, always carrying an id.
    fn save(&self, usuario: Usuario) -> impl Future<Output = Result<Usuario, UsuariosError>> + Send;

    /// Remove the record with `id`. Succeeds without effect when it does not exist.
    fn delete_by_id(&self, id: UsuarioId) -> impl Future<Output = Result<(), UsuariosError>> + Send;
}
