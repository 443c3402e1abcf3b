//! Shared application state for axum handlers.

use std::sync::Arc;

use usuarios_app::ports::UsuarioRepository;
use usuarios_app::services::usuario_service::UsuarioService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository type to avoid dynamic dispatch.
/// `Clone` is implemented manually so the repository itself does not need to
/// be `Clone`; only the `Arc` wrapper is cloned.
pub struct AppState<R> {
    /// Usuario list/create/delete service.
    pub usuario_service: Arc<UsuarioService<R>>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            usuario_service: Arc::clone(&self.usuario_service),
        }
    }
}

impl<R> AppState<R>
where
    R: UsuarioRepository + Send + Sync + 'static,
{
    /// Create a new application state from a service instance.
    pub fn new(usuario_service: UsuarioService<R>) -> Self {
        Self {
            usuario_service: Arc::new(usuario_service),
        }
    }
}
