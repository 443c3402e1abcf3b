//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod usuarios;

use axum::Router;
use axum::routing::{delete, get};

use usuarios_app::ports::UsuarioRepository;

use crate::state::AppState;

/// Build the API router.
pub fn routes<R>() -> Router<AppState<R>>
where
    R: UsuarioRepository + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/usuarios",
            get(usuarios::list::<R>).post(usuarios::create::<R>),
        )
        .route("/usuarios/{id}", delete(usuarios::delete::<R>))
}
