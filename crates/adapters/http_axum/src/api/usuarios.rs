//! JSON REST handlers for usuarios.

use std::str::FromStr;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use usuarios_app::ports::UsuarioRepository;
use usuarios_domain::error::{UsuariosError, ValidationError};
use usuarios_domain::id::UsuarioId;
use usuarios_domain::usuario::Usuario;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Usuario>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Usuario>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /usuarios`
pub async fn list<R>(State(state): State<AppState<R>>) -> Result<ListResponse, ApiError>
where
    R: UsuarioRepository + Send + Sync + 'static,
{
    let usuarios = state.usuario_service.list_all().await?;
    Ok(ListResponse::Ok(Json(usuarios)))
}

/// `POST /usuarios`
pub async fn create<R>(
    State(state): State<AppState<R>>,
    payload: Result<Json<Usuario>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    R: UsuarioRepository + Send + Sync + 'static,
{
    let Json(usuario) = payload?;
    let created = state.usuario_service.create(usuario).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `DELETE /usuarios/:id`
pub async fn delete<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    R: UsuarioRepository + Send + Sync + 'static,
{
    let usuario_id = UsuarioId::from_str(&id)
        .map_err(|_| UsuariosError::from(ValidationError::InvalidId(id)))?;
    state.usuario_service.delete_by_id(usuario_id).await?;
    Ok(DeleteResponse::NoContent)
}
