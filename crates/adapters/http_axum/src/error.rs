//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use usuarios_domain::error::UsuariosError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Failures an API handler can return.
pub enum ApiError {
    /// Error raised by the application or domain layer.
    Domain(UsuariosError),
    /// Request body was not valid JSON for the expected shape.
    Payload(JsonRejection),
}

impl From<UsuariosError> for ApiError {
    fn from(err: UsuariosError) -> Self {
        Self::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        Self::Payload(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Domain(UsuariosError::Validation(err)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::Domain(UsuariosError::Storage(err)) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            Self::Payload(rejection) => {
                tracing::debug!(error = %rejection, "rejected request body");
                (rejection.status(), rejection.body_text())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
