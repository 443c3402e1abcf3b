//! Axum router assembly.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, header};
use axum::routing::get;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use usuarios_app::ports::UsuarioRepository;

use crate::state::AppState;

/// Origin of the web client's development server.
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// Default maximum request body size, large enough for inline image payloads.
pub const DEFAULT_BODY_LIMIT: usize = 16 * 1024 * 1024;

/// Wildcard origin. Rejected: the API only answers explicitly listed origins.
pub const WILDCARD_ORIGIN: &str = "*";

/// Cross-cutting HTTP settings applied as router layers.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    /// Origins allowed to make cross-origin requests. Any other origin gets
    /// no CORS headers.
    pub cors_origins: Vec<String>,
    /// Maximum accepted request body, in bytes.
    pub body_limit: usize,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            cors_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

/// Build the top-level axum [`Router`].
///
/// Serves the API routes at the root plus `/health`, and applies
/// [`TraceLayer`] (requests logged at `DEBUG` via `tracing`), CORS and the
/// body size limit from `options`.
pub fn build<R>(state: AppState<R>, options: &HttpOptions) -> Router
where
    R: UsuarioRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .merge(crate::api::routes())
        .layer(DefaultBodyLimit::max(options.body_limit))
        .layer(cors_layer(&options.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            if origin == WILDCARD_ORIGIN {
                tracing::warn!("ignoring wildcard CORS origin, only explicit origins are allowed");
                return None;
            }
            match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(%origin, "ignoring invalid CORS origin");
                    None
                }
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use usuarios_app::services::usuario_service::UsuarioService;
    use usuarios_domain::error::UsuariosError;
    use usuarios_domain::id::UsuarioId;
    use usuarios_domain::usuario::Usuario;

    struct StubUsuarioRepo;
    struct DownUsuarioRepo;

    impl UsuarioRepository for StubUsuarioRepo {
        async fn find_all(&self) -> Result<Vec<Usuario>, UsuariosError> {
            Ok(vec![])
        }
        async fn save(&self, usuario: Usuario) -> Result<Usuario, UsuariosError> {
            Ok(usuario.with_id(UsuarioId::new(1)))
        }
        async fn delete_by_id(&self, _id: UsuarioId) -> Result<(), UsuariosError> {
            Ok(())
        }
    }

    impl UsuarioRepository for DownUsuarioRepo {
        async fn find_all(&self) -> Result<Vec<Usuario>, UsuariosError> {
            Err(UsuariosError::Storage(Box::new(std::io::Error::other(
                "connection refused",
            ))))
        }
        async fn save(&self, _usuario: Usuario) -> Result<Usuario, UsuariosError> {
            Err(UsuariosError::Storage(Box::new(std::io::Error::other(
                "connection refused",
            ))))
        }
        async fn delete_by_id(&self, _id: UsuarioId) -> Result<(), UsuariosError> {
            Err(UsuariosError::Storage(Box::new(std::io::Error::other(
                "connection refused",
            ))))
        }
    }

    fn app() -> Router {
        build(
            AppState::new(UsuarioService::new(StubUsuarioRepo)),
            &HttpOptions::default(),
        )
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_return_empty_array_when_listing_empty_store() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/usuarios")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn should_return_created_with_id_when_posting_valid_payload() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/usuarios")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"id":77,"nome":"Ana","dia":1}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["id"], 1);
        assert_eq!(body["nome"], "Ana");
        assert_eq!(body["mes"], 0);
    }

    #[tokio::test]
    async fn should_reject_malformed_json_with_client_error() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/usuarios")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn should_reject_wrong_field_types_with_unprocessable_entity() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/usuarios")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"dia":"primeiro"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn should_reject_missing_content_type() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/usuarios")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn should_return_no_content_when_deleting() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/usuarios/5")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn should_return_bad_request_when_id_is_not_an_integer() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/usuarios/abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"],
            "invalid usuario id: \"abc\""
        );
    }

    #[tokio::test]
    async fn should_return_method_not_allowed_for_unsupported_method() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/usuarios/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_route() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/pessoas")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_return_internal_error_when_storage_is_down() {
        let app = build(
            AppState::new(UsuarioService::new(DownUsuarioRepo)),
            &HttpOptions::default(),
        );

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/usuarios")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "internal server error");
    }

    #[tokio::test]
    async fn should_allow_configured_origin() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/usuarios")
                    .header("origin", DEFAULT_CORS_ORIGIN)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            DEFAULT_CORS_ORIGIN
        );
    }

    #[tokio::test]
    async fn should_answer_preflight_for_configured_origin() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/usuarios")
                    .header("origin", DEFAULT_CORS_ORIGIN)
                    .header("access-control-request-method", "POST")
                    .header("access-control-request-headers", "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            DEFAULT_CORS_ORIGIN
        );
    }

    #[tokio::test]
    async fn should_omit_cors_headers_for_other_origins() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/usuarios")
                    .header("origin", "http://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(
            response
                .headers()
                .get("access-control-allow-origin")
                .is_none()
        );
    }

    #[tokio::test]
    async fn should_drop_wildcard_origin_instead_of_allowing_everyone() {
        let options = HttpOptions {
            cors_origins: vec![WILDCARD_ORIGIN.to_string(), DEFAULT_CORS_ORIGIN.to_string()],
            ..HttpOptions::default()
        };
        let app = build(AppState::new(UsuarioService::new(StubUsuarioRepo)), &options);

        let other = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/usuarios")
                    .header("origin", "http://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(other.headers().get("access-control-allow-origin").is_none());

        let listed = app
            .oneshot(
                Request::builder()
                    .uri("/usuarios")
                    .header("origin", DEFAULT_CORS_ORIGIN)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            listed.headers().get("access-control-allow-origin").unwrap(),
            DEFAULT_CORS_ORIGIN
        );
    }

    #[tokio::test]
    async fn should_build_router_when_only_wildcard_is_configured() {
        let options = HttpOptions {
            cors_origins: vec![WILDCARD_ORIGIN.to_string()],
            ..HttpOptions::default()
        };
        let app = build(AppState::new(UsuarioService::new(StubUsuarioRepo)), &options);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("origin", "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .headers()
                .get("access-control-allow-origin")
                .is_none()
        );
    }

    #[tokio::test]
    async fn should_reject_body_over_configured_limit() {
        let options = HttpOptions {
            body_limit: 64,
            ..HttpOptions::default()
        };
        let app = build(AppState::new(UsuarioService::new(StubUsuarioRepo)), &options);
        let payload = format!(r#"{{"urlDaImagem":"{}"}}"#, "A".repeat(256));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/usuarios")
                    .header("content-type", "application/json")
                    .body(Body::from(payload))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
