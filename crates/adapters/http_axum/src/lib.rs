//! # usuarios-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the JSON API (`GET`/`POST /usuarios`, `DELETE /usuarios/{id}`)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and failures into HTTP responses
//! - Apply cross-cutting layers: request tracing, CORS, body size limit
//!
//! ## Dependency rule
//! Depends on `usuarios-app` (for port traits and services) and `usuarios-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
