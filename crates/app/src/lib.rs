//! # usuarios-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **driven port** adapters must implement:
//!   - `UsuarioRepository` — list, save, delete for usuarios
//! - Define the **driving port** as a use-case struct:
//!   - `UsuarioService` — list all, create, delete by id
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `usuarios-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
