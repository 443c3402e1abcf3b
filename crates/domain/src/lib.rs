//! # usuarios-domain
//!
//! Pure domain model for the usuarios backend.
//!
//! ## Responsibilities
//! - Foundational types: the integer [`UsuarioId`](id::UsuarioId) and error conventions
//! - Define the **Usuario** record (name, day/month/year, priority, image, description)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod usuario;
