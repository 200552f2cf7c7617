//! HTTP middleware for axum.
//!
//! This module contains middleware layers for cross-cutting concerns:
//!
//! - `auth` - Bearer token middleware and the `RequireAuth` extractor

pub mod auth;

pub use auth::{auth_middleware, AuthRejection, AuthState, RequireAuth};
