//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - JWT session tokens (and a mock validator)
//! - `provisioner` - The provisioner executable as a child process
//! - `http` - axum REST surface

pub mod auth;
pub mod http;
pub mod provisioner;

pub use http::{app_router, AppServices};
