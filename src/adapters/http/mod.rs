//! HTTP adapters - REST API implementations.
//!
//! Each concern has its own module for endpoint exposure; `router` wires
//! them together behind the shared CORS and trace layers.

pub mod auth;
pub mod error;
pub mod health;
pub mod middleware;
pub mod router;
pub mod stacks;

// Re-export key types for convenience
pub use error::ErrorResponse;
pub use router::{app_router, AppServices};
