//! HTTP adapter for the token endpoint.

mod dto;
mod handlers;
mod routes;

pub use dto::{TokenForm, TokenResponse};
pub use handlers::AuthAppState;
pub use routes::auth_routes;
