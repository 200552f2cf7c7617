//! HTTP adapter for stack endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreateStackRequest, RemoveStackResponse};
pub use handlers::StacksAppState;
pub use routes::stack_routes;
