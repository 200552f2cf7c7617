//! HTTP routes for stack endpoints.

use axum::{
    routing::{delete, get},
    Router,
};

use super::handlers::{create_stack, list_stacks, remove_stack, StacksAppState};

/// Creates the stack router. Every route requires an authenticated operator.
pub fn stack_routes(state: StacksAppState) -> Router {
    Router::new()
        .route("/stacks", get(list_stacks).post(create_stack))
        .route("/stacks/:id", delete(remove_stack))
        .with_state(state)
}
