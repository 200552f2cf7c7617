//! HTTP routes for the token endpoint.

use axum::{routing::post, Router};

use super::handlers::{issue_token, AuthAppState};

/// Creates the router serving `POST /token`.
pub fn auth_routes(state: AuthAppState) -> Router {
    Router::new()
        .route("/token", post(issue_token))
        .with_state(state)
}
