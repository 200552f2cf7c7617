//! HTTP handler for the token endpoint.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};

use crate::adapters::http::error::{unauthorized_response, ErrorResponse};
use crate::application::handlers::auth::IssueTokenHandler;
use crate::domain::foundation::AuthError;

use super::dto::{TokenForm, TokenResponse};

#[derive(Clone)]
pub struct AuthAppState {
    issue_handler: Arc<IssueTokenHandler>,
}

impl AuthAppState {
    pub fn new(issue_handler: Arc<IssueTokenHandler>) -> Self {
        Self { issue_handler }
    }
}

/// POST /token - Exchange operator credentials for a bearer token
pub async fn issue_token(
    State(state): State<AuthAppState>,
    Form(form): Form<TokenForm>,
) -> Response {
    match state.issue_handler.handle(form.into()).await {
        Ok(token) => (StatusCode::OK, Json(TokenResponse::from(token))).into_response(),
        Err(e) => handle_auth_error(e),
    }
}

fn handle_auth_error(error: AuthError) -> Response {
    if error.is_denial() {
        return unauthorized_response();
    }

    tracing::error!(%error, "token issuance failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::internal("Token issuance failed")),
    )
        .into_response()
}
