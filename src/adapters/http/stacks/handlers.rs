//! HTTP handlers for stack endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::stack::{
    CreateStackCommand, CreateStackHandler, ListStacksHandler, ListStacksQuery,
    RemoveStackCommand, RemoveStackHandler,
};
use crate::domain::stack::{StackError, StackId};

use super::dto::{CreateStackRequest, RemoveStackResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct StacksAppState {
    list_handler: Arc<ListStacksHandler>,
    create_handler: Arc<CreateStackHandler>,
    remove_handler: Arc<RemoveStackHandler>,
}

impl StacksAppState {
    pub fn new(
        list_handler: Arc<ListStacksHandler>,
        create_handler: Arc<CreateStackHandler>,
        remove_handler: Arc<RemoveStackHandler>,
    ) -> Self {
        Self {
            list_handler,
            create_handler,
            remove_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /stacks - List every provisioned stack
pub async fn list_stacks(
    State(state): State<StacksAppState>,
    RequireAuth(operator): RequireAuth,
) -> Response {
    match state.list_handler.handle(ListStacksQuery { operator }).await {
        Ok(stacks) => (StatusCode::OK, Json(stacks)).into_response(),
        Err(e) => handle_stack_error(e),
    }
}

/// POST /stacks - Provision a new stack
pub async fn create_stack(
    State(state): State<StacksAppState>,
    RequireAuth(operator): RequireAuth,
    body: Result<Json<CreateStackRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return (
                rejection.status(),
                Json(ErrorResponse::new("INVALID_BODY", rejection.body_text())),
            )
                .into_response()
        }
    };

    let cmd = CreateStackCommand {
        operator,
        spec: req.into(),
    };

    match state.create_handler.handle(cmd).await {
        Ok(stack) => (StatusCode::OK, Json(stack)).into_response(),
        Err(e) => handle_stack_error(e),
    }
}

/// DELETE /stacks/:id - Tear a stack down
pub async fn remove_stack(
    State(state): State<StacksAppState>,
    RequireAuth(operator): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let id = match StackId::new(id) {
        Ok(id) => id,
        Err(e) => return handle_stack_error(StackError::InvalidRequest(e)),
    };

    match state
        .remove_handler
        .handle(RemoveStackCommand { operator, id })
        .await
    {
        Ok(removed) => (StatusCode::OK, Json(RemoveStackResponse::from(removed))).into_response(),
        Err(e) => handle_stack_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_stack_error(error: StackError) -> Response {
    if !error.is_client_error() {
        tracing::error!(%error, "stack operation failed");
    }

    let (status, body) = match &error {
        StackError::InvalidRequest(validation) => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::new("VALIDATION_FAILED", validation.to_string())
                .with_details(json!({ "field": validation.field() })),
        ),
        StackError::Infrastructure(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new("PROVISIONER_UNAVAILABLE", error.to_string()),
        ),
        StackError::TimedOut { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new("PROVISIONER_TIMEOUT", error.to_string()),
        ),
        StackError::ProvisioningFailed {
            subcommand,
            exit_code,
            stderr,
        } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new("PROVISIONING_FAILED", stderr.clone())
                .with_details(json!({ "subcommand": subcommand, "exit_code": exit_code })),
        ),
        StackError::OutputParsing(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new("OUTPUT_PARSING_FAILED", error.to_string()),
        ),
    };

    (status, Json(body)).into_response()
}
