//! Assembles the full HTTP surface.
//!
//! ```text
//! GET    /health        public
//! POST   /token         public, form login
//! GET    /stacks        bearer
//! POST   /stacks        bearer
//! DELETE /stacks/:id    bearer
//! ```

use std::sync::Arc;

use axum::{http::HeaderValue, middleware, Router};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::application::handlers::{
    CreateStackHandler, IssueTokenHandler, ListStacksHandler, RemoveStackHandler,
};
use crate::ports::{Provisioner, SessionValidator, TokenIssuer};

use super::auth::{auth_routes, AuthAppState};
use super::health::health_routes;
use super::middleware::{auth_middleware, AuthState};
use super::stacks::{stack_routes, StacksAppState};

/// Port implementations the router is wired against.
#[derive(Clone)]
pub struct AppServices {
    pub token_issuer: Arc<dyn TokenIssuer>,
    pub session_validator: Arc<dyn SessionValidator>,
    pub provisioner: Arc<dyn Provisioner>,
}

/// Builds the application router.
///
/// `cors_origins` empty means any origin is allowed.
pub fn app_router(services: AppServices, cors_origins: &[String]) -> Router {
    let auth_state = AuthAppState::new(Arc::new(IssueTokenHandler::new(
        services.token_issuer.clone(),
    )));

    let stacks_state = StacksAppState::new(
        Arc::new(ListStacksHandler::new(services.provisioner.clone())),
        Arc::new(CreateStackHandler::new(services.provisioner.clone())),
        Arc::new(RemoveStackHandler::new(services.provisioner.clone())),
    );

    let validator: AuthState = services.session_validator;
    let stacks = stack_routes(stacks_state)
        .layer(middleware::from_fn_with_state(validator, auth_middleware));

    Router::new()
        .merge(health_routes())
        .merge(auth_routes(auth_state))
        .merge(stacks)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}
