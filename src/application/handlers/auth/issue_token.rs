//! IssueTokenHandler - Exchanges operator credentials for a session token.

use std::sync::Arc;

use crate::domain::foundation::AuthError;
use crate::ports::{IssuedToken, TokenIssuer};

/// Command carrying the submitted login form.
#[derive(Debug, Clone)]
pub struct IssueTokenCommand {
    pub username: String,
    pub password: String,
}

/// Handler for the token endpoint.
pub struct IssueTokenHandler {
    issuer: Arc<dyn TokenIssuer>,
}

impl IssueTokenHandler {
    pub fn new(issuer: Arc<dyn TokenIssuer>) -> Self {
        Self { issuer }
    }

    pub async fn handle(&self, cmd: IssueTokenCommand) -> Result<IssuedToken, AuthError> {
        match self.issuer.issue(&cmd.username, &cmd.password).await {
            Ok(token) => {
                tracing::info!(username = %cmd.username, "operator logged in");
                Ok(token)
            }
            Err(e) => {
                tracing::debug!(username = %cmd.username, reason = %e, "login rejected");
                Err(e)
            }
        }
    }
}
