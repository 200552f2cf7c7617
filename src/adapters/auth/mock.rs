//! Mock authentication adapter for testing.
//!
//! Implements the `SessionValidator` port without signing anything, so HTTP
//! and handler tests can exercise authenticated routes with fixed tokens.
//!
//! # Example
//!
//! ```ignore
//! use lightstack_api::adapters::auth::MockSessionValidator;
//!
//! let validator = MockSessionValidator::new().with_user("valid-token", "admin");
//! let result = validator.validate("valid-token").await;
//! assert!(result.is_ok());
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

/// Mock session validator for testing.
///
/// Stores a map of tokens to users. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    /// Map of valid tokens to their associated users
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Optional error to return for all validations (for error testing)
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    /// Creates a new empty mock validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a username.
    pub fn with_user(self, token: impl Into<String>, username: impl Into<String>) -> Self {
        self.tokens
            .write()
            .unwrap()
            .insert(token.into(), AuthenticatedUser::new(username));
        self
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_user_for_registered_token() {
        let validator = MockSessionValidator::new().with_user("t", "admin");
        assert_eq!(validator.validate("t").await.unwrap().username, "admin");
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let validator = MockSessionValidator::new().with_user("t", "admin");
        assert_eq!(validator.validate("u").await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn forced_error_wins() {
        let validator = MockSessionValidator::new()
            .with_user("t", "admin")
            .with_error(AuthError::TokenExpired);
        assert_eq!(validator.validate("t").await, Err(AuthError::TokenExpired));
    }
}
