//! Authentication types for the domain layer.
//!
//! These types represent an operator who has passed the access gate. They
//! have **no external dependencies** - the JWT adapter populates them via the
//! `SessionValidator` port, and the orchestration handlers require one before
//! they will drive the provisioner.
//!
//! # Design Decisions
//!
//! - `AuthenticatedUser` carries only the username bound into the credential
//! - `AuthError` keeps the precise failure reason for logging, but the HTTP
//!   edge collapses every variant into the same 401 response

use thiserror::Error;

/// Operator identity extracted from a validated session credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The username the credential was issued to.
    pub username: String,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    ///
    /// This is typically called by the `SessionValidator` adapter after
    /// successfully validating a token.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// Authentication errors raised by the access gate.
///
/// Callers must never see which variant occurred; the variants exist so the
/// server can log the real cause.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Username/password pair did not match the credential store.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid token")]
    InvalidToken,

    /// The token signature is valid but its expiry has elapsed.
    #[error("Token expired")]
    TokenExpired,

    /// The token names a subject that is not a known operator.
    #[error("Unknown subject")]
    UnknownSubject,

    /// A credential could not be produced (signing failure).
    #[error("Token issuance failed: {0}")]
    Issuance(String),
}

impl AuthError {
    /// Creates an issuance error with a message.
    pub fn issuance(message: impl Into<String>) -> Self {
        Self::Issuance(message.into())
    }

    /// Returns true if the caller supplied something we rejected, as opposed
    /// to the server failing to mint a credential.
    pub fn is_denial(&self) -> bool {
        !matches!(self, AuthError::Issuance(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticated_user_new_keeps_username() {
        let user = AuthenticatedUser::new("admin");
        assert_eq!(user.username, "admin");
    }

    #[test]
    fn auth_error_invalid_token_displays_correctly() {
        assert_eq!(format!("{}", AuthError::InvalidToken), "Invalid token");
    }

    #[test]
    fn auth_error_issuance_displays_message() {
        let err = AuthError::issuance("bad key");
        assert_eq!(format!("{}", err), "Token issuance failed: bad key");
    }

    #[test]
    fn auth_error_denials_exclude_issuance_failures() {
        assert!(AuthError::InvalidCredentials.is_denial());
        assert!(AuthError::InvalidToken.is_denial());
        assert!(AuthError::TokenExpired.is_denial());
        assert!(AuthError::UnknownSubject.is_denial());
        assert!(!AuthError::issuance("x").is_denial());
    }
}
