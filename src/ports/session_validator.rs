//! Session validation port for bearer token verification.
//!
//! HTTP middleware uses this to turn a bearer token into an
//! `AuthenticatedUser` before any stack operation may run.
//!
//! # Security Requirements
//!
//! All implementations MUST validate:
//! - **Signature**: against the configured secret and the fixed algorithm
//! - **Expiry (exp)**: the token is dead the instant `exp` passes (no leeway)
//! - **Subject (sub)**: must name an operator known to the credential store

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts operator identity.
///
/// # Contract
///
/// Implementations must:
/// - Return `AuthError::InvalidToken` for malformed/bad signature tokens
/// - Return `AuthError::TokenExpired` for expired tokens
/// - Return `AuthError::UnknownSubject` when `sub` is not a known operator
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw token (without "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
