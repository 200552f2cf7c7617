//! Token issuer port - exchanges operator credentials for a session token.
//!
//! The counterpart of `SessionValidator`: whatever this issues, the validator
//! of the same adapter must accept until the token's expiry.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, Timestamp};

/// A freshly minted bearer credential.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_at: Timestamp,
}

impl IssuedToken {
    /// Token scheme reported to clients.
    pub const TOKEN_TYPE: &'static str = "bearer";
}

/// Checks username/password and issues time-bounded tokens.
///
/// # Contract
///
/// Implementations must:
/// - Return `AuthError::InvalidCredentials` for an unknown user *and* for a
///   wrong password, without distinguishing the two
/// - Return `AuthError::Issuance` only for server-side signing failures
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    async fn issue(&self, username: &str, password: &str) -> Result<IssuedToken, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedIssuer;

    #[async_trait]
    impl TokenIssuer for FixedIssuer {
        async fn issue(&self, username: &str, password: &str) -> Result<IssuedToken, AuthError> {
            if username == "admin" && password == "secret" {
                Ok(IssuedToken {
                    access_token: "token".to_string(),
                    expires_at: Timestamp::now()
                        .checked_add(std::time::Duration::from_secs(30 * 60))
                        .unwrap(),
                })
            } else {
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    #[tokio::test]
    async fn issuer_returns_token_for_matching_credentials() {
        let token = FixedIssuer.issue("admin", "secret").await.unwrap();
        assert_eq!(token.access_token, "token");
        assert!(token.expires_at > Timestamp::now());
    }

    #[tokio::test]
    async fn issuer_rejects_wrong_password() {
        let result = FixedIssuer.issue("admin", "nope").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[test]
    fn token_type_is_bearer() {
        assert_eq!(IssuedToken::TOKEN_TYPE, "bearer");
    }
}
