//! Request and response shapes of `POST /token`.

use serde::{Deserialize, Serialize};

use crate::application::handlers::auth::IssueTokenCommand;
use crate::ports::IssuedToken;

/// Form-encoded login (`username=...&password=...`).
#[derive(Deserialize)]
pub struct TokenForm {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for TokenForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenForm")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl From<TokenForm> for IssueTokenCommand {
    fn from(form: TokenForm) -> Self {
        IssueTokenCommand {
            username: form.username,
            password: form.password,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl From<IssuedToken> for TokenResponse {
    fn from(token: IssuedToken) -> Self {
        Self {
            access_token: token.access_token,
            token_type: IssuedToken::TOKEN_TYPE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    #[test]
    fn token_response_reports_bearer_type() {
        let response = TokenResponse::from(IssuedToken {
            access_token: "abc".to_string(),
            expires_at: Timestamp::now(),
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"access_token": "abc", "token_type": "bearer"})
        );
    }

    #[test]
    fn debug_output_hides_password() {
        let form = TokenForm {
            username: "admin".to_string(),
            password: "hunter2".to_string(),
        };
        let printed = format!("{:?}", form);
        assert!(printed.contains("admin"));
        assert!(!printed.contains("hunter2"));
    }
}
