//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Values written by the installer before an operator changes them.
const INSTALLER_DEFAULT_SECRET: &str = "your-secret-key";
const INSTALLER_DEFAULT_PASSWORD: &str = "adminpassword";

/// Authentication configuration (HS256 bearer tokens, single operator)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC signing secret for session tokens
    pub jwt_secret: SecretString,

    /// Lifetime of an issued token in minutes
    #[serde(default = "default_token_expiry")]
    pub token_expiry_minutes: u64,

    /// Operator username
    #[serde(default = "default_username")]
    pub username: String,

    /// Operator password
    pub password: SecretString,
}

impl AuthConfig {
    /// Get token lifetime as Duration
    pub fn token_expiry(&self) -> Duration {
        Duration::from_secs(self.token_expiry_minutes * 60)
    }

    /// Validate authentication configuration
    ///
    /// In production, rejects short secrets and the installer's placeholder
    /// credentials.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        let password = self.password.expose_secret();

        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("JWT_SECRET"));
        }
        if password.is_empty() {
            return Err(ValidationError::MissingRequired("PASSWORD"));
        }
        if self.username.is_empty() || self.username.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidUsername);
        }
        if self.token_expiry_minutes == 0 || self.token_expiry_minutes > 1440 {
            return Err(ValidationError::InvalidTokenExpiry);
        }

        if *environment == Environment::Production {
            if secret == INSTALLER_DEFAULT_SECRET || password == INSTALLER_DEFAULT_PASSWORD {
                return Err(ValidationError::DefaultCredentialsInProduction);
            }
            if secret.len() < 32 {
                return Err(ValidationError::WeakJwtSecret);
            }
        }

        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: SecretString::new(String::new()),
            token_expiry_minutes: default_token_expiry(),
            username: default_username(),
            password: SecretString::new(String::new()),
        }
    }
}

fn default_token_expiry() -> u64 {
    30
}

fn default_username() -> String {
    "admin".to_string()
}
