//! HS256 JWT adapter for the access gate.
//!
//! Implements both `TokenIssuer` and `SessionValidator` over a single
//! signing secret, so whatever this adapter issues it will also accept until
//! the token expires. Nothing is stored server-side; there is no revocation.
//!
//! # Security
//!
//! - Signature checked with the configured secret, algorithm pinned to HS256
//! - Expiry checked with zero leeway
//! - Subject must still be present in the credential store
//! - Passwords compared in constant time
//!
//! # Example
//!
//! ```ignore
//! use lightstack_api::adapters::auth::JwtSessionService;
//!
//! let service = JwtSessionService::from_config(&config.auth);
//! let token = service.issue("admin", "s3cret").await?;
//! let user = service.validate(&token.access_token).await?;
//! ```

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::config::AuthConfig;
use crate::domain::foundation::{AuthError, AuthenticatedUser, Timestamp};
use crate::ports::{IssuedToken, SessionValidator, TokenIssuer};

/// Algorithm used for every token; never taken from the token header.
const ALGORITHM: Algorithm = Algorithm::HS256;

/// Claims carried by a session token.
#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    /// Operator username
    sub: String,
    /// Issued at (Unix seconds)
    iat: i64,
    /// Expiry (Unix seconds)
    exp: i64,
}

/// Read-only username → password map, resolved once at startup.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    operators: HashMap<String, SecretString>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an operator.
    pub fn with_operator(mut self, username: impl Into<String>, password: SecretString) -> Self {
        self.operators.insert(username.into(), password);
        self
    }

    pub fn contains(&self, username: &str) -> bool {
        self.operators.contains_key(username)
    }

    /// Checks a username/password pair.
    ///
    /// Unknown users are compared against an empty secret so both failure
    /// paths do the same amount of work.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let (known, expected) = match self.operators.get(username) {
            Some(secret) => (true, secret.expose_secret().as_bytes()),
            None => (false, &[][..]),
        };
        let matches: bool = expected.ct_eq(password.as_bytes()).into();
        known && matches
    }
}

/// Issues and validates HS256 session tokens.
pub struct JwtSessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
    credentials: CredentialStore,
}

impl JwtSessionService {
    pub fn new(secret: &SecretString, token_ttl: Duration, credentials: CredentialStore) -> Self {
        let key = secret.expose_secret().as_bytes();

        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(key),
            decoding_key: DecodingKey::from_secret(key),
            validation,
            token_ttl,
            credentials,
        }
    }

    /// Builds the service from the auth section, with the configured operator
    /// as the only known user.
    pub fn from_config(config: &AuthConfig) -> Self {
        let credentials =
            CredentialStore::new().with_operator(config.username.clone(), config.password.clone());
        Self::new(&config.jwt_secret, config.token_expiry(), credentials)
    }
}

#[async_trait]
impl TokenIssuer for JwtSessionService {
    async fn issue(&self, username: &str, password: &str) -> Result<IssuedToken, AuthError> {
        if !self.credentials.verify(username, password) {
            return Err(AuthError::InvalidCredentials);
        }

        let issued_at = Timestamp::now();
        let expires_at = issued_at
            .checked_add(self.token_ttl)
            .ok_or_else(|| AuthError::issuance("token lifetime is out of range"))?;
        let claims = SessionClaims {
            sub: username.to_string(),
            iat: issued_at.as_unix_secs(),
            exp: expires_at.as_unix_secs(),
        };

        let access_token = encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| AuthError::issuance(e.to_string()))?;

        tracing::debug!(username, expires_at = %expires_at.as_datetime(), "issued session token");

        Ok(IssuedToken {
            access_token,
            expires_at,
        })
    }
}

#[async_trait]
impl SessionValidator for JwtSessionService {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            },
        )?;

        let username = data.claims.sub;
        if !self.credentials.contains(&username) {
            return Err(AuthError::UnknownSubject);
        }

        Ok(AuthenticatedUser::new(username))
    }
}
