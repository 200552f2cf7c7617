//! Stack value objects: identifiers, directory records and creation requests.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{ensure_single_token, ValidationError};

/// Opaque identifier assigned by the provisioner when a stack is created.
///
/// The orchestration layer never interprets it beyond requiring that it fits
/// in a single token of the provisioner's line protocol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StackId(String);

impl StackId {
    /// Creates a StackId, rejecting empty values and values with whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        ensure_single_token("id", &value)?;
        Ok(Self(value))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A provisioned payment daemon + wallet service pair, as reported by the
/// provisioner's directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stack {
    pub id: StackId,
    pub payment_domain: String,
    pub wallet_domain: String,
}

impl Stack {
    pub fn new(
        id: StackId,
        payment_domain: impl Into<String>,
        wallet_domain: impl Into<String>,
    ) -> Self {
        Self {
            id,
            payment_domain: payment_domain.into(),
            wallet_domain: wallet_domain.into(),
        }
    }
}

/// Everything the provisioner asks for when adding a stack.
///
/// Certificate mode, database backend and contact email are inputs only; the
/// directory never reports them back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackSpec {
    pub payment_domain: String,
    pub wallet_domain: String,
    pub use_real_certificates: bool,
    pub use_external_database: bool,
    pub contact_email: Option<String>,
}

impl StackSpec {
    /// Validates the request before it is turned into provisioner answers.
    ///
    /// Every value becomes one stdin line, so line breaks (or any whitespace)
    /// would shift the positional protocol and are rejected outright.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_single_token("payment_domain", &self.payment_domain)?;
        ensure_single_token("wallet_domain", &self.wallet_domain)?;

        if self.payment_domain.eq_ignore_ascii_case(&self.wallet_domain) {
            return Err(ValidationError::invalid_format(
                "wallet_domain",
                "must differ from payment_domain",
            ));
        }

        if self.use_real_certificates {
            let email = self
                .contact_email
                .as_deref()
                .ok_or_else(|| ValidationError::empty_field("contact_email"))?;
            ensure_single_token("contact_email", email)?;
            if !email.contains('@') {
                return Err(ValidationError::invalid_format(
                    "contact_email",
                    "missing @ symbol",
                ));
            }
        }

        Ok(())
    }

    /// The contact email the provisioner should receive: only meaningful in
    /// real-certificate mode, ignored otherwise.
    pub fn effective_contact_email(&self) -> Option<&str> {
        if self.use_real_certificates {
            self.contact_email.as_deref()
        } else {
            None
        }
    }
}
