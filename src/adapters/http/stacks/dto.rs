//! Request and response shapes of the stack endpoints.
//!
//! Stacks themselves serialize straight from the domain `Stack`.

use serde::{Deserialize, Serialize};

use crate::application::handlers::stack::StackRemoved;
use crate::domain::stack::StackSpec;

/// Body of `POST /stacks`.
///
/// The aliases accept the field names used by older dashboard clients.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStackRequest {
    #[serde(alias = "phoenixd_domain")]
    pub payment_domain: String,

    #[serde(alias = "lnbits_domain")]
    pub wallet_domain: String,

    #[serde(alias = "use_real_certs")]
    pub use_real_certificates: bool,

    #[serde(alias = "use_postgres")]
    pub use_external_database: bool,

    #[serde(default, alias = "email")]
    pub contact_email: Option<String>,
}

impl From<CreateStackRequest> for StackSpec {
    fn from(req: CreateStackRequest) -> Self {
        StackSpec {
            payment_domain: req.payment_domain,
            wallet_domain: req.wallet_domain,
            use_real_certificates: req.use_real_certificates,
            use_external_database: req.use_external_database,
            contact_email: req.contact_email,
        }
    }
}

/// Body of a successful `DELETE /stacks/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveStackResponse {
    pub message: String,
}

impl From<StackRemoved> for RemoveStackResponse {
    fn from(removed: StackRemoved) -> Self {
        Self {
            message: removed.message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stack::StackId;

    #[test]
    fn accepts_current_field_names() {
        let req: CreateStackRequest = serde_json::from_value(serde_json::json!({
            "payment_domain": "pay.example.com",
            "wallet_domain": "wallet.example.com",
            "use_real_certificates": true,
            "use_external_database": false,
            "contact_email": "ops@example.com"
        }))
        .unwrap();

        let spec = StackSpec::from(req);
        assert_eq!(spec.payment_domain, "pay.example.com");
        assert_eq!(spec.contact_email.as_deref(), Some("ops@example.com"));
        assert!(spec.use_real_certificates);
    }

    #[test]
    fn accepts_legacy_field_names() {
        let req: CreateStackRequest = serde_json::from_value(serde_json::json!({
            "phoenixd_domain": "pay.example.com",
            "lnbits_domain": "wallet.example.com",
            "use_real_certs": false,
            "use_postgres": true
        }))
        .unwrap();

        let spec = StackSpec::from(req);
        assert_eq!(spec.wallet_domain, "wallet.example.com");
        assert!(spec.use_external_database);
        assert_eq!(spec.contact_email, None);
    }

    #[test]
    fn missing_flag_is_rejected() {
        let result: Result<CreateStackRequest, _> = serde_json::from_value(serde_json::json!({
            "payment_domain": "pay.example.com",
            "wallet_domain": "wallet.example.com",
            "use_real_certificates": false
        }));
        assert!(result.is_err());
    }

    #[test]
    fn removal_response_carries_message() {
        let response = RemoveStackResponse::from(StackRemoved {
            id: StackId::new("9").unwrap(),
        });
        assert_eq!(response.message, "Stack 9 removed successfully");
    }
}
