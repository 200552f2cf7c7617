//! Stack lifecycle error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | InvalidRequest | 400 |
//! | Infrastructure | 500 |
//! | TimedOut | 500 |
//! | ProvisioningFailed | 500 |
//! | OutputParsing | 500 |

use thiserror::Error;

use crate::domain::foundation::ValidationError;

use super::answers::ProvisionerCommand;

/// Failures of a single list/create/remove cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackError {
    /// The request could not be expressed as provisioner answers.
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] ValidationError),

    /// The provisioner could not be started or talked to at all.
    #[error("Provisioner unavailable: {0}")]
    Infrastructure(String),

    /// The provisioner was killed after exceeding its time budget.
    #[error("Provisioner '{subcommand}' did not finish within {after_secs}s")]
    TimedOut {
        subcommand: ProvisionerCommand,
        after_secs: u64,
    },

    /// The provisioner ran and reported failure through its exit status.
    /// `stderr` is kept exactly as captured.
    #[error("Provisioner '{subcommand}' failed: {stderr}")]
    ProvisioningFailed {
        subcommand: ProvisionerCommand,
        exit_code: Option<i32>,
        stderr: String,
    },

    /// The provisioner claimed success but its output could not be trusted.
    #[error("Unexpected provisioner output: {0}")]
    OutputParsing(String),
}

impl StackError {
    pub fn infrastructure(message: impl Into<String>) -> Self {
        StackError::Infrastructure(message.into())
    }

    pub fn output_parsing(message: impl Into<String>) -> Self {
        StackError::OutputParsing(message.into())
    }

    pub fn provisioning_failed(
        subcommand: ProvisionerCommand,
        exit_code: Option<i32>,
        stderr: impl Into<String>,
    ) -> Self {
        StackError::ProvisioningFailed {
            subcommand,
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Returns true if the caller sent something unusable.
    pub fn is_client_error(&self) -> bool {
        matches!(self, StackError::InvalidRequest(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provisioning_failure_keeps_stderr_verbatim() {
        let err = StackError::provisioning_failed(
            ProvisionerCommand::Add,
            Some(1),
            "certificate issuance failed",
        );
        match &err {
            StackError::ProvisioningFailed { stderr, exit_code, .. } => {
                assert_eq!(stderr, "certificate issuance failed");
                assert_eq!(*exit_code, Some(1));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(
            err.to_string(),
            "Provisioner 'add' failed: certificate issuance failed"
        );
    }

    #[test]
    fn timeout_displays_subcommand_and_budget() {
        let err = StackError::TimedOut {
            subcommand: ProvisionerCommand::Del,
            after_secs: 5,
        };
        assert_eq!(err.to_string(), "Provisioner 'del' did not finish within 5s");
    }

    #[test]
    fn validation_errors_convert_into_invalid_request() {
        let err: StackError = ValidationError::empty_field("payment_domain").into();
        assert!(err.is_client_error());
        assert!(!StackError::output_parsing("x").is_client_error());
        assert!(!StackError::infrastructure("x").is_client_error());
    }
}
