//! CreateStackHandler - Command handler for provisioning a new stack.

use std::sync::Arc;

use crate::domain::foundation::AuthenticatedUser;
use crate::domain::stack::{
    extract_stack_id, AnswerSequence, ProvisionerCommand, Stack, StackError, StackSpec,
};
use crate::ports::Provisioner;

use super::require_success;

/// Command to add a stack.
#[derive(Debug, Clone)]
pub struct CreateStackCommand {
    pub operator: AuthenticatedUser,
    pub spec: StackSpec,
}

/// Handler for creating stacks.
pub struct CreateStackHandler {
    provisioner: Arc<dyn Provisioner>,
}

impl CreateStackHandler {
    pub fn new(provisioner: Arc<dyn Provisioner>) -> Self {
        Self { provisioner }
    }

    pub async fn handle(&self, cmd: CreateStackCommand) -> Result<Stack, StackError> {
        // 1. Reject anything that cannot be expressed as answer lines
        cmd.spec.validate()?;

        // 2. Run `add` with the six answers
        let command = ProvisionerCommand::Add;
        let answers = AnswerSequence::for_creation(&cmd.spec);

        tracing::info!(
            operator = %cmd.operator.username,
            payment_domain = %cmd.spec.payment_domain,
            wallet_domain = %cmd.spec.wallet_domain,
            real_certificates = cmd.spec.use_real_certificates,
            external_database = cmd.spec.use_external_database,
            "creating stack"
        );

        let output = self
            .provisioner
            .run(command, &answers)
            .await
            .map_err(|e| e.into_stack_error(command))?;

        let stdout = require_success(command, output)?;

        // 3. A success without an id cannot be reported as a stack
        let id = extract_stack_id(&stdout).ok_or_else(|| {
            tracing::warn!(stdout = %stdout.trim_end(), "add succeeded without a stack id");
            StackError::output_parsing("add output contains no stack_<id> marker")
        })?;

        tracing::info!(stack_id = %id, "stack created");

        Ok(Stack::new(id, cmd.spec.payment_domain, cmd.spec.wallet_domain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::provisioner::MockProvisioner;
    use crate::domain::foundation::ValidationError;
    use crate::ports::ProvisionerError;

    fn spec() -> StackSpec {
        StackSpec {
            payment_domain: "pay.example.com".to_string(),
            wallet_domain: "wallet.example.com".to_string(),
            use_real_certificates: true,
            use_external_database: false,
            contact_email: Some("ops@example.com".to_string()),
        }
    }

    fn command(spec: StackSpec) -> CreateStackCommand {
        CreateStackCommand {
            operator: AuthenticatedUser::new("admin"),
            spec,
        }
    }

    fn handler(provisioner: &MockProvisioner) -> CreateStackHandler {
        CreateStackHandler::new(Arc::new(provisioner.clone()))
    }

    #[tokio::test]
    async fn returns_stack_with_extracted_id() {
        let provisioner = MockProvisioner::new().with_stdout(
            ProvisionerCommand::Add,
            "Generating config...\nCreated stack_42 successfully\n",
        );

        let stack = handler(&provisioner).handle(command(spec())).await.unwrap();

        assert_eq!(stack.id.as_str(), "42");
        assert_eq!(stack.payment_domain, "pay.example.com");
        assert_eq!(stack.wallet_domain, "wallet.example.com");
    }

    #[tokio::test]
    async fn feeds_six_answers_in_order() {
        let provisioner = MockProvisioner::new().with_stdout(ProvisionerCommand::Add, "stack_1");

        handler(&provisioner).handle(command(spec())).await.unwrap();

        let call = provisioner.last_call().unwrap();
        assert_eq!(call.command, ProvisionerCommand::Add);
        assert_eq!(
            call.answers.lines(),
            [
                "pay.example.com",
                "wallet.example.com",
                "y",
                "ops@example.com",
                "n",
                "y"
            ]
        );
    }

    #[tokio::test]
    async fn self_signed_mode_sends_blank_email_line() {
        let provisioner = MockProvisioner::new().with_stdout(ProvisionerCommand::Add, "stack_5");
        let spec = StackSpec {
            use_real_certificates: false,
            use_external_database: true,
            contact_email: Some("ignored@example.com".to_string()),
            ..spec()
        };

        handler(&provisioner).handle(command(spec)).await.unwrap();

        let call = provisioner.last_call().unwrap();
        assert_eq!(call.answers.lines()[2], "n");
        assert_eq!(call.answers.lines()[3], "");
        assert_eq!(call.answers.lines()[4], "y");
    }

    #[tokio::test]
    async fn provisioner_failure_keeps_stderr() {
        let provisioner = MockProvisioner::new().with_failure(
            ProvisionerCommand::Add,
            1,
            "certificate issuance failed",
        );

        let err = handler(&provisioner).handle(command(spec())).await.unwrap_err();

        match err {
            StackError::ProvisioningFailed { stderr, exit_code, .. } => {
                assert_eq!(stderr, "certificate issuance failed");
                assert_eq!(exit_code, Some(1));
            }
            other => panic!("expected ProvisioningFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn success_without_id_is_output_parsing_error() {
        let provisioner =
            MockProvisioner::new().with_stdout(ProvisionerCommand::Add, "All done!\n");

        let err = handler(&provisioner).handle(command(spec())).await.unwrap_err();

        assert!(matches!(err, StackError::OutputParsing(_)));
    }

    #[tokio::test]
    async fn invalid_spec_never_reaches_provisioner() {
        let provisioner = MockProvisioner::new();
        let spec = StackSpec {
            contact_email: None,
            ..spec()
        };

        let err = handler(&provisioner).handle(command(spec)).await.unwrap_err();

        assert_eq!(
            err,
            StackError::InvalidRequest(ValidationError::empty_field("contact_email"))
        );
        assert_eq!(provisioner.call_count(), 0);
    }

    #[tokio::test]
    async fn timeout_is_reported_as_timed_out() {
        let provisioner = MockProvisioner::new()
            .with_error(ProvisionerCommand::Add, ProvisionerError::TimedOut(900));

        let err = handler(&provisioner).handle(command(spec())).await.unwrap_err();

        assert_eq!(
            err,
            StackError::TimedOut {
                subcommand: ProvisionerCommand::Add,
                after_secs: 900
            }
        );
    }
}
