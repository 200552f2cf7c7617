//! RemoveStackHandler - Command handler for tearing a stack down.

use std::sync::Arc;

use crate::domain::foundation::AuthenticatedUser;
use crate::domain::stack::{AnswerSequence, ProvisionerCommand, StackError, StackId};
use crate::ports::Provisioner;

use super::require_success;

/// Command to remove a stack by id.
#[derive(Debug, Clone)]
pub struct RemoveStackCommand {
    pub operator: AuthenticatedUser,
    pub id: StackId,
}

/// Result of a successful removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackRemoved {
    pub id: StackId,
}

impl StackRemoved {
    /// Confirmation text returned to the client.
    pub fn message(&self) -> String {
        format!("Stack {} removed successfully", self.id)
    }
}

/// Handler for removing stacks.
///
/// Existence is not checked up front; an unknown id is whatever the
/// provisioner makes of it.
pub struct RemoveStackHandler {
    provisioner: Arc<dyn Provisioner>,
}

impl RemoveStackHandler {
    pub fn new(provisioner: Arc<dyn Provisioner>) -> Self {
        Self { provisioner }
    }

    pub async fn handle(&self, cmd: RemoveStackCommand) -> Result<StackRemoved, StackError> {
        let command = ProvisionerCommand::Del;

        tracing::info!(
            operator = %cmd.operator.username,
            stack_id = %cmd.id,
            "removing stack"
        );

        let output = self
            .provisioner
            .run(command, &AnswerSequence::for_removal(&cmd.id))
            .await
            .map_err(|e| e.into_stack_error(command))?;

        require_success(command, output)?;

        tracing::info!(stack_id = %cmd.id, "stack removed");

        Ok(StackRemoved { id: cmd.id })
    }
}
