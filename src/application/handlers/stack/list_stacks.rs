//! ListStacksHandler - Query handler for the stack directory.

use std::sync::Arc;

use crate::domain::foundation::AuthenticatedUser;
use crate::domain::stack::{parse_directory, AnswerSequence, ProvisionerCommand, Stack, StackError};
use crate::ports::Provisioner;

use super::require_success;

/// Query to list every provisioned stack.
#[derive(Debug, Clone)]
pub struct ListStacksQuery {
    pub operator: AuthenticatedUser,
}

/// Handler for listing stacks.
pub struct ListStacksHandler {
    provisioner: Arc<dyn Provisioner>,
}

impl ListStacksHandler {
    pub fn new(provisioner: Arc<dyn Provisioner>) -> Self {
        Self { provisioner }
    }

    /// Runs `list` and parses its directory, in the provisioner's order.
    pub async fn handle(&self, query: ListStacksQuery) -> Result<Vec<Stack>, StackError> {
        let command = ProvisionerCommand::List;

        let output = self
            .provisioner
            .run(command, &AnswerSequence::none())
            .await
            .map_err(|e| e.into_stack_error(command))?;

        let stdout = require_success(command, output)?;
        let stacks = parse_directory(&stdout)?;

        tracing::debug!(
            operator = %query.operator.username,
            count = stacks.len(),
            "listed stacks"
        );

        Ok(stacks)
    }
}
