//! Stack lifecycle command and query handlers.
//!
//! Each handler runs exactly one provisioner invocation. No state is kept
//! between requests; the provisioner's directory is the source of truth.

mod create_stack;
mod list_stacks;
mod remove_stack;

pub use create_stack::{CreateStackCommand, CreateStackHandler};
pub use list_stacks::{ListStacksHandler, ListStacksQuery};
pub use remove_stack::{RemoveStackCommand, RemoveStackHandler, StackRemoved};

use crate::domain::stack::{ProvisionerCommand, StackError};
use crate::ports::ProvisionerOutput;

/// Turns a completed run into its stdout, or into `ProvisioningFailed` with
/// the captured stderr when the exit status is non-zero.
fn require_success(
    subcommand: ProvisionerCommand,
    output: ProvisionerOutput,
) -> Result<String, StackError> {
    if output.is_success() {
        return Ok(output.stdout);
    }

    tracing::warn!(
        %subcommand,
        exit_code = ?output.exit_code,
        stderr = %output.stderr.trim_end(),
        "provisioner reported failure"
    );

    Err(StackError::provisioning_failed(
        subcommand,
        output.exit_code,
        output.stderr,
    ))
}
