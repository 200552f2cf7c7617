//! Provisioner port - the line-oriented subprocess boundary.
//!
//! The provisioner is an external executable that owns all stack state. This
//! port only moves bytes: it starts the tool with a subcommand, feeds the
//! answer lines, and hands back whatever the tool printed together with its
//! exit status. Interpreting that output is the domain's job.
//!
//! # Example
//!
//! ```ignore
//! let output = provisioner
//!     .run(ProvisionerCommand::Del, &AnswerSequence::for_removal(&id))
//!     .await?;
//!
//! if !output.is_success() {
//!     eprintln!("{}", output.stderr);
//! }
//! ```

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::stack::{AnswerSequence, ProvisionerCommand, StackError};

/// Raw result of one provisioner invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionerOutput {
    /// Process exit code; `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProvisionerOutput {
    /// Output of a run that exited with status 0.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Output of a run that exited with a non-zero status.
    pub fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(exit_code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Exit status 0 is the provisioner's only success signal.
    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Failures to complete an invocation at all.
///
/// A non-zero exit is *not* one of these: it is a completed run and comes
/// back as a `ProvisionerOutput`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProvisionerError {
    /// The executable is missing, not executable, or could not be spawned.
    #[error("failed to launch provisioner '{program}': {reason}")]
    Launch { program: String, reason: String },

    /// Pipes to the running process broke in an unexpected way.
    #[error("I/O error while talking to provisioner: {0}")]
    Io(String),

    /// The process exceeded its time budget and was killed.
    #[error("provisioner did not exit within {0}s")]
    TimedOut(u64),
}

impl ProvisionerError {
    /// Classifies the failure for the orchestration layer.
    pub fn into_stack_error(self, subcommand: ProvisionerCommand) -> StackError {
        match self {
            ProvisionerError::TimedOut(after_secs) => StackError::TimedOut {
                subcommand,
                after_secs,
            },
            other => StackError::infrastructure(other.to_string()),
        }
    }
}

/// Drives the external provisioner.
///
/// # Contract
///
/// Implementations must:
/// - Pass `command.as_arg()` as the single argument to the executable
/// - Write each answer line followed by `\n`, in order, then close stdin
/// - Capture stdout and stderr in full until the process exits
/// - Return `ProvisionerError::Launch` when the process cannot be started
/// - Never interpret the captured output
#[async_trait]
pub trait Provisioner: Send + Sync {
    async fn run(
        &self,
        command: ProvisionerCommand,
        answers: &AnswerSequence,
    ) -> Result<ProvisionerOutput, ProvisionerError>;
}
