//! Mock provisioner for testing.
//!
//! Provides a scripted implementation of the `Provisioner` port so handler
//! and HTTP tests never spawn a process.
//!
//! # Features
//!
//! - Pre-configured outputs per subcommand (consumed in order)
//! - Error injection for launch failures and timeouts
//! - Call tracking, including the exact answer lines fed to stdin
//!
//! # Example
//!
//! ```ignore
//! let provisioner = MockProvisioner::new()
//!     .with_output(ProvisionerCommand::List, ProvisionerOutput::success("1 a.io b.io\n"));
//!
//! let output = provisioner.run(ProvisionerCommand::List, &AnswerSequence::none()).await?;
//! assert!(output.is_success());
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::stack::{AnswerSequence, ProvisionerCommand};
use crate::ports::{Provisioner, ProvisionerError, ProvisionerOutput};

type Scripted = Result<ProvisionerOutput, ProvisionerError>;

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub command: ProvisionerCommand,
    pub answers: AnswerSequence,
}

/// Mock provisioner for testing.
///
/// A subcommand with nothing queued fails with `ProvisionerError::Launch`,
/// the same as a missing executable.
#[derive(Debug, Clone, Default)]
pub struct MockProvisioner {
    responses: Arc<Mutex<HashMap<ProvisionerCommand, VecDeque<Scripted>>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockProvisioner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a completed run for `command`.
    pub fn with_output(self, command: ProvisionerCommand, output: ProvisionerOutput) -> Self {
        self.push(command, Ok(output));
        self
    }

    /// Queues a run that exits 0 with `stdout`.
    pub fn with_stdout(self, command: ProvisionerCommand, stdout: impl Into<String>) -> Self {
        self.with_output(command, ProvisionerOutput::success(stdout))
    }

    /// Queues a run that exits non-zero with `stderr`.
    pub fn with_failure(
        self,
        command: ProvisionerCommand,
        exit_code: i32,
        stderr: impl Into<String>,
    ) -> Self {
        self.with_output(command, ProvisionerOutput::failure(exit_code, stderr))
    }

    /// Queues an invocation that never completes normally.
    pub fn with_error(self, command: ProvisionerCommand, error: ProvisionerError) -> Self {
        self.push(command, Err(error));
        self
    }

    fn push(&self, command: ProvisionerCommand, scripted: Scripted) {
        self.responses
            .lock()
            .unwrap()
            .entry(command)
            .or_default()
            .push_back(scripted);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// The most recent invocation, if any.
    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Provisioner for MockProvisioner {
    async fn run(
        &self,
        command: ProvisionerCommand,
        answers: &AnswerSequence,
    ) -> Result<ProvisionerOutput, ProvisionerError> {
        self.calls.lock().unwrap().push(RecordedCall {
            command,
            answers: answers.clone(),
        });

        self.responses
            .lock()
            .unwrap()
            .get_mut(&command)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                Err(ProvisionerError::Launch {
                    program: "mock".to_string(),
                    reason: format!("no response queued for '{}'", command),
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stack::StackId;

    #[tokio::test]
    async fn responses_are_consumed_in_order_per_command() {
        let provisioner = MockProvisioner::new()
            .with_stdout(ProvisionerCommand::List, "first")
            .with_stdout(ProvisionerCommand::List, "second")
            .with_failure(ProvisionerCommand::Del, 1, "nope");

        let none = AnswerSequence::none();
        let first = provisioner.run(ProvisionerCommand::List, &none).await;
        let second = provisioner.run(ProvisionerCommand::List, &none).await;

        assert_eq!(first.unwrap().stdout, "first");
        assert_eq!(second.unwrap().stdout, "second");
    }

    #[tokio::test]
    async fn unscripted_command_fails_to_launch() {
        let provisioner = MockProvisioner::new();

        let result = provisioner
            .run(ProvisionerCommand::Add, &AnswerSequence::none())
            .await;

        assert!(matches!(result, Err(ProvisionerError::Launch { .. })));
    }

    #[tokio::test]
    async fn records_answers_fed_to_each_call() {
        let provisioner = MockProvisioner::new().with_stdout(ProvisionerCommand::Del, "");
        let id = StackId::new("3").unwrap();

        provisioner
            .run(ProvisionerCommand::Del, &AnswerSequence::for_removal(&id))
            .await
            .unwrap();

        let call = provisioner.last_call().unwrap();
        assert_eq!(call.command, ProvisionerCommand::Del);
        assert_eq!(call.answers.lines(), ["3", "y"]);
        assert_eq!(provisioner.call_count(), 1);
    }
}
