//! Subprocess adapter for the provisioner script.
//!
//! Runs `<executable> <subcommand>` (optionally as `<interpreter> <executable>
//! <subcommand>`), feeds the answer lines on stdin and collects everything
//! the script prints until it exits.
//!
//! # Hardening
//!
//! - Every invocation runs on its own task. Dropping the caller's future does
//!   not stop it; only the timeout does.
//! - The script is the leader of a fresh process group. On timeout the whole
//!   group is killed and `ProvisionerError::TimedOut` is returned.
//! - `add` and `del` are serialized through a single async mutex unless
//!   explicitly disabled. The guard lives as long as the invocation task.
//! - `list` never takes the lock.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::Mutex;

use crate::config::ProvisionerConfig;
use crate::domain::stack::{AnswerSequence, ProvisionerCommand};
use crate::ports::{Provisioner, ProvisionerError, ProvisionerOutput};

/// Drives the provisioner executable as a child process.
#[derive(Debug)]
pub struct ScriptProvisioner {
    /// Script or binary to run.
    executable: PathBuf,

    /// Interpreter to run the executable through. If None, it is executed directly.
    interpreter: Option<String>,

    /// Time budget for one invocation.
    timeout: Duration,

    /// Held for the duration of mutating subcommands. None disables serialization.
    mutation_lock: Option<Arc<Mutex<()>>>,
}

impl ScriptProvisioner {
    /// Create an adapter with a 15 minute timeout and serialized mutations.
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            interpreter: None,
            timeout: Duration::from_secs(900),
            mutation_lock: Some(Arc::new(Mutex::new(()))),
        }
    }

    /// Build the adapter from the `provisioner` configuration section.
    pub fn from_config(config: &ProvisionerConfig) -> Self {
        let mut provisioner = Self::new(config.executable.clone()).with_timeout(config.timeout());
        if let Some(interpreter) = &config.interpreter {
            provisioner = provisioner.with_interpreter(interpreter.clone());
        }
        if !config.serialize_mutations {
            provisioner = provisioner.without_serialization();
        }
        provisioner
    }

    /// Run the executable through an interpreter such as `bash`.
    pub fn with_interpreter(mut self, interpreter: impl Into<String>) -> Self {
        self.interpreter = Some(interpreter.into());
        self
    }

    /// Set the per-invocation timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Allow concurrent `add`/`del` invocations.
    pub fn without_serialization(mut self) -> Self {
        self.mutation_lock = None;
        self
    }

    pub fn serializes_mutations(&self) -> bool {
        self.mutation_lock.is_some()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Human-readable program name for error messages.
    fn program(&self) -> String {
        match &self.interpreter {
            Some(interpreter) => format!("{} {}", interpreter, self.executable.display()),
            None => self.executable.display().to_string(),
        }
    }

    fn command(&self, subcommand: ProvisionerCommand, feeds_stdin: bool) -> Command {
        let mut command = match &self.interpreter {
            Some(interpreter) => {
                let mut command = Command::new(interpreter);
                command.arg(&self.executable);
                command
            }
            None => Command::new(&self.executable),
        };

        command
            .arg(subcommand.as_arg())
            .stdin(if feeds_stdin {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        #[cfg(unix)]
        command.process_group(0);

        command
    }

    fn invocation(&self, subcommand: ProvisionerCommand, answers: &AnswerSequence) -> Invocation {
        Invocation {
            command: self.command(subcommand, !answers.is_empty()),
            program: self.program(),
            subcommand,
            payload: answers.to_stdin(),
            timeout: self.timeout,
        }
    }
}

/// Everything one run needs, owned so it can move onto its own task.
struct Invocation {
    command: Command,
    program: String,
    subcommand: ProvisionerCommand,
    payload: String,
    timeout: Duration,
}

impl Invocation {
    async fn execute(mut self) -> Result<ProvisionerOutput, ProvisionerError> {
        let subcommand = self.subcommand;
        let started = Instant::now();
        let mut child = self
            .command
            .spawn()
            .map_err(|e| ProvisionerError::Launch {
                program: self.program.clone(),
                reason: e.to_string(),
            })?;
        let pid = child.id();

        tracing::debug!(%subcommand, pid, "provisioner started");

        let payload = self.payload;
        let stdin = child.stdin.take();

        let exchange = async move {
            if let Some(mut stdin) = stdin {
                match stdin.write_all(payload.as_bytes()).await {
                    Ok(()) => {}
                    // The script may exit before reading every answer; its exit
                    // status decides the outcome, not the pipe.
                    Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                        tracing::debug!(%subcommand, "provisioner closed stdin early");
                    }
                    Err(e) => return Err(ProvisionerError::Io(e.to_string())),
                }
                drop(stdin);
            }

            child
                .wait_with_output()
                .await
                .map_err(|e| ProvisionerError::Io(e.to_string()))
        };

        let output = match tokio::time::timeout(self.timeout, exchange).await {
            Ok(result) => result?,
            Err(_) => {
                if let Some(pid) = pid {
                    kill_process_group(pid);
                }
                tracing::warn!(
                    %subcommand,
                    timeout_secs = self.timeout.as_secs(),
                    "provisioner timed out and was killed"
                );
                return Err(ProvisionerError::TimedOut(self.timeout.as_secs()));
            }
        };

        let output = ProvisionerOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        tracing::info!(
            %subcommand,
            exit_code = ?output.exit_code,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "provisioner finished"
        );

        Ok(output)
    }
}

/// SIGKILL every process left in the group led by `pid`.
#[cfg(unix)]
fn kill_process_group(pid: u32) {
    let Ok(pgid) = libc::pid_t::try_from(pid) else {
        return;
    };
    // SAFETY: killpg only sends a signal; the group was created for this child.
    let rc = unsafe { libc::killpg(pgid, libc::SIGKILL) };
    if rc != 0 {
        tracing::debug!(
            pgid,
            error = %std::io::Error::last_os_error(),
            "process group already gone"
        );
    }
}

#[cfg(not(unix))]
fn kill_process_group(_pid: u32) {}

#[async_trait]
impl Provisioner for ScriptProvisioner {
    async fn run(
        &self,
        command: ProvisionerCommand,
        answers: &AnswerSequence,
    ) -> Result<ProvisionerOutput, ProvisionerError> {
        let guard = match &self.mutation_lock {
            Some(lock) if command.is_mutating() => Some(Arc::clone(lock).lock_owned().await),
            _ => None,
        };
        let invocation = self.invocation(command, answers);

        let task = tokio::spawn(async move {
            let _guard = guard;
            invocation.execute().await
        });

        task.await
            .map_err(|e| ProvisionerError::Io(format!("provisioner task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_serialize_mutations() {
        let provisioner = ScriptProvisioner::new("./init.sh");
        assert!(provisioner.serializes_mutations());
        assert_eq!(provisioner.timeout(), Duration::from_secs(900));
        assert_eq!(provisioner.program(), "./init.sh");
    }

    #[test]
    fn from_config_applies_every_setting() {
        let config = ProvisionerConfig {
            executable: PathBuf::from("/opt/lightstack/init.sh"),
            interpreter: Some("bash".to_string()),
            timeout_secs: 42,
            serialize_mutations: false,
        };

        let provisioner = ScriptProvisioner::from_config(&config);

        assert!(!provisioner.serializes_mutations());
        assert_eq!(provisioner.timeout(), Duration::from_secs(42));
        assert_eq!(provisioner.program(), "bash /opt/lightstack/init.sh");
    }

    #[tokio::test]
    async fn missing_executable_is_a_launch_error() {
        let provisioner = ScriptProvisioner::new("/nonexistent/lightstack/init.sh");

        let result = provisioner
            .run(ProvisionerCommand::List, &AnswerSequence::none())
            .await;

        match result {
            Err(ProvisionerError::Launch { program, .. }) => {
                assert_eq!(program, "/nonexistent/lightstack/init.sh");
            }
            other => panic!("expected launch error, got {:?}", other),
        }
    }
}
