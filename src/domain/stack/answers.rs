//! Provisioner subcommands and the answer lines they expect on stdin.
//!
//! The provisioner is an interactive script. We drive it by feeding a fixed,
//! positional sequence of answers; there is no prompt/response handshake, so
//! the order here *is* the protocol. If the script's prompts change, this is
//! the only file that has to follow.

use std::fmt;

use serde::Serialize;

use super::values::{StackId, StackSpec};

/// Subcommands understood by the provisioner executable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProvisionerCommand {
    List,
    Add,
    Del,
}

impl ProvisionerCommand {
    /// The argument passed on the provisioner's command line.
    pub fn as_arg(&self) -> &'static str {
        match self {
            ProvisionerCommand::List => "list",
            ProvisionerCommand::Add => "add",
            ProvisionerCommand::Del => "del",
        }
    }

    /// Whether the subcommand changes provisioner state.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, ProvisionerCommand::List)
    }
}

impl fmt::Display for ProvisionerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_arg())
    }
}

/// Ordered answer lines written to the provisioner's stdin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSequence(Vec<String>);

impl AnswerSequence {
    /// No stdin at all (used by `list`).
    pub fn none() -> Self {
        Self::default()
    }

    /// Answers for `add`:
    ///
    /// 1. payment domain
    /// 2. wallet domain
    /// 3. `y`/`n` real certificates
    /// 4. contact email, or an empty line when certificates are self-signed
    /// 5. `y`/`n` external database
    /// 6. `y` to confirm
    pub fn for_creation(spec: &StackSpec) -> Self {
        Self(vec![
            spec.payment_domain.clone(),
            spec.wallet_domain.clone(),
            yes_no(spec.use_real_certificates).to_string(),
            spec.effective_contact_email().unwrap_or_default().to_string(),
            yes_no(spec.use_external_database).to_string(),
            yes_no(true).to_string(),
        ])
    }

    /// Answers for `del`: the id, then `y` to confirm.
    pub fn for_removal(id: &StackId) -> Self {
        Self(vec![id.as_str().to_string(), yes_no(true).to_string()])
    }

    pub fn lines(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Renders the stdin payload: every answer terminated by `\n`.
    pub fn to_stdin(&self) -> String {
        self.0.iter().fold(String::new(), |mut buf, line| {
            buf.push_str(line);
            buf.push('\n');
            buf
        })
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "y"
    } else {
        "n"
    }
}
