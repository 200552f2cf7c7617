//! Provisioner configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

/// External provisioner configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProvisionerConfig {
    /// Path to the provisioner executable (the installer's `init.sh`)
    #[serde(default = "default_executable")]
    pub executable: PathBuf,

    /// Optional interpreter to run the executable through (e.g. `bash`)
    pub interpreter: Option<String>,

    /// Seconds to wait for one invocation before killing it
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Run `add`/`del` one at a time
    #[serde(default = "default_serialize_mutations")]
    pub serialize_mutations: bool,
}

impl ProvisionerConfig {
    /// Get the invocation timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate provisioner configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.executable.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("PROVISIONER__EXECUTABLE"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 3600 {
            return Err(ValidationError::InvalidProvisionerTimeout);
        }
        Ok(())
    }
}

impl Default for ProvisionerConfig {
    fn default() -> Self {
        Self {
            executable: default_executable(),
            interpreter: None,
            timeout_secs: default_timeout(),
            serialize_mutations: default_serialize_mutations(),
        }
    }
}

fn default_executable() -> PathBuf {
    PathBuf::from("./init.sh")
}

// Certificate issuance plus container pulls routinely take several minutes.
fn default_timeout() -> u64 {
    900
}

fn default_serialize_mutations() -> bool {
    true
}
