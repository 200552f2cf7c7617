//! Provisioner adapters.
//!
//! Implementations of the `Provisioner` port:
//!
//! - `script` - Spawns the provisioner executable as a child process
//! - `mock` - Scripted responses for tests

mod mock;
mod script;

pub use mock::{MockProvisioner, RecordedCall};
pub use script::ScriptProvisioner;
