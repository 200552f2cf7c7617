//! Stack lifecycle domain.
//!
//! - `values` - `Stack`, `StackId` and the `StackSpec` creation request
//! - `answers` - provisioner subcommands and their stdin answer sequences
//! - `directory` - parsing of provisioner stdout
//! - `errors` - failure taxonomy for list/create/remove cycles

mod answers;
mod directory;
mod errors;
mod values;

pub use answers::{AnswerSequence, ProvisionerCommand};
pub use directory::{extract_stack_id, parse_directory};
pub use errors::StackError;
pub use values::{Stack, StackId, StackSpec};
