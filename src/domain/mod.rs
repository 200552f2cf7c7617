//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (auth identity, validation, timestamps)
//! - `stack` - Stack records, provisioner answer protocol and output parsing

pub mod foundation;
pub mod stack;
