//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod auth;
pub mod stack;

pub use auth::{IssueTokenCommand, IssueTokenHandler};
pub use stack::{
    CreateStackCommand, CreateStackHandler, ListStacksHandler, ListStacksQuery,
    RemoveStackCommand, RemoveStackHandler, StackRemoved,
};
