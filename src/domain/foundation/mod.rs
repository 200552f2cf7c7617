//! Foundation module - Shared domain primitives.
//!
//! Contains value objects and error types shared by the access gate and the
//! stack lifecycle.

mod auth;
mod errors;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{ensure_single_token, ValidationError};
pub use timestamp::Timestamp;
