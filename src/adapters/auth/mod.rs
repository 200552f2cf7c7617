//! Authentication adapters.
//!
//! Implementations of the `TokenIssuer` and `SessionValidator` ports:
//!
//! - `jwt` - Production HS256 implementation backed by the configured operator
//! - `mock` - Test implementation that doesn't sign anything

mod jwt;
mod mock;

pub use jwt::{CredentialStore, JwtSessionService};
pub use mock::MockSessionValidator;
