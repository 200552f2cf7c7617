//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Access Gate Ports
//!
//! - `TokenIssuer` - Exchanges operator credentials for a bearer token
//! - `SessionValidator` - Verifies bearer tokens on every stack request
//!
//! ## Provisioning Ports
//!
//! - `Provisioner` - Runs the external provisioner and captures its output

mod provisioner;
mod session_validator;
mod token_issuer;

pub use provisioner::{Provisioner, ProvisionerError, ProvisionerOutput};
pub use session_validator::SessionValidator;
pub use token_issuer::{IssuedToken, TokenIssuer};
