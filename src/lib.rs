//! Lightstack API - Control plane for payment/wallet service stacks
//!
//! This crate puts an authenticated REST API in front of the provisioner
//! script that actually creates, lists and removes stacks. It keeps no state
//! of its own: every request becomes one provisioner invocation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
