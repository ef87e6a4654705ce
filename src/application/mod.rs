//! Application layer containing the client workflows.
//!
//! Each controller talks to the outside world only through the ports in
//! `domain::ports`, so the same code drives the CLI and the tests.

pub mod dashboard;
pub mod payment;
pub mod registration;
pub mod session;
