//! Domain model and the ports the workflows talk through.
//!
//! Nothing in here performs I/O; adapters live in `infrastructure` and
//! `interfaces`.

pub mod payment;
pub mod ports;
pub mod registration;
pub mod session;
pub mod stats;
