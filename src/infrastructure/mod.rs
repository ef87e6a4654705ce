//! Adapters that connect the ports to the network, the filesystem and the
//! terminal.

pub mod checkout;
pub mod downloads;
pub mod http;
pub mod in_memory;
pub mod local_storage;
