//! Application layer - The search procedures.
//!
//! Searches are thin orchestrators that:
//! - Accept domain types as inputs
//! - Use ports (traits) for binding, stat/mkdir and interface listing
//! - Probe strictly one candidate at a time

mod batch;
mod hosts;
mod port_search;
mod probe;
mod socket_search;

#[cfg(test)]
pub(crate) mod testing;

pub use batch::find_ports;
pub use hosts::default_hosts;
pub use port_search::PortSearch;
pub use probe::PortProber;
pub use socket_search::SocketSearch;
