//! Domain layer - Pure search types and sequence generators.
//!
//! These types have no I/O dependencies and can be tested in isolation.

mod host;
mod options;
mod outcome;
mod sequence;

// Re-export all domain types
pub use host::{Host, HostList, WILDCARD_HOST};
pub use options::{
    PortOptions, SearchConfig, SocketOptions, SocketSearchConfig, MAX_PORT, SOCKET_SUFFIX,
};
pub use outcome::{ProbeOutcome, SocketProbeOutcome};
pub use sequence::{next_port, next_socket_path};
