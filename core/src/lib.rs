//! Portseek Core Library
//!
//! Finds a free TCP port, or a free unix socket path, on the local machine.
//! Provides functionality to:
//! - Probe a port on every local interface and agree on one that is free everywhere
//! - Find several increasing free ports in one call
//! - Find the first socket path in a `name.sock`, `name1.sock`, ... sequence that does not exist
//! - Persist the default port range and socket base path
//!
//! A port reported free can be taken by another process before the caller
//! binds it. Nothing here reserves ports.
//!
//! # Architecture
//! This library follows hexagonal architecture (ports & adapters):
//! - `domain`: Pure search types and sequence generators
//! - `ports`: Trait definitions for bind, filesystem and interface access
//! - `adapters`: OS implementations of those traits
//! - `application`: The search procedures

// Hexagonal architecture layers
pub mod domain;
pub mod ports;
pub mod adapters;
pub mod application;

pub mod config;
pub mod engine;
pub mod error;

// Re-export domain types (primary API)
pub use domain::{
    next_port, next_socket_path, Host, HostList, PortOptions, ProbeOutcome, SearchConfig,
    SocketOptions, SocketProbeOutcome, SocketSearchConfig,
};

// Re-export other commonly used types
pub use config::{ConfigStore, Defaults};
pub use engine::{BlockingPortFinder, PortFinder};
pub use error::{Error, Result};
