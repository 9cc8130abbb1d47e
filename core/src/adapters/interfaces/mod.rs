//! Local interface enumeration adapters.
//!
//! Platform-specific implementations of interface address listing.

#[cfg(unix)]
mod unix;

use std::io;

use crate::ports::InterfacePort;

/// Lists the addresses of the machine's network interfaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemInterfaces;

impl SystemInterfaces {
    pub fn new() -> Self {
        Self
    }
}

impl InterfacePort for SystemInterfaces {
    #[cfg(unix)]
    fn addresses(&self) -> io::Result<Vec<String>> {
        unix::interface_addresses()
    }

    #[cfg(not(unix))]
    fn addresses(&self) -> io::Result<Vec<String>> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "interface enumeration is not supported on this platform",
        ))
    }
}
