//! Outcomes of a single bind or stat probe.

use std::io::{self, ErrorKind};

/// Result of trying to bind one host and port.
#[derive(Debug)]
pub enum ProbeOutcome {
    /// The port could be bound (and was released again).
    Bound(u16),
    /// Something else holds the port, or it is privileged (EADDRINUSE/EACCES).
    Occupied,
    /// The address cannot be bound on this machine (EADDRNOTAVAIL/EINVAL).
    HostUnusable(io::Error),
    /// Any other bind failure.
    Fatal(io::Error),
}

impl ProbeOutcome {
    /// Classify a bind error.
    pub fn from_bind_error(err: io::Error) -> Self {
        match err.kind() {
            ErrorKind::AddrInUse | ErrorKind::PermissionDenied => ProbeOutcome::Occupied,
            // EINVAL decodes to InvalidInput
            ErrorKind::AddrNotAvailable | ErrorKind::InvalidInput => {
                ProbeOutcome::HostUnusable(err)
            }
            _ => ProbeOutcome::Fatal(err),
        }
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, ProbeOutcome::Occupied)
    }
}

/// Result of checking one candidate socket path.
#[derive(Debug)]
pub enum SocketProbeOutcome {
    /// Nothing exists at the path.
    Free,
    /// Something exists at the path.
    Occupied,
    /// The stat failed for a reason other than "not found".
    Fatal(io::Error),
}

impl SocketProbeOutcome {
    /// Classify the result of a stat call.
    pub fn from_stat<T>(result: io::Result<T>) -> Self {
        match result {
            Ok(_) => SocketProbeOutcome::Occupied,
            Err(err) if err.kind() == ErrorKind::NotFound => SocketProbeOutcome::Free,
            Err(err) => SocketProbeOutcome::Fatal(err),
        }
    }
}
