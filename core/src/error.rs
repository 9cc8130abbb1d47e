//! Error types for the portseek-core library.

use thiserror::Error;

/// Result type alias for portseek operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can reach the caller of a port or socket search.
///
/// Occupied ports and unbindable default hosts are handled inside the
/// search and never surface here.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid search options (negative port, stop below start, bad socket name).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The host explicitly requested by the caller cannot be bound.
    #[error("Provided host {host} could NOT be bound. Please provide a different host address or hostname")]
    HostUnbindable { host: String },

    /// Every host agreed on a port, but it lies above the stop port.
    #[error("No open ports found in between {start} and {stop}")]
    PortRangeExhausted { start: u32, stop: u32 },

    /// The candidate port passed the highest allowed port.
    #[error("No open ports available")]
    NoOpenPorts,

    /// Every host was removed from the host list as unbindable.
    #[error("No bindable hosts left to probe")]
    NoBindableHosts,

    /// Binding failed with an error that is neither "occupied" nor "unusable host".
    #[error("Failed to bind {host} port {port}: {source}")]
    Bind {
        host: String,
        port: u32,
        #[source]
        source: std::io::Error,
    },

    /// I/O error (stat or mkdir failures during socket search, config files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A batch search stopped early.
    #[error("Found {} of {requested} ports before failing: {source}", .found.len())]
    Batch {
        found: Vec<u16>,
        requested: usize,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Ports obtained before a batch search failed. Empty for other errors.
    pub fn partial_ports(&self) -> &[u16] {
        match self {
            Error::Batch { found, .. } => found,
            _ => &[],
        }
    }
}
