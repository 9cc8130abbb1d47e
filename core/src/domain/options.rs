//! Search options as given by callers, and the validated configurations
//! the searches run on.

use std::ffi::OsString;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::Host;
use crate::config::Defaults;
use crate::error::{Error, Result};

/// Largest port number a TCP socket can bind.
pub const MAX_PORT: u32 = u16::MAX as u32;

/// Suffix shared by every socket path the search produces.
pub const SOCKET_SUFFIX: &str = ".sock";

// ============================================================================
// Port search
// ============================================================================

/// Options accepted by a port search.
///
/// Ports are signed so that negative values can be reported as
/// configuration errors instead of being silently clamped. A value of 0
/// counts as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortOptions {
    /// Port to start probing at.
    #[serde(default)]
    pub port: Option<i64>,
    /// Host the caller intends to listen on.
    #[serde(default)]
    pub host: Option<String>,
    /// Lower bound reported in range errors; defaults to `port`.
    #[serde(default)]
    pub start_port: Option<i64>,
    /// Highest acceptable result; defaults to the highest port.
    #[serde(default)]
    pub stop_port: Option<i64>,
}

impl PortOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_port(mut self, port: i64) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_start_port(mut self, port: i64) -> Self {
        self.start_port = Some(port);
        self
    }

    pub fn with_stop_port(mut self, port: i64) -> Self {
        self.stop_port = Some(port);
        self
    }
}

/// A validated port search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Lower bound of the searched range.
    pub start_port: u32,
    /// Candidate port of the current round.
    pub current_port: u32,
    /// Highest acceptable result.
    pub stop_port: u32,
    /// Host the caller asked for, if any.
    pub host: Option<Host>,
}

impl SearchConfig {
    /// Resolve caller options against the defaults and validate them.
    ///
    /// No port is probed before this succeeds.
    pub fn resolve(options: &PortOptions, defaults: &Defaults) -> Result<Self> {
        let set = |value: Option<i64>| value.filter(|p| *p != 0);

        let port = set(options.port)
            .or(set(options.start_port))
            .unwrap_or(i64::from(defaults.base_port));
        let start_port = set(options.start_port).unwrap_or(port);
        let stop_port = set(options.stop_port).unwrap_or(i64::from(defaults.highest_port));

        for (name, value) in [("port", port), ("startPort", start_port)] {
            if value < 0 {
                return Err(Error::Config(format!(
                    "Provided {}({}) is less than 0, which cannot be bound",
                    name, value
                )));
            }
            if value > i64::from(MAX_PORT) {
                return Err(Error::Config(format!(
                    "Provided {}({}) is greater than {}",
                    name, value, MAX_PORT
                )));
            }
        }
        if stop_port < start_port {
            return Err(Error::Config(format!(
                "Provided stopPort({}) is less than startPort({})",
                stop_port, start_port
            )));
        }

        Ok(Self {
            start_port: start_port as u32,
            current_port: port as u32,
            stop_port: stop_port.min(i64::from(u32::MAX)) as u32,
            host: options.host.clone().map(Host::Addr),
        })
    }
}

// ============================================================================
// Socket search
// ============================================================================

/// Options accepted by a socket path search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocketOptions {
    /// First candidate path; defaults to the base path plus `.sock`.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Permission mode for a created parent directory.
    #[serde(default)]
    pub mode: Option<u32>,
}

impl SocketOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }
}

/// A resolved socket path search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketSearchConfig {
    pub path: PathBuf,
    pub mode: u32,
    /// Whether the parent directory is known to exist.
    pub directory_confirmed: bool,
}

impl SocketSearchConfig {
    pub fn resolve(options: &SocketOptions, defaults: &Defaults) -> Self {
        let path = options.path.clone().unwrap_or_else(|| {
            let mut path = OsString::from(defaults.base_path.as_os_str());
            path.push(SOCKET_SUFFIX);
            PathBuf::from(path)
        });

        Self {
            path,
            mode: options.mode.unwrap_or(defaults.socket_mode),
            directory_confirmed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let config = SearchConfig::resolve(&PortOptions::new(), &Defaults::default()).unwrap();
        assert_eq!(config.start_port, 8000);
        assert_eq!(config.current_port, 8000);
        assert_eq!(config.stop_port, 65535);
        assert_eq!(config.host, None);
    }

    #[test]
    fn test_resolve_port_sets_start() {
        let options = PortOptions::new().with_port(32768).with_stop_port(32800);
        let config = SearchConfig::resolve(&options, &Defaults::default()).unwrap();
        assert_eq!(config.start_port, 32768);
        assert_eq!(config.current_port, 32768);
        assert_eq!(config.stop_port, 32800);
    }

    #[test]
    fn test_resolve_start_port_without_port() {
        let options = PortOptions::new().with_start_port(9000);
        let config = SearchConfig::resolve(&options, &Defaults::default()).unwrap();
        assert_eq!(config.current_port, 9000);
        assert_eq!(config.start_port, 9000);
    }

    #[test]
    fn test_zero_port_counts_as_unset() {
        let options = PortOptions::new().with_port(0);
        let config = SearchConfig::resolve(&options, &Defaults::default()).unwrap();
        assert_eq!(config.current_port, 8000);
    }

    #[test]
    fn test_negative_port_rejected() {
        let result = SearchConfig::resolve(&PortOptions::new().with_port(-1), &Defaults::default());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_port_above_max_rejected() {
        let result =
            SearchConfig::resolve(&PortOptions::new().with_port(70000), &Defaults::default());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_stop_below_start_rejected() {
        let options = PortOptions::new().with_port(9000).with_stop_port(8999);
        let err = SearchConfig::resolve(&options, &Defaults::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: Provided stopPort(8999) is less than startPort(9000)"
        );
    }

    #[test]
    fn test_host_carried() {
        let options = PortOptions::new().with_host("127.0.0.1");
        let config = SearchConfig::resolve(&options, &Defaults::default()).unwrap();
        assert_eq!(config.host, Some(Host::addr("127.0.0.1")));
    }

    #[test]
    fn test_socket_defaults() {
        let config = SocketSearchConfig::resolve(&SocketOptions::new(), &Defaults::default());
        assert_eq!(config.path, PathBuf::from("/tmp/portseek.sock"));
        assert_eq!(config.mode, 0o755);
        assert!(!config.directory_confirmed);
    }
}
