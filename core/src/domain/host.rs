//! Host and host list domain models.

use serde::{Deserialize, Serialize};

/// Address every search probes first, whatever the interfaces report.
pub const WILDCARD_HOST: &str = "0.0.0.0";

// ============================================================================
// Host
// ============================================================================

/// A local address eligible for bind testing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Host {
    /// Bind without an explicit address (dual-stack `::`, else `0.0.0.0`).
    Unspecified,
    /// An IPv4/IPv6 literal or a hostname.
    Addr(String),
}

impl Host {
    /// Create a host from an address or hostname.
    pub fn addr(address: impl Into<String>) -> Self {
        Host::Addr(address.into())
    }

    /// The address string, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Host::Unspecified => None,
            Host::Addr(addr) => Some(addr),
        }
    }
}

impl From<Option<String>> for Host {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(addr) => Host::Addr(addr),
            None => Host::Unspecified,
        }
    }
}

impl From<Host> for Option<String> {
    fn from(host: Host) -> Self {
        match host {
            Host::Unspecified => None,
            Host::Addr(addr) => Some(addr),
        }
    }
}

impl std::fmt::Display for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Host::Unspecified => write!(f, "<unspecified>"),
            Host::Addr(addr) => write!(f, "{}", addr),
        }
    }
}

// ============================================================================
// HostList
// ============================================================================

/// Ordered, duplicate-free list of hosts a port search walks.
///
/// Seeded once from the local interfaces, extended with hosts the caller
/// asks for, and shrunk when a host turns out to be unbindable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostList {
    hosts: Vec<Host>,
}

impl HostList {
    /// Create a host list from the given hosts, dropping duplicates.
    pub fn new(hosts: impl IntoIterator<Item = Host>) -> Self {
        let mut list = Self::default();
        for host in hosts {
            list.push(host);
        }
        list
    }

    /// Build the default list from interface addresses.
    ///
    /// The wildcard address comes first and the unspecified marker last.
    pub fn from_interfaces(addresses: impl IntoIterator<Item = String>) -> Self {
        let interfaces = addresses.into_iter().map(Host::Addr);
        Self::new(
            std::iter::once(Host::addr(WILDCARD_HOST))
                .chain(interfaces)
                .chain(std::iter::once(Host::Unspecified)),
        )
    }

    /// The list used when interfaces cannot be enumerated.
    pub fn fallback() -> Self {
        Self::from_interfaces(std::iter::empty())
    }

    /// Append a host unless it is already present. Returns true if added.
    pub fn push(&mut self, host: Host) -> bool {
        if self.contains(&host) {
            return false;
        }
        self.hosts.push(host);
        true
    }

    /// Remove a host. Returns true if it was present.
    pub fn remove(&mut self, host: &Host) -> bool {
        match self.hosts.iter().position(|h| h == host) {
            Some(idx) => {
                self.hosts.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, host: &Host) -> bool {
        self.hosts.contains(host)
    }

    pub fn get(&self, index: usize) -> Option<&Host> {
        self.hosts.get(index)
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Host> {
        self.hosts.iter()
    }
}
