//! Interface enumeration using getifaddrs(3).

use std::io;
use std::net::{SocketAddrV4, SocketAddrV6};

use nix::ifaddrs::getifaddrs;

/// IPv4 and IPv6 addresses grouped by interface, interfaces in the order
/// they are first reported.
pub(super) fn interface_addresses() -> io::Result<Vec<String>> {
    let mut interfaces: Vec<(String, Vec<String>)> = Vec::new();

    for ifaddr in getifaddrs().map_err(io::Error::from)? {
        let Some(storage) = ifaddr.address else {
            continue;
        };

        let address = if let Some(sin) = storage.as_sockaddr_in() {
            SocketAddrV4::from(*sin).ip().to_string()
        } else if let Some(sin6) = storage.as_sockaddr_in6() {
            SocketAddrV6::from(*sin6).ip().to_string()
        } else {
            continue;
        };

        match interfaces
            .iter_mut()
            .find(|(name, _)| *name == ifaddr.interface_name)
        {
            Some((_, addresses)) => addresses.push(address),
            None => interfaces.push((ifaddr.interface_name, vec![address])),
        }
    }

    Ok(interfaces
        .into_iter()
        .flat_map(|(_, addresses)| addresses)
        .collect())
}
