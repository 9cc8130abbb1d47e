//! Seeding the default host list.

use tracing::{debug, warn};

use crate::domain::HostList;
use crate::ports::InterfacePort;

/// Build the default host list from the local interfaces.
///
/// Falls back to the wildcard address when interfaces cannot be listed.
pub fn default_hosts<I: InterfacePort>(interfaces: &I) -> HostList {
    match interfaces.addresses() {
        Ok(addresses) => {
            let hosts = HostList::from_interfaces(addresses);
            debug!(hosts = ?hosts, "Default hosts");
            hosts
        }
        Err(e) => {
            warn!(error = %e, "Could not list network interfaces, using wildcard host only");
            HostList::fallback()
        }
    }
}
