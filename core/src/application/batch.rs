//! Finding several ports in a row.

use tracing::debug;

use super::port_search::PortSearch;
use crate::config::Defaults;
use crate::domain::{next_port, HostList, PortOptions, SearchConfig};
use crate::error::{Error, Result};
use crate::ports::BinderPort;

/// Find `count` ports, each search starting after the previous result.
///
/// On failure the ports found so far are returned inside [`Error::Batch`].
pub async fn find_ports<B: BinderPort>(
    binder: &B,
    hosts: &mut HostList,
    count: usize,
    options: &PortOptions,
    defaults: &Defaults,
) -> Result<Vec<u16>> {
    let mut found = Vec::with_capacity(count);

    let fail = |found: Vec<u16>, source: Error| Error::Batch {
        found,
        requested: count,
        source: Box::new(source),
    };

    let mut options = options.clone();
    // Later searches keep reporting the range of the first one.
    match SearchConfig::resolve(&options, defaults) {
        Ok(config) => options.start_port = Some(i64::from(config.start_port)),
        Err(e) => return Err(fail(found, e)),
    }

    while found.len() < count {
        if let Some(&last) = found.last() {
            let next = next_port(u32::from(last));
            if next > defaults.highest_port {
                return Err(fail(found, Error::NoOpenPorts));
            }
            options.port = Some(i64::from(next));
        }

        let result = match PortSearch::from_options(binder, hosts, &options, defaults) {
            Ok(search) => search.run().await,
            Err(e) => Err(e),
        };
        match result {
            Ok(port) => {
                debug!(port = port, index = found.len(), "Batch port found");
                found.push(port);
            }
            Err(e) => return Err(fail(found, e)),
        }
    }

    Ok(found)
}
