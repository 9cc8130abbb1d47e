//! Multi-host port search.
//!
//! A candidate port is only reported free when every host in the host list
//! binds that exact port. The search runs as an explicit state machine:
//!
//! ```text
//! Validating -> ProbingHost(0) -> .. -> ProbingHost(n) -> Aggregating -> Done
//!     ^              |                                        |
//!     +---------- Restarting <--------------------------------+
//! ```
//!
//! Every restart either raises the candidate port or shrinks the host list,
//! so the loop is bounded by the host count plus the port range. The round
//! cap only matters for binders that report a bound port below the one
//! they were asked for.

use tracing::{debug, warn};

use super::probe::PortProber;
use crate::config::Defaults;
use crate::domain::{next_port, Host, HostList, PortOptions, ProbeOutcome, SearchConfig};
use crate::error::{Error, Result};
use crate::ports::BinderPort;

/// Why a round was abandoned.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Restart {
    /// A host reported the candidate occupied.
    NextPort(u32),
    /// Hosts bound different ports; probe all of them again at the highest.
    RaiseTo(u32),
    /// A default host cannot be bound; drop it and repeat the round.
    DropHost(Host),
}

#[derive(Debug)]
enum SearchState {
    Validating,
    ProbingHost { index: usize, bound: Vec<u16> },
    Aggregating { bound: Vec<u16> },
    Restarting(Restart),
    Done(u16),
    Failed(Error),
}

/// One port search over a host list.
pub struct PortSearch<'a, B: BinderPort> {
    prober: PortProber<'a, B>,
    hosts: &'a mut HostList,
    config: SearchConfig,
    /// Safety net against a binder that never lets the hosts agree.
    max_rounds: usize,
}

impl<'a, B: BinderPort> PortSearch<'a, B> {
    /// Create a search from an already validated configuration.
    pub fn new(
        binder: &'a B,
        hosts: &'a mut HostList,
        config: SearchConfig,
        highest_port: u32,
    ) -> Self {
        let range = highest_port.saturating_sub(config.current_port) as usize;
        let max_rounds = hosts.len() + range + 2;
        Self {
            prober: PortProber::new(binder, highest_port),
            hosts,
            config,
            max_rounds,
        }
    }

    /// Validate caller options and create a search.
    ///
    /// Fails with [`Error::Config`] before any port is probed.
    pub fn from_options(
        binder: &'a B,
        hosts: &'a mut HostList,
        options: &PortOptions,
        defaults: &Defaults,
    ) -> Result<Self> {
        let config = SearchConfig::resolve(options, defaults)?;
        Ok(Self::new(binder, hosts, config, defaults.highest_port))
    }

    /// Let occupied ports escalate to the search instead of being skipped
    /// inside the per-host prober.
    pub fn without_host_retry(mut self) -> Self {
        self.prober = self.prober.without_retry();
        self
    }

    /// Run the search to completion.
    pub async fn run(mut self) -> Result<u16> {
        let mut state = SearchState::Validating;
        let mut rounds = 0usize;

        loop {
            state = match state {
                SearchState::Validating => {
                    rounds += 1;
                    if rounds > self.max_rounds {
                        warn!(rounds = rounds, "Port search did not converge");
                        SearchState::Failed(Error::NoOpenPorts)
                    } else {
                        self.validate()
                    }
                }
                SearchState::ProbingHost { index, bound } => match self.hosts.get(index).cloned() {
                    Some(host) => {
                        debug!(host = %host, port = self.config.current_port, "Probing host");
                        match self.prober.probe(&host, self.config.current_port).await {
                            Ok(outcome) => after_probe(&self.config, &host, index, bound, outcome),
                            Err(e) => SearchState::Failed(e),
                        }
                    }
                    None => SearchState::Aggregating { bound },
                },
                SearchState::Aggregating { bound } => aggregate(&self.config, bound),
                SearchState::Restarting(restart) => self.restart(restart),
                SearchState::Done(port) => {
                    debug!(port = port, "Found open port");
                    return Ok(port);
                }
                SearchState::Failed(e) => return Err(e),
            };
        }
    }

    /// Round entry: check the candidate and make sure the requested host
    /// is probed.
    fn validate(&mut self) -> SearchState {
        if self.config.current_port > self.prober.highest_port() {
            return SearchState::Failed(Error::NoOpenPorts);
        }
        if let Some(host) = &self.config.host {
            if self.hosts.push(host.clone()) {
                debug!(host = %host, "Added requested host to host list");
            }
        }
        SearchState::ProbingHost {
            index: 0,
            bound: Vec::with_capacity(self.hosts.len()),
        }
    }

    fn restart(&mut self, restart: Restart) -> SearchState {
        match restart {
            Restart::NextPort(port) | Restart::RaiseTo(port) => {
                debug!(from = self.config.current_port, to = port, "Restarting search");
                self.config.current_port = port;
            }
            Restart::DropHost(host) => {
                warn!(host = %host, "Host cannot be bound, removing it from host list");
                self.hosts.remove(&host);
            }
        }
        SearchState::Validating
    }
}

fn after_probe(
    config: &SearchConfig,
    host: &Host,
    index: usize,
    mut bound: Vec<u16>,
    outcome: ProbeOutcome,
) -> SearchState {
    match outcome {
        ProbeOutcome::Bound(port) => {
            bound.push(port);
            SearchState::ProbingHost {
                index: index + 1,
                bound,
            }
        }
        ProbeOutcome::Occupied => {
            SearchState::Restarting(Restart::NextPort(next_port(config.current_port)))
        }
        ProbeOutcome::HostUnusable(_) if config.host.as_ref() == Some(host) => {
            SearchState::Failed(Error::HostUnbindable {
                host: host.to_string(),
            })
        }
        ProbeOutcome::HostUnusable(_) => SearchState::Restarting(Restart::DropHost(host.clone())),
        ProbeOutcome::Fatal(source) => SearchState::Failed(Error::Bind {
            host: host.to_string(),
            port: config.current_port,
            source,
        }),
    }
}

fn aggregate(config: &SearchConfig, mut bound: Vec<u16>) -> SearchState {
    bound.sort_unstable();
    debug!(ports = ?bound, "Ports bound per host");

    match (bound.first().copied(), bound.last().copied()) {
        (Some(min), Some(max)) if min == max => {
            if u32::from(min) <= config.stop_port {
                SearchState::Done(min)
            } else {
                SearchState::Failed(Error::PortRangeExhausted {
                    start: config.start_port,
                    stop: config.stop_port,
                })
            }
        }
        (Some(_), Some(max)) => SearchState::Restarting(Restart::RaiseTo(u32::from(max))),
        _ => SearchState::Failed(Error::NoBindableHosts),
    }
}
