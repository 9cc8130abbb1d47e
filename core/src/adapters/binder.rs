//! TCP bind probe backed by tokio listeners.

use std::io::{self, ErrorKind};
use std::net::{Ipv4Addr, Ipv6Addr};

use tokio::net::TcpListener;
use tracing::debug;

use crate::domain::{Host, ProbeOutcome};
use crate::ports::BinderPort;

/// Probes ports by binding a TCP listener and dropping it right away.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpBinder;

impl TcpBinder {
    pub fn new() -> Self {
        Self
    }

    async fn bind(host: &Host, port: u16) -> io::Result<()> {
        let listener = match host {
            Host::Addr(addr) => TcpListener::bind((addr.as_str(), port)).await?,
            Host::Unspecified => match TcpListener::bind((Ipv6Addr::UNSPECIFIED, port)).await {
                Ok(listener) => listener,
                Err(e) if matches!(e.kind(), ErrorKind::AddrInUse | ErrorKind::PermissionDenied) => {
                    return Err(e);
                }
                // No IPv6 on this machine
                Err(_) => TcpListener::bind((Ipv4Addr::UNSPECIFIED, port)).await?,
            },
        };
        drop(listener);
        Ok(())
    }
}

impl BinderPort for TcpBinder {
    async fn try_bind(&self, host: &Host, port: u16) -> ProbeOutcome {
        match Self::bind(host, port).await {
            Ok(()) => {
                debug!(host = %host, port = port, "Port bound and released");
                ProbeOutcome::Bound(port)
            }
            Err(e) => {
                debug!(host = %host, port = port, error = %e, "Bind failed");
                ProbeOutcome::from_bind_error(e)
            }
        }
    }
}
