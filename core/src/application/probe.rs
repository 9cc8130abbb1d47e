//! Single-host port prober with its own retry loop.

use tracing::debug;

use crate::domain::{next_port, Host, ProbeOutcome};
use crate::error::{Error, Result};
use crate::ports::BinderPort;

/// Probes one host, advancing past occupied ports on its own.
///
/// The eventually-bound port is reported back, which may be higher than
/// the port the caller asked about.
pub struct PortProber<'a, B: BinderPort> {
    binder: &'a B,
    highest_port: u32,
    retry: bool,
}

impl<'a, B: BinderPort> PortProber<'a, B> {
    /// Create a prober that gives up once it would pass `highest_port`.
    pub fn new(binder: &'a B, highest_port: u32) -> Self {
        Self {
            binder,
            highest_port,
            retry: true,
        }
    }

    /// Report `Occupied` to the caller instead of advancing.
    pub fn without_retry(mut self) -> Self {
        self.retry = false;
        self
    }

    pub fn highest_port(&self) -> u32 {
        self.highest_port
    }

    /// Probe `host` starting at `port`.
    ///
    /// Fails with [`Error::NoOpenPorts`] when every port up to the highest
    /// port is occupied on this host.
    pub async fn probe(&self, host: &Host, port: u32) -> Result<ProbeOutcome> {
        let mut candidate = port;
        loop {
            let bind_port = u16::try_from(candidate).map_err(|_| Error::NoOpenPorts)?;
            let outcome = self.binder.try_bind(host, bind_port).await;
            if !self.retry || !outcome.is_occupied() {
                return Ok(outcome);
            }

            let next = next_port(candidate);
            if next > self.highest_port {
                debug!(host = %host, port = candidate, "Reached highest port");
                return Err(Error::NoOpenPorts);
            }
            candidate = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::MockBinder;

    #[tokio::test]
    async fn test_probe_free_port() {
        let binder = MockBinder::new();
        let prober = PortProber::new(&binder, 65535);

        let outcome = prober.probe(&Host::addr("127.0.0.1"), 9000).await.unwrap();
        assert!(matches!(outcome, ProbeOutcome::Bound(9000)));
    }

    #[tokio::test]
    async fn test_probe_advances_past_occupied() {
        let binder = MockBinder::new().occupy(None, 9000..9003);
        let prober = PortProber::new(&binder, 65535);

        let outcome = prober.probe(&Host::addr("127.0.0.1"), 9000).await.unwrap();
        assert!(matches!(outcome, ProbeOutcome::Bound(9003)));
        assert_eq!(binder.attempts().len(), 4);
    }

    #[tokio::test]
    async fn test_probe_stops_at_highest_port() {
        let binder = MockBinder::new().occupy(None, 9000..9010);
        let prober = PortProber::new(&binder, 9004);

        let result = prober.probe(&Host::addr("127.0.0.1"), 9000).await;
        assert!(matches!(result, Err(Error::NoOpenPorts)));
        assert_eq!(binder.attempts().len(), 5);
    }

    #[tokio::test]
    async fn test_probe_without_retry() {
        let binder = MockBinder::new().occupy(None, 9000..9001);
        let prober = PortProber::new(&binder, 65535).without_retry();

        let outcome = prober.probe(&Host::addr("127.0.0.1"), 9000).await.unwrap();
        assert!(outcome.is_occupied());
        assert_eq!(binder.attempts().len(), 1);
    }

    #[tokio::test]
    async fn test_probe_reports_unusable_host() {
        let binder = MockBinder::new().unusable("fe80::1");
        let prober = PortProber::new(&binder, 65535);

        let outcome = prober.probe(&Host::addr("fe80::1"), 9000).await.unwrap();
        assert!(matches!(outcome, ProbeOutcome::HostUnusable(_)));
    }
}
