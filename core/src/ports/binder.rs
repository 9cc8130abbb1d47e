//! Bind probe port (interface).

use crate::domain::{Host, ProbeOutcome};

/// Port for testing whether a host and port can be bound.
///
/// Implementations acquire a listening socket, release it immediately and
/// classify any failure. The returned future must not resolve before the
/// socket is released.
pub trait BinderPort: Send + Sync {
    /// Try to bind `host:port` once.
    fn try_bind(
        &self,
        host: &Host,
        port: u16,
    ) -> impl std::future::Future<Output = ProbeOutcome> + Send;
}
