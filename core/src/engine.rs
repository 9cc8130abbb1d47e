//! Portseek engine - the public entry points.
//!
//! `PortFinder` owns the process-wide defaults and the default host list
//! and runs searches against them. `BlockingPortFinder` wraps it with its
//! own single-threaded runtime for callers without one.

use std::path::PathBuf;

use parking_lot::RwLock;
use tokio::runtime::{Builder, Runtime};
use tokio::sync::Mutex;

use crate::adapters::{LocalFileSystem, SystemInterfaces, TcpBinder};
use crate::application::{default_hosts, find_ports, PortSearch, SocketSearch};
use crate::config::Defaults;
use crate::domain::{HostList, PortOptions, SocketOptions};
use crate::error::{Error, Result};
use crate::ports::{BinderPort, FileSystemPort};

/// Finds free ports and socket paths.
///
/// The host list is shared by every search through one finder. It is
/// locked for the whole of a port search, so concurrent searches run one
/// after another and never interleave host removals.
pub struct PortFinder<B = TcpBinder, F = LocalFileSystem> {
    binder: B,
    fs: F,
    defaults: RwLock<Defaults>,
    hosts: Mutex<HostList>,
}

impl PortFinder {
    /// Create a finder with built-in defaults and the machine's interfaces.
    pub fn new() -> Self {
        Self::with_defaults(Defaults::default())
    }

    /// Create a finder with the given defaults (e.g. loaded by `ConfigStore`).
    pub fn with_defaults(defaults: Defaults) -> Self {
        Self::with_parts(
            TcpBinder::new(),
            LocalFileSystem::new(),
            default_hosts(&SystemInterfaces::new()),
            defaults,
        )
    }
}

impl Default for PortFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: BinderPort, F: FileSystemPort> PortFinder<B, F> {
    /// Create a finder from explicit capabilities and host list.
    pub fn with_parts(binder: B, fs: F, hosts: HostList, defaults: Defaults) -> Self {
        Self {
            binder,
            fs,
            defaults: RwLock::new(defaults),
            hosts: Mutex::new(hosts),
        }
    }

    // =========================================================================
    // Defaults
    // =========================================================================

    /// Snapshot of the current defaults.
    pub fn defaults(&self) -> Defaults {
        self.defaults.read().clone()
    }

    pub fn base_port(&self) -> u32 {
        self.defaults.read().base_port
    }

    /// Set the lowest port searches begin from.
    pub fn set_base_port(&self, port: u16) {
        self.defaults.write().base_port = u32::from(port);
    }

    pub fn highest_port(&self) -> u32 {
        self.defaults.read().highest_port
    }

    /// Set the highest port searches may reach.
    pub fn set_highest_port(&self, port: u16) {
        self.defaults.write().highest_port = u32::from(port);
    }

    pub fn base_path(&self) -> PathBuf {
        self.defaults.read().base_path.clone()
    }

    /// Set the path socket searches begin from.
    pub fn set_base_path(&self, path: impl Into<PathBuf>) {
        self.defaults.write().base_path = path.into();
    }

    /// Snapshot of the host list. Waits for a running search to finish.
    pub async fn hosts(&self) -> HostList {
        self.hosts.lock().await.clone()
    }

    // =========================================================================
    // Searches
    // =========================================================================

    /// Find a port that is free on every host.
    pub async fn get_port(&self, options: &PortOptions) -> Result<u16> {
        let defaults = self.defaults();
        let mut hosts = self.hosts.lock().await;
        PortSearch::from_options(&self.binder, &mut hosts, options, &defaults)?
            .run()
            .await
    }

    /// Find `count` increasing ports.
    ///
    /// On failure the error is [`Error::Batch`] carrying the ports found so far.
    pub async fn get_ports(&self, count: usize, options: &PortOptions) -> Result<Vec<u16>> {
        let defaults = self.defaults();
        let mut hosts = self.hosts.lock().await;
        find_ports(&self.binder, &mut hosts, count, options, &defaults).await
    }

    /// Find a socket path that does not exist yet.
    pub async fn get_socket(&self, options: &SocketOptions) -> Result<PathBuf> {
        let defaults = self.defaults();
        SocketSearch::from_options(&self.fs, options, &defaults)
            .run()
            .await
    }
}

/// Blocking front end for callers outside an async runtime.
///
/// Every call blocks on the finder's own runtime, so it must not be used
/// from inside another one.
pub struct BlockingPortFinder {
    finder: PortFinder,
    runtime: Runtime,
}

impl BlockingPortFinder {
    /// Create a blocking finder with built-in defaults.
    pub fn new() -> Result<Self> {
        Self::with_defaults(Defaults::default())
    }

    pub fn with_defaults(defaults: Defaults) -> Result<Self> {
        // Probing is sequential; one thread is enough
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Config(format!("Failed to create runtime: {}", e)))?;

        Ok(Self {
            finder: PortFinder::with_defaults(defaults),
            runtime,
        })
    }

    /// The wrapped async finder.
    pub fn finder(&self) -> &PortFinder {
        &self.finder
    }

    /// Find a port that is free on every host.
    ///
    /// # Panics
    ///
    /// Panics when called from within an async runtime, like every
    /// `get_*` method here. Use [`PortFinder`] there instead.
    pub fn get_port(&self, options: &PortOptions) -> Result<u16> {
        self.runtime.block_on(self.finder.get_port(options))
    }

    /// # Panics
    ///
    /// Panics when called from within an async runtime.
    pub fn get_ports(&self, count: usize, options: &PortOptions) -> Result<Vec<u16>> {
        self.runtime.block_on(self.finder.get_ports(count, options))
    }

    /// # Panics
    ///
    /// Panics when called from within an async runtime.
    pub fn get_socket(&self, options: &SocketOptions) -> Result<PathBuf> {
        self.runtime.block_on(self.finder.get_socket(options))
    }

    pub fn hosts(&self) -> HostList {
        self.runtime.block_on(self.finder.hosts())
    }
}
