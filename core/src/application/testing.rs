//! Mock capabilities shared by the application tests.

use std::collections::HashSet;
use std::io::{self, ErrorKind};
use std::ops::Range;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::adapters::SystemInterfaces;
use crate::domain::{Host, ProbeOutcome};
use crate::ports::{BinderPort, FileSystemPort, InterfacePort};

/// A documentation-range address not assigned to any local interface.
pub fn unassigned_address() -> &'static str {
    let local = SystemInterfaces::new().addresses().unwrap_or_default();
    ["192.0.2.1", "198.51.100.1", "203.0.113.1", "192.0.2.254"]
        .into_iter()
        .find(|candidate| !local.iter().any(|addr| addr == candidate))
        .expect("every documentation address is assigned locally")
}

/// Binder whose occupied ports and broken hosts are set up front.
#[derive(Default)]
pub struct MockBinder {
    occupied: Vec<(Option<Host>, Range<u32>)>,
    unusable: HashSet<Host>,
    fatal: HashSet<Host>,
    attempts: Mutex<Vec<(Host, u16)>>,
}

impl MockBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Occupy `ports` on `host`, or on every host when `None`.
    pub fn occupy(mut self, host: Option<&str>, ports: Range<u32>) -> Self {
        self.occupied.push((host.map(Host::addr), ports));
        self
    }

    pub fn unusable(mut self, host: &str) -> Self {
        self.unusable.insert(Host::addr(host));
        self
    }

    pub fn fatal(mut self, host: &str) -> Self {
        self.fatal.insert(Host::addr(host));
        self
    }

    pub fn attempts(&self) -> Vec<(Host, u16)> {
        self.attempts.lock().clone()
    }
}

impl BinderPort for MockBinder {
    async fn try_bind(&self, host: &Host, port: u16) -> ProbeOutcome {
        self.attempts.lock().push((host.clone(), port));

        if self.unusable.contains(host) {
            return ProbeOutcome::HostUnusable(io::Error::from(ErrorKind::AddrNotAvailable));
        }
        if self.fatal.contains(host) {
            return ProbeOutcome::Fatal(io::Error::other("boom"));
        }

        let occupied = self.occupied.iter().any(|(h, ports)| {
            h.as_ref().map_or(true, |h| h == host) && ports.contains(&u32::from(port))
        });
        if occupied {
            ProbeOutcome::Occupied
        } else {
            ProbeOutcome::Bound(port)
        }
    }
}

/// In-memory filesystem.
#[derive(Default)]
pub struct MockFileSystem {
    dirs: Mutex<HashSet<PathBuf>>,
    files: HashSet<PathBuf>,
    broken: HashSet<PathBuf>,
    readonly: bool,
    created: Mutex<Vec<(PathBuf, u32)>>,
    stats: Mutex<Vec<PathBuf>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        self.dirs.lock().insert(path.into());
        self
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.insert(path.into());
        self
    }

    /// Stat of `path` fails with permission denied.
    pub fn with_broken(mut self, path: impl Into<PathBuf>) -> Self {
        self.broken.insert(path.into());
        self
    }

    /// Every mkdir fails.
    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    pub fn created(&self) -> Vec<(PathBuf, u32)> {
        self.created.lock().clone()
    }

    pub fn stats(&self) -> Vec<PathBuf> {
        self.stats.lock().clone()
    }
}

impl FileSystemPort for MockFileSystem {
    async fn stat(&self, path: &Path) -> io::Result<bool> {
        self.stats.lock().push(path.to_path_buf());

        if self.broken.contains(path) {
            return Err(io::Error::from(ErrorKind::PermissionDenied));
        }
        if self.dirs.lock().contains(path) {
            return Ok(true);
        }
        if self.files.contains(path) {
            return Ok(false);
        }
        Err(io::Error::from(ErrorKind::NotFound))
    }

    async fn create_dir_all(&self, path: &Path, mode: u32) -> io::Result<()> {
        if self.readonly {
            return Err(io::Error::from(ErrorKind::PermissionDenied));
        }
        self.created.lock().push((path.to_path_buf(), mode));
        self.dirs.lock().insert(path.to_path_buf());
        Ok(())
    }
}
