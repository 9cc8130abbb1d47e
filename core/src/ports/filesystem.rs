//! Filesystem port (interface).

use std::io;
use std::path::Path;

/// Port for the filesystem primitives the socket search needs.
pub trait FileSystemPort: Send + Sync {
    /// Stat a path. `Ok(true)` if it is a directory, `Ok(false)` for
    /// anything else that exists, `Err` with `NotFound` if nothing does.
    fn stat(&self, path: &Path) -> impl std::future::Future<Output = io::Result<bool>> + Send;

    /// Create a directory and its parents with the given permission mode.
    fn create_dir_all(
        &self,
        path: &Path,
        mode: u32,
    ) -> impl std::future::Future<Output = io::Result<()>> + Send;
}
