//! Filesystem adapter backed by `tokio::fs`.

use std::io;
use std::path::Path;

use tokio::fs;

use crate::ports::FileSystemPort;

/// The local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystemPort for LocalFileSystem {
    async fn stat(&self, path: &Path) -> io::Result<bool> {
        let metadata = fs::metadata(path).await?;
        Ok(metadata.is_dir())
    }

    async fn create_dir_all(&self, path: &Path, mode: u32) -> io::Result<()> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(mode);
        #[cfg(not(unix))]
        let _ = mode;
        builder.create(path).await
    }
}
