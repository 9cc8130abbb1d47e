//! Socket path search.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Defaults;
use crate::domain::{next_socket_path, SocketOptions, SocketProbeOutcome, SocketSearchConfig};
use crate::error::Result;
use crate::ports::FileSystemPort;

/// Finds the first socket path in sequence that does not exist yet,
/// creating its parent directory if needed.
pub struct SocketSearch<'a, F: FileSystemPort> {
    fs: &'a F,
    config: SocketSearchConfig,
}

impl<'a, F: FileSystemPort> SocketSearch<'a, F> {
    pub fn new(fs: &'a F, config: SocketSearchConfig) -> Self {
        Self { fs, config }
    }

    pub fn from_options(fs: &'a F, options: &SocketOptions, defaults: &Defaults) -> Self {
        Self::new(fs, SocketSearchConfig::resolve(options, defaults))
    }

    /// Run the search to completion.
    pub async fn run(mut self) -> Result<PathBuf> {
        if !self.config.directory_confirmed {
            let dir = parent_dir(&self.config.path);
            self.ensure_dir(&dir).await?;
            self.config.directory_confirmed = true;
        }

        loop {
            let path = &self.config.path;
            match SocketProbeOutcome::from_stat(self.fs.stat(path).await) {
                SocketProbeOutcome::Free => {
                    debug!(path = %path.display(), "Found free socket path");
                    return Ok(self.config.path);
                }
                SocketProbeOutcome::Occupied => {
                    debug!(path = %path.display(), "Socket path exists, trying next");
                    self.config.path = next_socket_path(path)?;
                }
                SocketProbeOutcome::Fatal(e) => return Err(e.into()),
            }
        }
    }

    async fn ensure_dir(&self, dir: &Path) -> Result<()> {
        match self.fs.stat(dir).await {
            Ok(true) => return Ok(()),
            Ok(false) => debug!(dir = %dir.display(), "Socket parent is not a directory"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => debug!(dir = %dir.display(), error = %e, "Could not stat socket parent"),
        }

        debug!(
            dir = %dir.display(),
            mode = %format!("{:o}", self.config.mode),
            "Creating socket directory"
        );
        self.fs.create_dir_all(dir, self.config.mode).await?;
        Ok(())
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::MockFileSystem;
    use crate::error::Error;

    fn config(path: &str) -> SocketSearchConfig {
        SocketSearchConfig {
            path: PathBuf::from(path),
            mode: 0o755,
            directory_confirmed: false,
        }
    }

    #[tokio::test]
    async fn test_free_path_in_existing_dir() {
        let fs = MockFileSystem::new().with_dir("/run/app");
        let path = SocketSearch::new(&fs, config("/run/app/test.sock"))
            .run()
            .await
            .unwrap();
        assert_eq!(path, PathBuf::from("/run/app/test.sock"));
        assert!(fs.created().is_empty());
    }

    #[tokio::test]
    async fn test_creates_missing_dir() {
        let fs = MockFileSystem::new();
        let mut config = config("/run/app/deeply/nested/test.sock");
        config.mode = 0o700;
        let path = SocketSearch::new(&fs, config).run().await.unwrap();
        assert_eq!(path, PathBuf::from("/run/app/deeply/nested/test.sock"));
        assert_eq!(
            fs.created(),
            vec![(PathBuf::from("/run/app/deeply/nested"), 0o700)]
        );
    }

    #[tokio::test]
    async fn test_skips_existing_sockets() {
        let fs = MockFileSystem::new()
            .with_dir("/run/app")
            .with_file("/run/app/test.sock")
            .with_file("/run/app/test1.sock")
            .with_file("/run/app/test2.sock");
        let path = SocketSearch::new(&fs, config("/run/app/test.sock"))
            .run()
            .await
            .unwrap();
        assert_eq!(path, PathBuf::from("/run/app/test3.sock"));

        // The directory is checked once, not per candidate.
        let dir_stats = fs
            .stats()
            .iter()
            .filter(|p| p.as_path() == Path::new("/run/app"))
            .count();
        assert_eq!(dir_stats, 1);
    }

    #[tokio::test]
    async fn test_confirmed_dir_not_checked() {
        let fs = MockFileSystem::new();
        let mut config = config("/run/app/test.sock");
        config.directory_confirmed = true;
        SocketSearch::new(&fs, config).run().await.unwrap();
        assert_eq!(fs.stats(), vec![PathBuf::from("/run/app/test.sock")]);
    }

    #[tokio::test]
    async fn test_mkdir_failure_aborts() {
        let fs = MockFileSystem::new().readonly();
        let err = SocketSearch::new(&fs, config("/run/app/test.sock"))
            .run()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io(ref e) if e.kind() == ErrorKind::PermissionDenied));
    }

    #[tokio::test]
    async fn test_stat_failure_aborts() {
        let fs = MockFileSystem::new()
            .with_dir("/run/app")
            .with_file("/run/app/test.sock")
            .with_broken("/run/app/test1.sock");
        let err = SocketSearch::new(&fs, config("/run/app/test.sock"))
            .run()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[tokio::test]
    async fn test_bad_socket_name() {
        let fs = MockFileSystem::new()
            .with_dir("/run/app")
            .with_file("/run/app/1.sock");
        let err = SocketSearch::new(&fs, config("/run/app/1.sock"))
            .run()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[tokio::test]
    async fn test_real_filesystem() {
        use crate::adapters::LocalFileSystem;

        let dir = tempfile::tempdir().unwrap();
        let socket_dir = dir.path().join("bad-dir").join("deeply").join("nested");
        let first = socket_dir.join("test.sock");

        let fs = LocalFileSystem::new();
        let path = SocketSearch::new(&fs, config(first.to_str().unwrap()))
            .run()
            .await
            .unwrap();
        assert_eq!(path, first);
        assert!(socket_dir.is_dir());

        std::fs::write(&first, b"").unwrap();
        std::fs::write(socket_dir.join("test1.sock"), b"").unwrap();
        let path = SocketSearch::new(&fs, config(first.to_str().unwrap()))
            .run()
            .await
            .unwrap();
        assert_eq!(path, socket_dir.join("test2.sock"));
    }
}
