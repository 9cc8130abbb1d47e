//! Successor functions for candidate ports and socket paths.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use super::options::SOCKET_SUFFIX;
use crate::error::{Error, Result};

/// The port after `port`. Callers bound the result.
pub fn next_port(port: u32) -> u32 {
    port + 1
}

fn socket_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)^([a-z]+)(\d*)$").unwrap())
}

/// The socket path after `path`: `dir/test.sock` -> `dir/test1.sock`,
/// `dir/test4.sock` -> `dir/test5.sock`.
///
/// The file stem must be ASCII letters optionally followed by digits.
/// `_`, `-` and other punctuation are rejected.
pub fn next_socket_path(path: &Path) -> Result<PathBuf> {
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::Config(format!("Invalid socket path: {}", path.display())))?;
    let stem = match name.strip_suffix(SOCKET_SUFFIX) {
        Some(stem) if !stem.is_empty() => stem,
        _ => name,
    };

    let caps = socket_name_pattern().captures(stem).ok_or_else(|| {
        Error::Config(format!(
            "Socket name {:?} must be letters optionally followed by digits",
            stem
        ))
    })?;

    let index: u64 = match &caps[2] {
        "" => 0,
        digits => digits
            .parse()
            .map_err(|e| Error::Config(format!("Invalid socket index {}: {}", digits, e)))?,
    };

    Ok(dir.join(format!("{}{}{}", &caps[1], index + 1, SOCKET_SUFFIX)))
}
