//! Filesystem utilities.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use glob::glob;

use crate::util::errors::{BuildError, BuildResult};

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> BuildResult<()> {
    if !path.is_dir() {
        tracing::debug!("creating directory {}", path.display());
        fs::create_dir_all(path).map_err(|e| BuildError::io(path, e))?;
    }
    Ok(())
}

/// Create every ancestor directory of `file`.
pub fn ensure_parent_dirs(file: &Path) -> BuildResult<()> {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}

/// Files matching a shell glob pattern, in lexical order.
///
/// Directories are skipped. Unreadable entries are logged and skipped.
pub fn glob_files(pattern: &str) -> BuildResult<Vec<PathBuf>> {
    let entries = glob(pattern).map_err(|source| BuildError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut results = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => {
                if path.is_file() {
                    results.push(path);
                }
            }
            Err(e) => {
                tracing::warn!("glob error: {}", e);
            }
        }
    }

    results.sort();
    Ok(results)
}

/// Modification time of `path`, or `None` if it cannot be stat'ed.
pub fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Remove a file, treating an already-missing file as success.
///
/// Returns whether a file was actually removed.
pub fn remove_file_if_exists(path: &Path) -> BuildResult<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(BuildError::io(path, e)),
    }
}
