//! Filesystem utilities.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

use url::Url;

/// Canonicalize a path, but don't fail if it doesn't exist.
/// Returns the path as-is if canonicalization fails.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// List the immediate subdirectories of `dir`, sorted by name.
///
/// A missing or unreadable directory yields an empty list.
pub fn sub_directories(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    dirs
}

/// Render a directory as a `file:` URI with a trailing slash.
pub fn directory_uri(dir: &Path) -> String {
    let absolute = if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(dir))
            .unwrap_or_else(|_| dir.to_path_buf())
    };

    match Url::from_directory_path(&absolute) {
        Ok(url) => url.to_string(),
        Err(()) => format!("file:{}/", absolute.display()),
    }
}

/// Join `entries` in front of an existing search-path value.
pub fn prepend_search_path(
    entries: &[PathBuf],
    current: Option<&OsStr>,
) -> Result<OsString, std::env::JoinPathsError> {
    let mut all: Vec<PathBuf> = entries.to_vec();
    if let Some(current) = current {
        all.extend(std::env::split_paths(current));
    }
    std::env::join_paths(all)
}
