//! Search-path scanning.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::PathBuf;

use tracing::trace;

use crate::util::fs::normalize_path;

/// Every executable named `name` on `search_path`, in path order.
///
/// The same binary reached through two entries (a symlinked directory, a
/// repeated entry) is reported once, at its first position.
pub fn find_all_in_path(name: &str, search_path: &OsStr) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();

    for dir in std::env::split_paths(search_path) {
        if dir.as_os_str().is_empty() || !dir.is_dir() {
            continue;
        }
        trace!("Checking search path directory for `{}`: {}", name, dir.display());

        // One directory at a time keeps the search-path order
        let Some(path) = which::which_in_global(name, Some(&dir))
            .into_iter()
            .flatten()
            .next()
        else {
            continue;
        };

        if seen.insert(normalize_path(&path)) {
            trace!("Found `{}` at {}", name, path.display());
            found.push(path);
        } else {
            trace!("Skipping duplicate `{}` at {}", name, path.display());
        }
    }

    found
}
