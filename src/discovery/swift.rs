//! Swift discovery.
//!
//! Candidates are pooled from every install under the Swift root (except
//! the `latest` alias) plus every `swiftc` on the search path. Two
//! candidates that resolve to the same binary are probed once.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::ToolFamily;
use crate::probe::SearchResult;
use crate::toolchain::{InstalledToolchain, ToolchainCandidate};
use crate::util::fs::{normalize_path, sub_directories};

use super::{search, sort_latest_first, DiscoveryContext};

const LATEST_ALIAS: &str = "latest";

/// Every working `swiftc`, newest first; the sentinel when there is none.
pub fn find_swiftcs(context: &DiscoveryContext) -> Vec<ToolchainCandidate> {
    if context.is_disabled(ToolFamily::Swiftc) {
        debug!("Discovery of {} is disabled", ToolFamily::Swiftc);
        return vec![ToolchainCandidate::unavailable(ToolFamily::Swiftc)];
    }

    let mut toolchains: Vec<ToolchainCandidate> = Vec::new();
    for candidate in candidates(context) {
        let metadata = match context.swiftc.probe(&candidate, &[], &[]) {
            SearchResult::Available(metadata) => metadata,
            SearchResult::Unavailable { diagnostic } => {
                debug!("Ignoring {}: {}", candidate.display(), diagnostic);
                continue;
            }
        };
        let Some(bin_dir) = candidate.parent().map(Path::to_path_buf) else {
            continue;
        };
        debug!("Found swiftc {} at {}", metadata.version, candidate.display());

        let entries = [bin_dir.clone(), PathBuf::from("/usr/bin")];
        toolchains.push(
            InstalledToolchain::swiftc(bin_dir, metadata.version, context.os())
                .in_path(entries)
                .into(),
        );
    }

    if toolchains.is_empty() {
        toolchains.push(ToolchainCandidate::unavailable(ToolFamily::Swiftc));
    }
    sort_latest_first(&mut toolchains);
    toolchains
}

fn candidates(context: &DiscoveryContext) -> Vec<PathBuf> {
    let swiftc = context.os().executable_name("swiftc");
    let root = &context.locations().swift_root;

    let installed = sub_directories(root)
        .into_iter()
        .filter(|dir| dir.file_name().map_or(true, |name| name != LATEST_ALIAS))
        .map(|dir| dir.join("usr").join("bin").join(&swiftc))
        .filter(|path| path.is_file());
    let on_path = search::find_all_in_path("swiftc", &context.search_path());

    let mut seen = HashSet::new();
    installed
        .chain(on_path)
        .filter(|path| seen.insert(normalize_path(path)))
        .collect()
}
