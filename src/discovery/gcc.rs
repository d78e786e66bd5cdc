//! GCC and Clang discovery from the search path.

use tracing::debug;

use crate::core::ToolFamily;
use crate::probe::SearchResult;
use crate::toolchain::{InstalledToolchain, ToolchainCandidate};

use super::{search, sentinel_if, sort_latest_first, DiscoveryContext};

/// Every working `g++` on the search path, newest first.
pub fn find_gccs(context: &DiscoveryContext, must_find: bool) -> Vec<ToolchainCandidate> {
    find_gcc_compatible(context, ToolFamily::Gcc, must_find)
}

/// Every working `clang` on the search path, newest first.
pub fn find_clangs(context: &DiscoveryContext, must_find: bool) -> Vec<ToolchainCandidate> {
    find_gcc_compatible(context, ToolFamily::Clang, must_find)
}

fn find_gcc_compatible(
    context: &DiscoveryContext,
    family: ToolFamily,
    must_find: bool,
) -> Vec<ToolchainCandidate> {
    if context.is_disabled(family) {
        debug!("Discovery of {} is disabled", family);
        return sentinel_if(must_find, family);
    }

    let (executable, provider) = match family {
        ToolFamily::Clang => ("clang", context.clang.as_ref()),
        _ => ("g++", context.gcc.as_ref()),
    };
    debug!("Searching for {} toolchains", family);

    let candidates = search::find_all_in_path(executable, &context.search_path());
    let first_in_path = candidates.first();

    let mut toolchains = Vec::new();
    for candidate in &candidates {
        let metadata = match provider.probe(candidate, &[], &[]) {
            SearchResult::Available(metadata) => metadata,
            SearchResult::Unavailable { diagnostic } => {
                debug!("Ignoring {}: {}", candidate.display(), diagnostic);
                continue;
            }
        };
        debug!("Found {} {} at {}", family, metadata.version, candidate.display());

        let mut toolchain = match family {
            ToolFamily::Clang => InstalledToolchain::clang(metadata.version, context.os()),
            _ => InstalledToolchain::gcc(metadata.version, context.os()),
        };
        // Only the first hit resolves through the unmodified search path
        if Some(candidate) != first_in_path {
            if let Some(dir) = candidate.parent() {
                toolchain = toolchain.in_path([dir.to_path_buf()]);
            }
        }
        toolchains.push(toolchain.into());
    }

    if toolchains.is_empty() {
        toolchains = sentinel_if(must_find, family);
    }
    sort_latest_first(&mut toolchains);
    toolchains
}
