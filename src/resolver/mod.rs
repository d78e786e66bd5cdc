//! Toolchain resolution.
//!
//! The resolver owns the discovery context and the list discovery produced.
//! Discovery runs at most once per resolver, on first use; every later query
//! answers from the same list. The list is ordered by OS family priority
//! and, within a family, newest first, so the first candidate satisfying a
//! requirement is the preferred one.

use std::sync::OnceLock;

use tracing::debug;

use crate::core::ToolchainRequirement;
use crate::discovery::{discover_all, DiscoveryContext};
use crate::toolchain::{InstalledToolchain, ToolchainCandidate};

/// Lazily discovered, immutable set of toolchain candidates.
pub struct ToolchainResolver {
    context: DiscoveryContext,
    toolchains: OnceLock<Vec<ToolchainCandidate>>,
}

impl ToolchainResolver {
    pub fn new(context: DiscoveryContext) -> Self {
        ToolchainResolver {
            context,
            toolchains: OnceLock::new(),
        }
    }

    pub fn context(&self) -> &DiscoveryContext {
        &self.context
    }

    /// Every candidate, including unavailable sentinels.
    ///
    /// Concurrent first callers block until the single discovery run
    /// completes and then all observe the same list.
    pub fn all_toolchains(&self) -> &[ToolchainCandidate] {
        self.toolchains.get_or_init(|| {
            debug!("Discovering toolchains for {}", self.context.os());
            discover_all(&self.context)
        })
    }

    /// First available candidate.
    pub fn default_toolchain(&self) -> Option<&InstalledToolchain> {
        self.all_toolchains()
            .iter()
            .find_map(ToolchainCandidate::as_installed)
    }

    /// First candidate satisfying `requirement`.
    pub fn find_toolchain(&self, requirement: ToolchainRequirement) -> Option<&InstalledToolchain> {
        let found = self
            .all_toolchains()
            .iter()
            .find(|candidate| candidate.meets(requirement))
            .and_then(ToolchainCandidate::as_installed);
        match found {
            Some(toolchain) => debug!("{} satisfied by {}", requirement, toolchain),
            None => debug!("No toolchain satisfies {}", requirement),
        }
        found
    }

    /// Display names of the available candidates, for diagnostics.
    pub fn considered(&self) -> Vec<String> {
        self.all_toolchains()
            .iter()
            .filter(|candidate| candidate.is_available())
            .map(ToolchainCandidate::display_name)
            .collect()
    }
}
