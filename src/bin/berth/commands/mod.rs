//! Command implementations

pub mod completions;
pub mod config;
pub mod default;
pub mod env;
pub mod exec;
pub mod find;
pub mod list;

use anyhow::{Context, Result};

use berth::ops::select_toolchain;
use berth::toolchain::InstalledToolchain;
use berth::util::config::load_config_for;
use berth::util::diagnostic::{emit, suggestions, Diagnostic};
use berth::{DiscoveryContext, ToolchainRequirement, ToolchainResolver};

/// Resolver for the current directory's configuration.
pub fn resolver() -> Result<ToolchainResolver> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let config = load_config_for(&cwd);
    Ok(ToolchainResolver::new(DiscoveryContext::from_config(&config)))
}

/// The selected toolchain; prints a diagnostic and exits 1 when there is none.
pub fn select_or_exit(
    resolver: &ToolchainResolver,
    requirement: Option<ToolchainRequirement>,
    color: bool,
) -> &InstalledToolchain {
    match select_toolchain(resolver, requirement) {
        Ok(toolchain) => toolchain,
        Err(err) => {
            let mut diag = err.to_diagnostic();
            if resolver.context().has_disabled() {
                diag = diag.with_suggestion(suggestions::DISABLED_FAMILY);
            }
            emit(&diag, color);
            for family in resolver.context().disabled() {
                let note = format!("discovery of {} is disabled by configuration", family.as_str());
                emit(&Diagnostic::note(note), color);
            }
            std::process::exit(1);
        }
    }
}
