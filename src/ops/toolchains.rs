//! Toolchain queries backing the CLI.
//!
//! ## Usage
//!
//! ```bash
//! berth list                 # every candidate, sentinels included
//! berth find VISUALCPP_2015  # first candidate meeting a requirement
//! berth exec -- make         # run with the default toolchain's search path
//! ```

use std::path::PathBuf;
use std::process::ExitStatus;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::{ToolFamily, ToolchainRequirement, VersionNumber};
use crate::resolver::ToolchainResolver;
use crate::toolchain::{InstalledToolchain, ToolchainCandidate};
use crate::util::diagnostic::NoMatchingToolchainError;
use crate::util::process::ProcessBuilder;

/// Serialisable view of one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ToolchainSummary {
    pub id: String,
    pub display_name: String,
    pub family: ToolFamily,
    /// `None` when the version was never probed.
    pub version: Option<VersionNumber>,
    pub available: bool,
    pub path_entries: Vec<PathBuf>,
    /// `None` for Swift and for sentinels.
    pub unit_test_platform: Option<String>,
}

impl ToolchainSummary {
    pub fn from_candidate(candidate: &ToolchainCandidate) -> Self {
        ToolchainSummary {
            id: candidate.id(),
            display_name: candidate.display_name(),
            family: candidate.family(),
            version: Some(candidate.version().clone()).filter(|v| !v.is_unknown()),
            available: candidate.is_available(),
            path_entries: candidate.path_entries().to_vec(),
            unit_test_platform: candidate.unit_test_platform().map(|p| p.to_string()),
        }
    }
}

/// Summaries of every discovered candidate, in resolution order.
pub fn list_toolchains(resolver: &ToolchainResolver) -> Vec<ToolchainSummary> {
    resolver
        .all_toolchains()
        .iter()
        .map(ToolchainSummary::from_candidate)
        .collect()
}

pub fn to_json(summaries: &[ToolchainSummary]) -> Result<String> {
    serde_json::to_string_pretty(summaries).context("failed to serialize toolchain list")
}

/// Human-readable table for `berth list`.
pub fn format_list(summaries: &[ToolchainSummary], verbose: bool) -> String {
    use std::fmt::Write;

    let mut output = String::new();
    if summaries.is_empty() {
        let _ = writeln!(output, "No toolchains discovered");
        return output;
    }

    for summary in summaries {
        let status = if summary.available { "[OK]" } else { "[--]" };
        let _ = write!(output, "  {} {}", status, summary.display_name);
        if !summary.available {
            let _ = write!(output, " (not found)");
        }
        let _ = writeln!(output);

        if verbose && summary.available {
            let _ = writeln!(output, "      id: {}", summary.id);
            if let Some(platform) = &summary.unit_test_platform {
                let _ = writeln!(output, "      unit-test platform: {}", platform);
            }
            for entry in &summary.path_entries {
                let _ = writeln!(output, "      path: {}", entry.display());
            }
        }
    }

    let available = summaries.iter().filter(|s| s.available).count();
    let _ = writeln!(output, "\n{} of {} available", available, summaries.len());
    output
}

/// The toolchain meeting `requirement`, or the default one when `None`.
pub fn select_toolchain(
    resolver: &ToolchainResolver,
    requirement: Option<ToolchainRequirement>,
) -> std::result::Result<&InstalledToolchain, NoMatchingToolchainError> {
    let requirement = requirement.unwrap_or(ToolchainRequirement::Available);
    let found = match requirement {
        ToolchainRequirement::Available => resolver.default_toolchain(),
        _ => resolver.find_toolchain(requirement),
    };
    found.ok_or_else(|| NoMatchingToolchainError {
        requirement,
        considered: resolver.considered(),
    })
}

/// Run `command` with the toolchain's environment active.
///
/// The search path is restored before returning, whatever the outcome.
pub fn exec_with(toolchain: &InstalledToolchain, command: &[String]) -> Result<ExitStatus> {
    let (program, args) = command
        .split_first()
        .context("no command given to run")?;

    let guard = toolchain
        .activate_environment()
        .with_context(|| format!("failed to activate {}", toolchain))?;
    let status = ProcessBuilder::new(program).args(args).status();
    guard
        .deactivate()
        .with_context(|| format!("failed to deactivate {}", toolchain))?;
    status
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::core::OperatingSystem;
    use crate::discovery::{DiscoveryContext, Locations};
    use crate::probe::{CompilerMetadata, SearchResult};
    use crate::test_support::{write_executable, MockMetadataProvider};
    use serial_test::serial;
    use tempfile::TempDir;

    fn resolver(tmp: &TempDir, with_gcc: bool) -> ToolchainResolver {
        let bin = tmp.path().join("bin");
        let mut gcc = MockMetadataProvider::new();
        if with_gcc {
            write_executable(&bin.join("g++"), "#!/bin/sh\n");
            gcc = gcc.with_result(
                bin.join("g++"),
                SearchResult::Available(CompilerMetadata::with_version(VersionNumber::new(&[
                    10, 2, 1,
                ]))),
            );
        }
        let context = DiscoveryContext::new(OperatingSystem::Linux)
            .with_search_path(bin.as_os_str())
            .with_gcc_provider(gcc)
            .with_clang_provider(MockMetadataProvider::new())
            .with_swiftc_provider(MockMetadataProvider::new())
            .with_locations(Locations {
                swift_root: tmp.path().join("swift"),
                ..Locations::default()
            });
        ToolchainResolver::new(context)
    }

    #[test]
    fn test_summaries_include_sentinels() {
        let tmp = TempDir::new().unwrap();
        let summaries = list_toolchains(&resolver(&tmp, true));

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].display_name, "gcc 10.2.1");
        assert_eq!(summaries[0].unit_test_platform.as_deref(), Some("linux"));
        assert!(summaries[0].path_entries.is_empty());
        assert_eq!(summaries[1].family, ToolFamily::Swiftc);
        assert!(!summaries[1].available);
        assert!(summaries[1].version.is_none());

        let text = format_list(&summaries, false);
        assert!(text.contains("[OK] gcc 10.2.1"));
        assert!(text.contains("[--] swiftc (not found)"));
        assert!(text.contains("1 of 2 available"));
    }

    #[test]
    fn test_json_uses_kebab_case() {
        let tmp = TempDir::new().unwrap();
        let json = to_json(&list_toolchains(&resolver(&tmp, true))).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["family"], "gcc");
        assert_eq!(parsed[0]["display-name"], "gcc 10.2.1");
        assert_eq!(parsed[0]["version"], "10.2.1");
        assert_eq!(parsed[1]["available"], false);
        assert!(parsed[1]["unit-test-platform"].is_null());
        assert!(parsed[1]["version"].is_null());
    }

    #[test]
    fn test_select_reports_considered() {
        let tmp = TempDir::new().unwrap();
        let resolver = resolver(&tmp, true);

        assert_eq!(select_toolchain(&resolver, None).unwrap().id(), "gcc");

        let err = select_toolchain(&resolver, Some(ToolchainRequirement::VisualCpp)).unwrap_err();
        assert_eq!(err.requirement, ToolchainRequirement::VisualCpp);
        assert_eq!(err.considered, vec!["gcc 10.2.1"]);
    }

    #[test]
    fn test_select_without_toolchains() {
        let tmp = TempDir::new().unwrap();
        let err = select_toolchain(&resolver(&tmp, false), None).unwrap_err();
        assert!(err.considered.is_empty());
        assert!(err.to_diagnostic().to_string().contains("discovery found no toolchains"));
    }

    #[test]
    #[serial]
    fn test_exec_restores_search_path() {
        let before = std::env::var_os("PATH");
        let toolchain = InstalledToolchain::gcc(VersionNumber::new(&[9]), OperatingSystem::Linux)
            .in_path([PathBuf::from("/opt/berth-test/bin")]);

        let status = exec_with(
            &toolchain,
            &["/bin/sh".to_string(), "-c".to_string(), "exit 3".to_string()],
        )
        .unwrap();

        assert_eq!(status.code(), Some(3));
        assert_eq!(std::env::var_os("PATH"), before);
    }

    #[test]
    fn test_exec_requires_command() {
        let toolchain = InstalledToolchain::gcc(VersionNumber::new(&[9]), OperatingSystem::Linux);
        assert!(exec_with(&toolchain, &[]).is_err());
    }
}
