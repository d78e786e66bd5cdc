//! Visual Studio installation discovery.
//!
//! Installations are enumerated with `vswhere.exe`, then each install
//! directory is inspected for the Visual C++ compiler. Two on-disk layouts
//! are recognised:
//!
//! - VS2017 and newer: `VC/Tools/MSVC/<toolset>/bin/Host<host>/<target>/cl.exe`
//! - VS2015 and older: `VC/bin/cl.exe` (x86) and `VC/bin/amd64/cl.exe` (x64)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::{TargetArch, VersionNumber};
use crate::util::config::DEFAULT_PROBE_TIMEOUT_SECS;
use crate::util::fs::sub_directories;
use crate::util::process::ProcessBuilder;

/// Compiler entry point and search-path entries for one target architecture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualCppTools {
    pub compiler: PathBuf,
    pub path: Vec<PathBuf>,
}

/// A located Visual Studio installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualStudioInstall {
    pub version: VersionNumber,
    pub install_dir: PathBuf,
    tools: Vec<(TargetArch, VisualCppTools)>,
}

impl VisualStudioInstall {
    pub fn new(version: VersionNumber, install_dir: impl Into<PathBuf>) -> Self {
        VisualStudioInstall {
            version,
            install_dir: install_dir.into(),
            tools: Vec::new(),
        }
    }

    /// Register the tools for `arch`, replacing any previous entry.
    pub fn with_tools(mut self, arch: TargetArch, tools: VisualCppTools) -> Self {
        self.tools.retain(|(a, _)| *a != arch);
        self.tools.push((arch, tools));
        self
    }

    /// Inspect `install_dir` on disk for compilers usable from `host`.
    pub fn from_layout(version: VersionNumber, install_dir: &Path, host: TargetArch) -> Self {
        let mut install = VisualStudioInstall::new(version, install_dir);
        for (arch, tools) in scan_modern_layout(install_dir, host)
            .into_iter()
            .chain(scan_legacy_layout(install_dir))
        {
            if install.tools_for(arch).is_none() {
                install = install.with_tools(arch, tools);
            }
        }
        install
    }

    fn tools_for(&self, arch: TargetArch) -> Option<&VisualCppTools> {
        self.tools
            .iter()
            .find(|(a, _)| *a == arch)
            .map(|(_, tools)| tools)
    }

    /// The `cl.exe` that targets `arch`, if this install has one.
    pub fn compiler_executable(&self, arch: TargetArch) -> Option<&Path> {
        self.tools_for(arch).map(|tools| tools.compiler.as_path())
    }

    /// Directories that must be on the search path to run the `arch` compiler.
    pub fn path_entries(&self, arch: TargetArch) -> &[PathBuf] {
        self.tools_for(arch)
            .map(|tools| tools.path.as_slice())
            .unwrap_or(&[])
    }

    /// Architectures this install can target.
    #[cfg(test)]
    pub(crate) fn architectures(&self) -> impl Iterator<Item = TargetArch> + '_ {
        self.tools.iter().map(|(arch, _)| *arch)
    }
}

fn scan_modern_layout(install_dir: &Path, host: TargetArch) -> Vec<(TargetArch, VisualCppTools)> {
    let msvc_root = install_dir.join("VC").join("Tools").join("MSVC");
    let Some(toolset) = sub_directories(&msvc_root).into_iter().max_by(|a, b| {
        let version = |p: &PathBuf| {
            p.file_name()
                .map(|n| VersionNumber::parse_or_unknown(&n.to_string_lossy()))
                .unwrap_or_default()
        };
        version(a).cmp(&version(b))
    }) else {
        return Vec::new();
    };

    let host_root = toolset.join("bin").join(format!("Host{}", host.msvc_dir()));
    let host_bin = host_root.join(host.msvc_dir());

    [TargetArch::X86, TargetArch::X86_64, TargetArch::Arm64]
        .into_iter()
        .filter_map(|target| {
            let bin = host_root.join(target.msvc_dir());
            let compiler = bin.join("cl.exe");
            if !compiler.is_file() {
                return None;
            }
            let mut path = vec![bin];
            // Cross compilers load DLLs from the native host directory
            if target != host && host_bin.is_dir() {
                path.push(host_bin.clone());
            }
            Some((target, VisualCppTools { compiler, path }))
        })
        .collect()
}

fn scan_legacy_layout(install_dir: &Path) -> Vec<(TargetArch, VisualCppTools)> {
    let vc_bin = install_dir.join("VC").join("bin");
    let ide = install_dir.join("Common7").join("IDE");

    [
        (TargetArch::X86, vc_bin.clone()),
        (TargetArch::X86_64, vc_bin.join("amd64")),
    ]
    .into_iter()
    .filter_map(|(arch, bin)| {
        let compiler = bin.join("cl.exe");
        if !compiler.is_file() {
            return None;
        }
        let mut path = vec![bin];
        if ide.is_dir() {
            path.push(ide.clone());
        }
        Some((arch, VisualCppTools { compiler, path }))
    })
    .collect()
}

/// Enumerates Visual Studio installations.
pub trait VisualStudioLocator: Send + Sync {
    fn locate_all(&self) -> Vec<VisualStudioInstall>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VswhereInstance {
    installation_path: PathBuf,
    installation_version: String,
}

/// Parse `vswhere -format json` output into (version, install dir) pairs.
pub fn parse_vswhere_output(json: &str) -> Result<Vec<(VersionNumber, PathBuf)>> {
    let instances: Vec<VswhereInstance> =
        serde_json::from_str(json).context("failed to parse vswhere output")?;

    Ok(instances
        .into_iter()
        .map(|i| {
            (
                VersionNumber::parse_or_unknown(&i.installation_version),
                i.installation_path,
            )
        })
        .collect())
}

/// [`VisualStudioLocator`] backed by `vswhere.exe`.
#[derive(Debug, Clone)]
pub struct VswhereLocator {
    vswhere: Option<PathBuf>,
    host: TargetArch,
    timeout: Duration,
}

impl VswhereLocator {
    /// Locate `vswhere.exe` in its standard location or on PATH.
    pub fn new(host: TargetArch) -> Self {
        VswhereLocator {
            vswhere: find_vswhere(),
            host,
            timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn query(&self, vswhere: &Path, args: &[&str]) -> Result<Vec<(VersionNumber, PathBuf)>> {
        let output = ProcessBuilder::new(vswhere)
            .args(args)
            .timeout(self.timeout)
            .exec()?
            .with_context(|| format!("`{}` timed out", vswhere.display()))?;

        if !output.status.success() {
            anyhow::bail!(
                "vswhere failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        parse_vswhere_output(&String::from_utf8_lossy(&output.stdout))
    }
}

impl VisualStudioLocator for VswhereLocator {
    fn locate_all(&self) -> Vec<VisualStudioInstall> {
        let Some(vswhere) = &self.vswhere else {
            tracing::debug!("vswhere.exe not found, no Visual Studio installs located");
            return Vec::new();
        };

        tracing::debug!("Found vswhere at: {}", vswhere.display());

        let mut found: Vec<(VersionNumber, PathBuf)> = Vec::new();
        // `-legacy` cannot be combined with `-products`, so ask twice.
        let queries: [&[&str]; 2] = [
            &["-all", "-products", "*", "-format", "json"],
            &["-legacy", "-format", "json"],
        ];
        for args in queries {
            match self.query(vswhere, args) {
                Ok(instances) => {
                    for (version, dir) in instances {
                        if !found.iter().any(|(_, d)| *d == dir) {
                            found.push((version, dir));
                        }
                    }
                }
                Err(e) => tracing::debug!("{:#}", e),
            }
        }

        found
            .into_iter()
            .map(|(version, dir)| {
                tracing::debug!("Found Visual Studio {} at: {}", version, dir.display());
                VisualStudioInstall::from_layout(version, &dir, self.host)
            })
            .collect()
    }
}

fn find_vswhere() -> Option<PathBuf> {
    let program_files_x86 = std::env::var("ProgramFiles(x86)")
        .unwrap_or_else(|_| "C:\\Program Files (x86)".to_string());

    let standard_path = PathBuf::from(&program_files_x86)
        .join("Microsoft Visual Studio")
        .join("Installer")
        .join("vswhere.exe");

    if standard_path.is_file() {
        return Some(standard_path);
    }

    which::which("vswhere").ok()
}
