//! Toolchain candidates.
//!
//! A [`ToolchainCandidate`] is either an installed toolchain or the
//! [`UnavailableToolchain`] sentinel standing in for a family that was
//! searched but not found. Installed toolchains are a closed set of shapes
//! ([`InstalledKind`]); the shared contract (display names, requirement
//! matching, environment activation, configuration text) is implemented
//! once over that set.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::core::platform::with_suffix;
use crate::core::{
    OperatingSystem, TargetArch, ToolFamily, ToolchainRequirement, UnitTestPlatform,
    VersionNumber,
};
use crate::probe::VisualStudioInstall;

pub mod config_text;
pub mod environment;
mod error;
pub mod gcc;
pub mod msvc;
pub mod swift;

pub use environment::ActivationGuard;
pub use error::ToolchainError;
pub use msvc::{VisualCppDetails, VisualStudioVersion};

static UNKNOWN_VERSION: VersionNumber = VersionNumber::UNKNOWN;

/// A discovered toolchain, or the sentinel for a family that was not found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolchainCandidate {
    Installed(InstalledToolchain),
    Unavailable(UnavailableToolchain),
}

/// Placeholder for a mandatory family with no usable installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnavailableToolchain {
    family: ToolFamily,
}

impl UnavailableToolchain {
    pub fn new(family: ToolFamily) -> Self {
        UnavailableToolchain { family }
    }

    pub fn family(&self) -> ToolFamily {
        self.family
    }
}

/// Family-specific shape of an installed toolchain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstalledKind {
    Gcc,
    Clang,
    /// MinGW or a single-architecture Cygwin install.
    WindowsGcc,
    /// Cygwin with both the 32-bit and the 64-bit toolchain installed.
    CygwinGcc64 {
        cygwin32: PathBuf,
        cygwin64: PathBuf,
    },
    VisualCpp(VisualCppDetails),
    Swiftc {
        bin_dir: PathBuf,
    },
}

/// A toolchain that discovery located and, where applicable, probed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledToolchain {
    family: ToolFamily,
    version: VersionNumber,
    path_entries: Vec<PathBuf>,
    os: OperatingSystem,
    kind: InstalledKind,
}

impl InstalledToolchain {
    fn new(family: ToolFamily, version: VersionNumber, os: OperatingSystem, kind: InstalledKind) -> Self {
        InstalledToolchain {
            family,
            version,
            path_entries: Vec::new(),
            os,
            kind,
        }
    }

    pub fn gcc(version: VersionNumber, os: OperatingSystem) -> Self {
        Self::new(ToolFamily::Gcc, version, os, InstalledKind::Gcc)
    }

    pub fn clang(version: VersionNumber, os: OperatingSystem) -> Self {
        Self::new(ToolFamily::Clang, version, os, InstalledKind::Clang)
    }

    /// MinGW or single-architecture Cygwin; the version is never probed.
    pub fn windows_gcc(family: ToolFamily, os: OperatingSystem) -> Self {
        Self::new(family, VersionNumber::UNKNOWN, os, InstalledKind::WindowsGcc)
    }

    /// Dual-architecture Cygwin given the two `bin` directories.
    pub fn cygwin_gcc64(cygwin32: PathBuf, cygwin64: PathBuf, os: OperatingSystem) -> Self {
        let entry = cygwin64.clone();
        Self::new(
            ToolFamily::CygwinGcc64,
            VersionNumber::UNKNOWN,
            os,
            InstalledKind::CygwinGcc64 { cygwin32, cygwin64 },
        )
        .in_path([entry])
    }

    /// Visual C++ from a located install, targeting `arch`.
    pub fn visual_cpp(
        generation: VisualStudioVersion,
        install: &VisualStudioInstall,
        arch: TargetArch,
        os: OperatingSystem,
    ) -> Self {
        let details = VisualCppDetails::from_install(generation, install, arch);
        Self::new(
            ToolFamily::VisualCpp,
            generation.version(),
            os,
            InstalledKind::VisualCpp(details),
        )
        .in_path(install.path_entries(arch).iter().cloned())
    }

    pub fn swiftc(bin_dir: PathBuf, version: VersionNumber, os: OperatingSystem) -> Self {
        Self::new(ToolFamily::Swiftc, version, os, InstalledKind::Swiftc { bin_dir })
    }

    /// Record directories that must precede the search path.
    pub fn in_path(mut self, entries: impl IntoIterator<Item = PathBuf>) -> Self {
        self.path_entries.extend(entries);
        self
    }

    pub fn family(&self) -> ToolFamily {
        self.family
    }

    pub fn version(&self) -> &VersionNumber {
        &self.version
    }

    pub fn kind(&self) -> &InstalledKind {
        &self.kind
    }

    pub fn os(&self) -> OperatingSystem {
        self.os
    }

    pub fn path_entries(&self) -> &[PathBuf] {
        &self.path_entries
    }

    pub fn is_gcc_compatible(&self) -> bool {
        matches!(
            self.kind,
            InstalledKind::Gcc
                | InstalledKind::Clang
                | InstalledKind::WindowsGcc
                | InstalledKind::CygwinGcc64 { .. }
        )
    }

    pub fn is_gcc(&self) -> bool {
        self.is_gcc_compatible() && !matches!(self.kind, InstalledKind::Clang)
    }

    pub fn is_windows_gcc(&self) -> bool {
        matches!(
            self.kind,
            InstalledKind::WindowsGcc | InstalledKind::CygwinGcc64 { .. }
        )
    }

    pub fn is_visual_cpp(&self) -> bool {
        matches!(self.kind, InstalledKind::VisualCpp(_))
    }

    pub fn display_name(&self) -> String {
        match &self.kind {
            InstalledKind::VisualCpp(details) => {
                format!("{} {}", self.family.display_label(), details.generation)
            }
            _ if self.version.is_unknown() => self.family.display_label().to_string(),
            _ => format!("{} {}", self.family.display_label(), self.version),
        }
    }

    /// Display name with the trailing version removed.
    pub fn type_display_name(&self) -> String {
        static TRAILING_VERSION: OnceLock<Option<Regex>> = OnceLock::new();
        let display = self.display_name();
        match TRAILING_VERSION
            .get_or_init(|| Regex::new(r"\s+\d+(\.\d+)*(\s+\(\d+(\.\d+)*\))?$").ok())
        {
            Some(re) => re.replace(&display, "").into_owned(),
            None => display,
        }
    }

    /// Short identifier used to name generated configuration blocks.
    pub fn id(&self) -> String {
        match self.kind {
            InstalledKind::Gcc => "gcc".to_string(),
            InstalledKind::VisualCpp(_) => "visualCpp".to_string(),
            _ => strip_non_word(&self.display_name()),
        }
    }

    pub fn instance_display_name(&self) -> String {
        let kind = match self.kind {
            InstalledKind::Clang => "Clang",
            InstalledKind::VisualCpp(_) => "Visual Studio",
            InstalledKind::Swiftc { .. } => "Swiftc",
            _ => "GNU GCC",
        };
        format!("Tool chain '{}' ({})", self.id(), kind)
    }

    /// Name of the build-script type this toolchain is declared with.
    pub fn implementation_kind(&self) -> &'static str {
        match self.kind {
            InstalledKind::Clang => "Clang",
            InstalledKind::VisualCpp(_) => "VisualCpp",
            InstalledKind::Swiftc { .. } => "Swiftc",
            _ => "Gcc",
        }
    }

    /// Total: requirements of other families are simply not met.
    pub fn meets(&self, requirement: ToolchainRequirement) -> bool {
        match &self.kind {
            InstalledKind::Gcc => gcc::gcc_meets(requirement),
            InstalledKind::Clang => gcc::clang_meets(&self.version, self.os, requirement),
            InstalledKind::WindowsGcc | InstalledKind::CygwinGcc64 { .. } => {
                gcc::windows_gcc_meets(self.family, requirement)
            }
            InstalledKind::VisualCpp(_) => msvc::meets(&self.version, requirement),
            InstalledKind::Swiftc { .. } => swift::meets(&self.version, requirement),
        }
    }

    /// Coarse platform tag for unit-test binaries; `None` for Swift.
    pub fn unit_test_platform(&self) -> Option<UnitTestPlatform> {
        let platform = match &self.kind {
            InstalledKind::Swiftc { .. } => return None,
            InstalledKind::VisualCpp(_) => msvc::unit_test_platform(&self.version),
            InstalledKind::WindowsGcc | InstalledKind::CygwinGcc64 { .. } => {
                match self.display_name().as_str() {
                    "mingw" => UnitTestPlatform::Mingw,
                    "gcc cygwin" => UnitTestPlatform::Cygwin,
                    _ => UnitTestPlatform::Unknown,
                }
            }
            InstalledKind::Gcc | InstalledKind::Clang => match self.os {
                OperatingSystem::MacOs => UnitTestPlatform::Osx,
                OperatingSystem::Linux => UnitTestPlatform::Linux,
                _ => UnitTestPlatform::Unknown,
            },
        };
        Some(platform)
    }

    /// Object file produced from `path`.
    pub fn object_file(&self, path: &Path) -> PathBuf {
        let suffix = if self.is_visual_cpp() {
            ".obj"
        } else {
            self.os.object_file_suffix()
        };
        with_suffix(path, suffix)
    }

    /// Resolve a GCC-compatible tool: inside the first path entry when there
    /// is one, otherwise on the search path.
    fn find(&self, tool: &str) -> Option<PathBuf> {
        let name = self.os.executable_name(tool);
        match self.path_entries.first() {
            Some(dir) => Some(dir.join(name)),
            None => which::which(&name).ok(),
        }
    }

    pub fn c_compiler(&self) -> Option<PathBuf> {
        match &self.kind {
            InstalledKind::Clang => self.find("clang"),
            InstalledKind::VisualCpp(details) => details.cpp_compiler.clone(),
            InstalledKind::Swiftc { .. } => None,
            _ => self.find("gcc"),
        }
    }

    pub fn cpp_compiler(&self) -> Option<PathBuf> {
        match &self.kind {
            InstalledKind::Clang => self.find("clang++"),
            InstalledKind::VisualCpp(details) => details.cpp_compiler.clone(),
            InstalledKind::Swiftc { .. } => None,
            _ => self.find("g++"),
        }
    }

    /// GCC-compatible toolchains link with the C compiler driver.
    pub fn linker(&self) -> Option<PathBuf> {
        if self.is_gcc_compatible() {
            self.c_compiler()
        } else {
            None
        }
    }

    pub fn static_lib_archiver(&self) -> Option<PathBuf> {
        if self.is_gcc_compatible() {
            self.find("ar")
        } else {
            None
        }
    }

    /// A tool in the Swift `bin` directory.
    pub fn tool(&self, name: &str) -> Option<PathBuf> {
        match &self.kind {
            InstalledKind::Swiftc { bin_dir } => Some(bin_dir.join(self.os.executable_name(name))),
            _ => None,
        }
    }

    pub fn install_dir(&self) -> Option<&Path> {
        match &self.kind {
            InstalledKind::VisualCpp(details) => details.install_dir.as_deref(),
            _ => None,
        }
    }

    /// Environment assignments needed to run binaries built by this toolchain.
    pub fn runtime_environment(&self) -> Vec<String> {
        match self.kind {
            InstalledKind::WindowsGcc
            | InstalledKind::CygwinGcc64 { .. }
            | InstalledKind::Swiftc { .. } => {
                environment::runtime_path_assignment(self.os, &self.path_entries)
            }
            _ => Vec::new(),
        }
    }

    pub fn activate_environment(&self) -> Result<ActivationGuard, ToolchainError> {
        environment::activate(&self.display_name(), self.os, &self.path_entries)
    }

    pub fn build_script_config_text(&self) -> String {
        config_text::render(self)
    }
}

impl ToolchainCandidate {
    pub fn unavailable(family: ToolFamily) -> Self {
        ToolchainCandidate::Unavailable(UnavailableToolchain::new(family))
    }

    pub fn family(&self) -> ToolFamily {
        match self {
            ToolchainCandidate::Installed(t) => t.family(),
            ToolchainCandidate::Unavailable(u) => u.family(),
        }
    }

    pub fn version(&self) -> &VersionNumber {
        match self {
            ToolchainCandidate::Installed(t) => t.version(),
            ToolchainCandidate::Unavailable(_) => &UNKNOWN_VERSION,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, ToolchainCandidate::Installed(_))
    }

    pub fn as_installed(&self) -> Option<&InstalledToolchain> {
        match self {
            ToolchainCandidate::Installed(t) => Some(t),
            ToolchainCandidate::Unavailable(_) => None,
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            ToolchainCandidate::Installed(t) => t.display_name(),
            ToolchainCandidate::Unavailable(u) => u.family().display_label().to_string(),
        }
    }

    pub fn id(&self) -> String {
        match self {
            ToolchainCandidate::Installed(t) => t.id(),
            ToolchainCandidate::Unavailable(_) => strip_non_word(&self.display_name()),
        }
    }

    pub fn meets(&self, requirement: ToolchainRequirement) -> bool {
        match self {
            ToolchainCandidate::Installed(t) => t.meets(requirement),
            ToolchainCandidate::Unavailable(_) => false,
        }
    }

    pub fn unit_test_platform(&self) -> Option<UnitTestPlatform> {
        self.as_installed().and_then(|t| t.unit_test_platform())
    }

    pub fn path_entries(&self) -> &[PathBuf] {
        match self {
            ToolchainCandidate::Installed(t) => t.path_entries(),
            ToolchainCandidate::Unavailable(_) => &[],
        }
    }

    pub fn runtime_environment(&self) -> Vec<String> {
        self.as_installed()
            .map(|t| t.runtime_environment())
            .unwrap_or_default()
    }

    /// Fails with [`ToolchainError::Unavailable`] for the sentinel.
    pub fn activate_environment(&self) -> Result<ActivationGuard, ToolchainError> {
        match self {
            ToolchainCandidate::Installed(t) => t.activate_environment(),
            ToolchainCandidate::Unavailable(u) => Err(ToolchainError::Unavailable {
                family: u.family(),
            }),
        }
    }

    pub fn build_script_config_text(&self) -> Result<String, ToolchainError> {
        match self {
            ToolchainCandidate::Installed(t) => Ok(t.build_script_config_text()),
            ToolchainCandidate::Unavailable(u) => Err(ToolchainError::Unavailable {
                family: u.family(),
            }),
        }
    }
}

impl From<InstalledToolchain> for ToolchainCandidate {
    fn from(toolchain: InstalledToolchain) -> Self {
        ToolchainCandidate::Installed(toolchain)
    }
}

impl fmt::Display for ToolchainCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

impl fmt::Display for InstalledToolchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

fn strip_non_word(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}
