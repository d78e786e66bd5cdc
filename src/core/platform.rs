//! Host operating system and architecture.
//!
//! Discovery is OS-aware: the probe order, the name of the search-path
//! environment variable, executable naming and object-file suffixes all
//! depend on the host. [`OperatingSystem`] is passed explicitly through
//! discovery so that the Windows and macOS code paths can be exercised on
//! any host.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// The operating system a discovery pass runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatingSystem {
    Windows,
    MacOs,
    Linux,
    /// Any other Unix-like system (FreeBSD, Solaris, ...).
    Unix,
}

impl OperatingSystem {
    /// Detect the host operating system.
    pub fn current() -> Self {
        match std::env::consts::OS {
            "windows" => OperatingSystem::Windows,
            "macos" => OperatingSystem::MacOs,
            "linux" => OperatingSystem::Linux,
            _ => OperatingSystem::Unix,
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, OperatingSystem::Windows)
    }

    pub fn is_mac_os(&self) -> bool {
        matches!(self, OperatingSystem::MacOs)
    }

    pub fn is_linux(&self) -> bool {
        matches!(self, OperatingSystem::Linux)
    }

    /// Name of the executable search-path variable.
    ///
    /// Windows environment lookups are case-insensitive but the variable is
    /// conventionally spelled `Path` there.
    pub fn path_var(&self) -> &'static str {
        match self {
            OperatingSystem::Windows => "Path",
            _ => "PATH",
        }
    }

    /// Separator between entries of the search-path variable.
    pub fn path_separator(&self) -> char {
        match self {
            OperatingSystem::Windows => ';',
            _ => ':',
        }
    }

    /// Platform file name of an executable (`g++` becomes `g++.exe` on Windows).
    pub fn executable_name(&self, name: &str) -> String {
        if self.is_windows() && !name.ends_with(".exe") {
            format!("{}.exe", name)
        } else {
            name.to_string()
        }
    }

    /// Object-file suffix produced by GCC-compatible compilers on this host.
    pub fn object_file_suffix(&self) -> &'static str {
        if self.is_windows() {
            ".obj"
        } else {
            ".o"
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OperatingSystem::Windows => "windows",
            OperatingSystem::MacOs => "macos",
            OperatingSystem::Linux => "linux",
            OperatingSystem::Unix => "unix",
        }
    }
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target CPU architecture of a compiler installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetArch {
    X86,
    X86_64,
    Arm64,
}

impl TargetArch {
    /// Architecture of the running host, if it is one we know.
    pub fn host() -> Option<Self> {
        match std::env::consts::ARCH {
            "x86" => Some(TargetArch::X86),
            "x86_64" => Some(TargetArch::X86_64),
            "aarch64" => Some(TargetArch::Arm64),
            _ => None,
        }
    }

    /// Directory name used by the MSVC tool layout (`x86`, `x64`, `arm64`).
    pub fn msvc_dir(&self) -> &'static str {
        match self {
            TargetArch::X86 => "x86",
            TargetArch::X86_64 => "x64",
            TargetArch::Arm64 => "arm64",
        }
    }

    /// Target name used in generated build configuration.
    pub fn windows_target(&self) -> &'static str {
        match self {
            TargetArch::X86 => "windows_x86",
            TargetArch::X86_64 => "windows_x86_64",
            TargetArch::Arm64 => "windows_arm64",
        }
    }
}

/// Coarse platform tag used to classify unit-test binaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitTestPlatform {
    Osx,
    Linux,
    Mingw,
    Cygwin,
    Vs2013,
    Vs2015,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl UnitTestPlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitTestPlatform::Osx => "osx",
            UnitTestPlatform::Linux => "linux",
            UnitTestPlatform::Mingw => "mingw",
            UnitTestPlatform::Cygwin => "cygwin",
            UnitTestPlatform::Vs2013 => "vs2013",
            UnitTestPlatform::Vs2015 => "vs2015",
            UnitTestPlatform::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for UnitTestPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append an object-file suffix to `path`.
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}
