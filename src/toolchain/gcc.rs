//! GCC-compatible capability rules.
//!
//! The layering is: every GCC-compatible toolchain (GCC, Clang, the Windows
//! GCC ports) satisfies `GCC_COMPATIBLE`; the GCC ports additionally
//! satisfy `GCC`; the Windows ports add `WINDOWS_GCC` and restrict the
//! 32/64-bit rules.

use crate::core::{OperatingSystem, ToolFamily, ToolchainRequirement, VersionNumber};

pub(crate) fn gcc_meets(requirement: ToolchainRequirement) -> bool {
    matches!(
        requirement,
        ToolchainRequirement::Gcc
            | ToolchainRequirement::GccCompatible
            | ToolchainRequirement::Available
            | ToolchainRequirement::Supports32
            | ToolchainRequirement::Supports32And64
    )
}

pub(crate) fn windows_gcc_meets(family: ToolFamily, requirement: ToolchainRequirement) -> bool {
    match requirement {
        ToolchainRequirement::Supports32 | ToolchainRequirement::WindowsGcc => true,
        ToolchainRequirement::Supports32And64 => family == ToolFamily::CygwinGcc64,
        other => gcc_meets(other),
    }
}

/// Clang on macOS 10 and later no longer builds 32-bit binaries.
pub(crate) fn clang_meets(
    version: &VersionNumber,
    os: OperatingSystem,
    requirement: ToolchainRequirement,
) -> bool {
    match requirement {
        ToolchainRequirement::Available
        | ToolchainRequirement::Clang
        | ToolchainRequirement::GccCompatible => true,
        ToolchainRequirement::Supports32 | ToolchainRequirement::Supports32And64 => {
            !os.is_mac_os() || *version < VersionNumber::new(&[10, 0, 0])
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcc_rules() {
        assert!(gcc_meets(ToolchainRequirement::Gcc));
        assert!(gcc_meets(ToolchainRequirement::Supports32And64));
        assert!(!gcc_meets(ToolchainRequirement::WindowsGcc));
        assert!(!gcc_meets(ToolchainRequirement::Clang));
        assert!(!gcc_meets(ToolchainRequirement::VisualCpp2015));
    }

    #[test]
    fn test_windows_gcc_rules() {
        for family in [ToolFamily::MingwGcc, ToolFamily::CygwinGcc] {
            assert!(windows_gcc_meets(family, ToolchainRequirement::WindowsGcc));
            assert!(windows_gcc_meets(family, ToolchainRequirement::Supports32));
            assert!(windows_gcc_meets(family, ToolchainRequirement::Gcc));
            assert!(!windows_gcc_meets(family, ToolchainRequirement::Supports32And64));
        }
        assert!(windows_gcc_meets(
            ToolFamily::CygwinGcc64,
            ToolchainRequirement::Supports32And64
        ));
    }

    #[test]
    fn test_clang_32_bit_on_mac() {
        let old = VersionNumber::new(&[9, 1]);
        let new = VersionNumber::new(&[11, 0, 3]);

        assert!(clang_meets(&old, OperatingSystem::MacOs, ToolchainRequirement::Supports32));
        assert!(!clang_meets(&new, OperatingSystem::MacOs, ToolchainRequirement::Supports32));
        assert!(clang_meets(&new, OperatingSystem::Linux, ToolchainRequirement::Supports32And64));
        assert!(!clang_meets(&new, OperatingSystem::Linux, ToolchainRequirement::Gcc));
    }
}
