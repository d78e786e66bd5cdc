//! Visual C++ specifics.

use std::fmt;
use std::path::PathBuf;

use crate::core::{TargetArch, ToolchainRequirement, UnitTestPlatform, VersionNumber};
use crate::probe::VisualStudioInstall;

/// Visual Studio generations that discovery accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VisualStudioVersion {
    Vs2012,
    Vs2013,
    Vs2015,
    Vs2017,
}

impl VisualStudioVersion {
    pub const ALL: [VisualStudioVersion; 4] = [
        VisualStudioVersion::Vs2012,
        VisualStudioVersion::Vs2013,
        VisualStudioVersion::Vs2015,
        VisualStudioVersion::Vs2017,
    ];

    pub fn year(&self) -> u16 {
        match self {
            VisualStudioVersion::Vs2012 => 2012,
            VisualStudioVersion::Vs2013 => 2013,
            VisualStudioVersion::Vs2015 => 2015,
            VisualStudioVersion::Vs2017 => 2017,
        }
    }

    /// Product version of this generation (`14.0` for 2015).
    pub fn version(&self) -> VersionNumber {
        let major = match self {
            VisualStudioVersion::Vs2012 => 11,
            VisualStudioVersion::Vs2013 => 12,
            VisualStudioVersion::Vs2015 => 14,
            VisualStudioVersion::Vs2017 => 15,
        };
        VersionNumber::new(&[major, 0])
    }

    /// The generation whose major version matches `version`.
    pub fn for_version(version: &VersionNumber) -> Option<Self> {
        if version.is_unknown() {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|vs| vs.version().major() == version.major())
    }
}

impl fmt::Display for VisualStudioVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.year(), self.version())
    }
}

/// What a Visual C++ candidate knows about its installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualCppDetails {
    pub generation: VisualStudioVersion,
    /// Full version reported by the installer (e.g. `15.9.28307.1300`)
    pub install_version: VersionNumber,
    pub install_dir: Option<PathBuf>,
    pub cpp_compiler: Option<PathBuf>,
    pub arch: TargetArch,
}

impl VisualCppDetails {
    pub fn from_install(
        generation: VisualStudioVersion,
        install: &VisualStudioInstall,
        arch: TargetArch,
    ) -> Self {
        VisualCppDetails {
            generation,
            install_version: install.version.clone(),
            install_dir: Some(install.install_dir.clone()),
            cpp_compiler: install.compiler_executable(arch).map(PathBuf::from),
            arch,
        }
    }
}

pub(crate) fn meets(version: &VersionNumber, requirement: ToolchainRequirement) -> bool {
    use ToolchainRequirement::*;
    use VisualStudioVersion::*;

    match requirement {
        Available | VisualCpp | Supports32 | Supports32And64 => true,
        VisualCpp2012OrNewer => *version >= Vs2012.version(),
        VisualCpp2013 => *version == Vs2013.version(),
        VisualCpp2013OrNewer => *version >= Vs2013.version(),
        VisualCpp2015 => *version == Vs2015.version(),
        VisualCpp2015OrNewer => *version >= Vs2015.version(),
        VisualCpp2017 => *version == Vs2017.version(),
        VisualCpp2017OrNewer => *version >= Vs2017.version(),
        _ => false,
    }
}

pub(crate) fn unit_test_platform(version: &VersionNumber) -> UnitTestPlatform {
    match version.major() {
        12 => UnitTestPlatform::Vs2013,
        14 => UnitTestPlatform::Vs2015,
        _ => UnitTestPlatform::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_versions() {
        assert_eq!(VisualStudioVersion::Vs2015.version(), VersionNumber::new(&[14]));
        assert_eq!(VisualStudioVersion::Vs2017.to_string(), "2017 (15.0)");
    }

    #[test]
    fn test_for_version_matches_major() {
        assert_eq!(
            VisualStudioVersion::for_version(&VersionNumber::new(&[15, 9, 28307])),
            Some(VisualStudioVersion::Vs2017)
        );
        assert_eq!(
            VisualStudioVersion::for_version(&VersionNumber::new(&[12, 0])),
            Some(VisualStudioVersion::Vs2013)
        );
        // VS2010 and VS2019 are not testable generations
        assert!(VisualStudioVersion::for_version(&VersionNumber::new(&[10, 0])).is_none());
        assert!(VisualStudioVersion::for_version(&VersionNumber::new(&[16, 4])).is_none());
        assert!(VisualStudioVersion::for_version(&VersionNumber::UNKNOWN).is_none());
    }

    #[test]
    fn test_year_rules() {
        let vs2015 = VisualStudioVersion::Vs2015.version();
        assert!(meets(&vs2015, ToolchainRequirement::VisualCpp2015));
        assert!(meets(&vs2015, ToolchainRequirement::VisualCpp2015OrNewer));
        assert!(meets(&vs2015, ToolchainRequirement::VisualCpp2013OrNewer));
        assert!(meets(&vs2015, ToolchainRequirement::VisualCpp2012OrNewer));
        assert!(!meets(&vs2015, ToolchainRequirement::VisualCpp2013));
        assert!(!meets(&vs2015, ToolchainRequirement::VisualCpp2017));
        assert!(!meets(&vs2015, ToolchainRequirement::VisualCpp2017OrNewer));
        assert!(meets(&vs2015, ToolchainRequirement::Supports32And64));
        assert!(!meets(&vs2015, ToolchainRequirement::GccCompatible));
        assert!(!meets(&vs2015, ToolchainRequirement::Swiftc));
    }

    #[test]
    fn test_unit_test_platform() {
        assert_eq!(
            unit_test_platform(&VisualStudioVersion::Vs2013.version()),
            UnitTestPlatform::Vs2013
        );
        assert_eq!(
            unit_test_platform(&VisualStudioVersion::Vs2015.version()),
            UnitTestPlatform::Vs2015
        );
        assert_eq!(
            unit_test_platform(&VisualStudioVersion::Vs2017.version()),
            UnitTestPlatform::Unknown
        );
    }
}
