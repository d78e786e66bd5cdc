//! Capability tags used to select a toolchain.
//!
//! A requirement is an opaque tag supplied by the caller. Each candidate
//! decides for itself whether it satisfies a given tag; tags belonging to a
//! different family are simply not satisfied.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A capability a caller needs from a toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolchainRequirement {
    Available,
    Gcc,
    GccCompatible,
    Clang,
    WindowsGcc,
    VisualCpp,
    VisualCpp2012OrNewer,
    VisualCpp2013,
    VisualCpp2013OrNewer,
    VisualCpp2015,
    VisualCpp2015OrNewer,
    VisualCpp2017,
    VisualCpp2017OrNewer,
    Supports32,
    Supports32And64,
    Swiftc,
    Swiftc3,
    Swiftc4,
}

/// Error returned for an unrecognised requirement tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown toolchain requirement `{0}`")]
pub struct RequirementParseError(pub String);

impl ToolchainRequirement {
    pub const ALL: [ToolchainRequirement; 18] = [
        ToolchainRequirement::Available,
        ToolchainRequirement::Gcc,
        ToolchainRequirement::GccCompatible,
        ToolchainRequirement::Clang,
        ToolchainRequirement::WindowsGcc,
        ToolchainRequirement::VisualCpp,
        ToolchainRequirement::VisualCpp2012OrNewer,
        ToolchainRequirement::VisualCpp2013,
        ToolchainRequirement::VisualCpp2013OrNewer,
        ToolchainRequirement::VisualCpp2015,
        ToolchainRequirement::VisualCpp2015OrNewer,
        ToolchainRequirement::VisualCpp2017,
        ToolchainRequirement::VisualCpp2017OrNewer,
        ToolchainRequirement::Supports32,
        ToolchainRequirement::Supports32And64,
        ToolchainRequirement::Swiftc,
        ToolchainRequirement::Swiftc3,
        ToolchainRequirement::Swiftc4,
    ];

    /// The tag as written on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolchainRequirement::Available => "AVAILABLE",
            ToolchainRequirement::Gcc => "GCC",
            ToolchainRequirement::GccCompatible => "GCC_COMPATIBLE",
            ToolchainRequirement::Clang => "CLANG",
            ToolchainRequirement::WindowsGcc => "WINDOWS_GCC",
            ToolchainRequirement::VisualCpp => "VISUALCPP",
            ToolchainRequirement::VisualCpp2012OrNewer => "VISUALCPP_2012_OR_NEWER",
            ToolchainRequirement::VisualCpp2013 => "VISUALCPP_2013",
            ToolchainRequirement::VisualCpp2013OrNewer => "VISUALCPP_2013_OR_NEWER",
            ToolchainRequirement::VisualCpp2015 => "VISUALCPP_2015",
            ToolchainRequirement::VisualCpp2015OrNewer => "VISUALCPP_2015_OR_NEWER",
            ToolchainRequirement::VisualCpp2017 => "VISUALCPP_2017",
            ToolchainRequirement::VisualCpp2017OrNewer => "VISUALCPP_2017_OR_NEWER",
            ToolchainRequirement::Supports32 => "SUPPORTS_32",
            ToolchainRequirement::Supports32And64 => "SUPPORTS_32_AND_64",
            ToolchainRequirement::Swiftc => "SWIFTC",
            ToolchainRequirement::Swiftc3 => "SWIFTC_3",
            ToolchainRequirement::Swiftc4 => "SWIFTC_4",
        }
    }
}

impl fmt::Display for ToolchainRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolchainRequirement {
    type Err = RequirementParseError;

    /// Tags are matched case-insensitively, and `-` is accepted for `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        ToolchainRequirement::ALL
            .iter()
            .copied()
            .find(|req| req.as_str() == normalized)
            .ok_or_else(|| RequirementParseError(s.to_string()))
    }
}
