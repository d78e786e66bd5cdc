//! Swift compiler specifics.

use crate::core::{ToolchainRequirement, VersionNumber};

/// Swift satisfies only the Swift tags; it is not an `AVAILABLE` C toolchain.
pub(crate) fn meets(version: &VersionNumber, requirement: ToolchainRequirement) -> bool {
    match requirement {
        ToolchainRequirement::Swiftc => true,
        ToolchainRequirement::Swiftc3 => version.major() == 3,
        ToolchainRequirement::Swiftc4 => version.major() == 4,
        _ => false,
    }
}
