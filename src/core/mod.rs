//! Core value types shared by discovery and resolution.

pub mod family;
pub mod platform;
pub mod requirement;
pub mod version;

pub use family::ToolFamily;
pub use platform::{OperatingSystem, TargetArch, UnitTestPlatform};
pub use requirement::{RequirementParseError, ToolchainRequirement};
pub use version::{VersionNumber, VersionParseError};
