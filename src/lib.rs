//! Berth - native toolchain discovery and capability resolution
//!
//! This crate locates the C, C++ and Swift toolchains installed on the host
//! (GCC, Clang, Visual C++, MinGW, Cygwin, swiftc), probes their versions,
//! and answers "which toolchain satisfies this requirement?" from an ordered,
//! once-discovered candidate list.

pub mod core;
pub mod discovery;
pub mod ops;
pub mod probe;
pub mod resolver;
pub mod toolchain;
pub mod util;

/// Test utilities and mocks for berth unit tests.
///
/// This module is only available when compiling with `--cfg test`. It
/// provides scripted metadata providers, a fixed Visual Studio locator and
/// fake-compiler fixtures.
#[cfg(test)]
pub mod test_support;

pub use core::{OperatingSystem, ToolFamily, ToolchainRequirement, VersionNumber};
pub use discovery::DiscoveryContext;
pub use resolver::ToolchainResolver;
pub use toolchain::{InstalledToolchain, ToolchainCandidate, ToolchainError};
pub use util::config::Config;
