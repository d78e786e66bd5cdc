//! Windows discovery: Visual C++ through the Visual Studio locator, MinGW
//! and Cygwin from their fixed installation directories.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::ToolFamily;
use crate::toolchain::{InstalledToolchain, ToolchainCandidate, VisualStudioVersion};

use super::{sort_latest_first, DiscoveryContext};

/// One candidate per located install of a testable Visual Studio generation.
pub fn find_visual_cpps(context: &DiscoveryContext) -> Vec<ToolchainCandidate> {
    if context.is_disabled(ToolFamily::VisualCpp) {
        debug!("Discovery of {} is disabled", ToolFamily::VisualCpp);
        return vec![ToolchainCandidate::unavailable(ToolFamily::VisualCpp)];
    }

    let mut toolchains: Vec<ToolchainCandidate> = Vec::new();
    for install in context.visual_studio.locate_all() {
        let Some(generation) = VisualStudioVersion::for_version(&install.version) else {
            debug!(
                "Ignoring Visual Studio {} at {}: not a supported generation",
                install.version,
                install.install_dir.display()
            );
            continue;
        };
        debug!(
            "Found Visual Studio {} at {}",
            generation,
            install.install_dir.display()
        );
        toolchains.push(
            InstalledToolchain::visual_cpp(generation, &install, context.arch(), context.os())
                .into(),
        );
    }

    if toolchains.is_empty() {
        toolchains.push(ToolchainCandidate::unavailable(ToolFamily::VisualCpp));
    }
    sort_latest_first(&mut toolchains);
    toolchains
}

fn gpp(root: &Path) -> PathBuf {
    root.join("bin").join("g++.exe")
}

/// MinGW from its installation root.
pub fn find_mingw(context: &DiscoveryContext) -> ToolchainCandidate {
    if context.is_disabled(ToolFamily::MingwGcc) {
        return ToolchainCandidate::unavailable(ToolFamily::MingwGcc);
    }

    let compiler = gpp(&context.locations().mingw);
    if !compiler.is_file() {
        debug!("MinGW not found at {}", compiler.display());
        return ToolchainCandidate::unavailable(ToolFamily::MingwGcc);
    }

    debug!("Found MinGW at {}", compiler.display());
    InstalledToolchain::windows_gcc(ToolFamily::MingwGcc, context.os())
        .in_path(compiler.parent().map(Path::to_path_buf))
        .into()
}

/// Cygwin from its installation roots.
///
/// A 64-bit install only counts when the 32-bit one is present too; the
/// pair becomes a dual-architecture candidate. Otherwise a lone 32-bit
/// install is used.
pub fn find_cygwin(context: &DiscoveryContext) -> ToolchainCandidate {
    let locations = context.locations();
    let compiler32 = gpp(&locations.cygwin);

    if !context.is_disabled(ToolFamily::CygwinGcc64) {
        let compiler64 = gpp(&locations.cygwin64);
        if compiler64.is_file() {
            if !compiler32.is_file() {
                debug!(
                    "Ignoring {}: no 32-bit Cygwin at {}",
                    compiler64.display(),
                    compiler32.display()
                );
                return ToolchainCandidate::unavailable(ToolFamily::CygwinGcc);
            }
            debug!("Found 32 and 64-bit Cygwin");
            let bin32 = locations.cygwin.join("bin");
            let bin64 = locations.cygwin64.join("bin");
            return InstalledToolchain::cygwin_gcc64(bin32, bin64, context.os()).into();
        }
    }

    if context.is_disabled(ToolFamily::CygwinGcc) || !compiler32.is_file() {
        debug!("Cygwin not found at {}", compiler32.display());
        return ToolchainCandidate::unavailable(ToolFamily::CygwinGcc);
    }

    debug!("Found Cygwin at {}", compiler32.display());
    InstalledToolchain::windows_gcc(ToolFamily::CygwinGcc, context.os())
        .in_path([locations.cygwin.join("bin")])
        .into()
}
