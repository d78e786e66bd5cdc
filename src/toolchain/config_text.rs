//! Build-script configuration text.
//!
//! Each installed toolchain renders a small declarative block keyed by its
//! id:
//!
//! ```text
//! gcc(Gcc)
//! gcc.path file('file:///opt/gcc-9/bin/')
//! ```
//!
//! Visual C++ carries an `installDir` instead of path entries, and a
//! dual-architecture Cygwin install renders one block per architecture.

use std::fmt::Write;

use crate::core::TargetArch;
use crate::util::fs::directory_uri;

use super::{InstalledKind, InstalledToolchain};

pub(crate) fn render(toolchain: &InstalledToolchain) -> String {
    let id = toolchain.id();
    let kind = toolchain.implementation_kind();
    let mut config = String::new();

    match toolchain.kind() {
        InstalledKind::CygwinGcc64 { cygwin32, cygwin64 } => {
            for (suffix, dir, arch) in [
                ("32", cygwin32, TargetArch::X86),
                ("64", cygwin64, TargetArch::X86_64),
            ] {
                let _ = write!(
                    config,
                    "{id}_{suffix}({kind}) {{\npath file('{}')\ntargets = ['{}']\n}}\n",
                    directory_uri(dir),
                    arch.windows_target(),
                );
            }
        }
        InstalledKind::VisualCpp(details) => {
            let _ = writeln!(config, "{}({})", id, kind);
            if let Some(install_dir) = &details.install_dir {
                let _ = writeln!(config, "{}.installDir = file('{}')", id, directory_uri(install_dir));
            }
        }
        _ => {
            let _ = writeln!(config, "{}({})", id, kind);
            for entry in toolchain.path_entries() {
                let _ = writeln!(config, "{}.path file('{}')", id, directory_uri(entry));
            }
        }
    }

    config
}

#[cfg(all(test, unix))]
mod tests {
    use std::path::PathBuf;

    use crate::core::{OperatingSystem, TargetArch, ToolFamily, VersionNumber};
    use crate::probe::VisualStudioInstall;
    use crate::toolchain::{InstalledToolchain, VisualStudioVersion};

    #[test]
    fn test_gcc_without_path_entries() {
        let gcc = InstalledToolchain::gcc(VersionNumber::new(&[9, 3, 0]), OperatingSystem::Linux);
        assert_eq!(gcc.build_script_config_text(), "gcc(Gcc)\n");
    }

    #[test]
    fn test_clang_with_path_entry() {
        let clang = InstalledToolchain::clang(VersionNumber::new(&[11]), OperatingSystem::Linux)
            .in_path([PathBuf::from("/opt/llvm-11/bin")]);
        assert_eq!(
            clang.build_script_config_text(),
            "clang11(Clang)\nclang11.path file('file:///opt/llvm-11/bin/')\n"
        );
    }

    #[test]
    fn test_swift_lists_every_entry() {
        let swift = InstalledToolchain::swiftc(
            PathBuf::from("/opt/swift/4.0/usr/bin"),
            VersionNumber::new(&[4, 0, 3]),
            OperatingSystem::Linux,
        )
        .in_path([PathBuf::from("/opt/swift/4.0/usr/bin"), PathBuf::from("/usr/bin")]);

        assert_eq!(
            swift.build_script_config_text(),
            "swiftc403(Swiftc)\n\
             swiftc403.path file('file:///opt/swift/4.0/usr/bin/')\n\
             swiftc403.path file('file:///usr/bin/')\n"
        );
    }

    #[test]
    fn test_visual_cpp_install_dir() {
        let install = VisualStudioInstall::new(VersionNumber::new(&[14, 0]), "/vs/14.0");
        let vc = InstalledToolchain::visual_cpp(
            VisualStudioVersion::Vs2015,
            &install,
            TargetArch::X86_64,
            OperatingSystem::Linux,
        );
        assert_eq!(
            vc.build_script_config_text(),
            "visualCpp(VisualCpp)\nvisualCpp.installDir = file('file:///vs/14.0/')\n"
        );
    }

    #[test]
    fn test_dual_cygwin_blocks() {
        let cygwin = InstalledToolchain::cygwin_gcc64(
            PathBuf::from("/cygwin/bin"),
            PathBuf::from("/cygwin64/bin"),
            OperatingSystem::Windows,
        );
        assert_eq!(cygwin.family(), ToolFamily::CygwinGcc64);
        assert_eq!(
            cygwin.build_script_config_text(),
            "gcccygwin64_32(Gcc) {\n\
             path file('file:///cygwin/bin/')\n\
             targets = ['windows_x86']\n\
             }\n\
             gcccygwin64_64(Gcc) {\n\
             path file('file:///cygwin64/bin/')\n\
             targets = ['windows_x86_64']\n\
             }\n"
        );
    }
}
