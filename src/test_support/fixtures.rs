//! Test fixtures for common test scenarios.
//!
//! Fake compilers are small shell scripts that print what the real probe
//! would parse.

use std::fs;
use std::path::{Path, PathBuf};

/// Write `contents` to `path`, creating parent directories, and mark the
/// file executable.
pub fn write_executable(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }
}

/// Create an empty file at `path`, with parent directories.
pub fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, b"").unwrap();
}

/// Preprocessor output of a GCC `version`, e.g. `"10.2.1"`.
pub fn gcc_defines(version: &str) -> String {
    let mut parts = version.split('.');
    let major = parts.next().unwrap_or("0");
    let minor = parts.next().unwrap_or("0");
    let patch = parts.next().unwrap_or("0");
    format!(
        "#define __GNUC__ {major}\n#define __GNUC_MINOR__ {minor}\n#define __GNUC_PATCHLEVEL__ {patch}\n#define __VERSION__ \"{version}\"\n"
    )
}

/// A shell script named `name` in `dir` that answers the GCC probe as
/// GCC `version` would.
pub fn write_fake_gcc(dir: &Path, name: &str, version: &str) -> PathBuf {
    let path = dir.join(name);
    let script = format!(
        "#!/bin/sh\ncat >/dev/null\ncat <<'EOF'\n{}EOF\necho 'Target: x86_64-linux-gnu' >&2\n",
        gcc_defines(version)
    );
    write_executable(&path, &script);
    path
}

/// A shell script named `swiftc` in `dir` printing a Swift version banner.
pub fn write_fake_swiftc(dir: &Path, version: &str) -> PathBuf {
    let path = dir.join("swiftc");
    let script = format!(
        "#!/bin/sh\necho 'Swift version {version} (swift-{version}-RELEASE)'\necho 'Target: x86_64-unknown-linux-gnu'\n"
    );
    write_executable(&path, &script);
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcc_defines() {
        let defines = gcc_defines("9.3");
        assert!(defines.contains("#define __GNUC__ 9\n"));
        assert!(defines.contains("#define __GNUC_MINOR__ 3\n"));
        assert!(defines.contains("#define __GNUC_PATCHLEVEL__ 0\n"));
    }
}
