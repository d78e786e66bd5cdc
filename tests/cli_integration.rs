//! CLI integration tests for berth.
//!
//! Each test builds a throwaway machine: a directory of fake compilers used
//! as the discovery search path, a project config pointing the fixed
//! locations somewhere empty, and a HOME without a global config.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// A sandboxed host for one test.
struct Machine {
    tmp: TempDir,
}

impl Machine {
    fn new() -> Self {
        let machine = Machine {
            tmp: TempDir::new().unwrap(),
        };
        fs::create_dir_all(machine.bin()).unwrap();
        machine.write_config("");
        machine
    }

    fn root(&self) -> &Path {
        self.tmp.path()
    }

    fn bin(&self) -> PathBuf {
        self.root().join("bin")
    }

    /// Project config with every fixed location pointing at nothing.
    fn write_config(&self, extra: &str) {
        let empty = self.root().join("nowhere");
        let config = format!(
            "[discovery]\n{extra}\n[discovery.locations]\nswift-root = '{}'\nmingw = '{}'\ncygwin = '{}'\ncygwin64 = '{}'\n",
            empty.join("swift").display(),
            empty.join("mingw").display(),
            empty.join("cygwin").display(),
            empty.join("cygwin64").display(),
        );
        let dir = self.root().join(".berth");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), config).unwrap();
    }

    /// A shell script answering the preprocessor probe as GCC `version`.
    fn install_gcc(&self, version: &str) {
        let mut parts = version.split('.');
        let major = parts.next().unwrap_or("0");
        let minor = parts.next().unwrap_or("0");
        let patch = parts.next().unwrap_or("0");
        let script = format!(
            "#!/bin/sh\ncat >/dev/null\necho '#define __GNUC__ {major}'\necho '#define __GNUC_MINOR__ {minor}'\necho '#define __GNUC_PATCHLEVEL__ {patch}'\n"
        );
        self.install("g++", &script);
    }

    fn install(&self, name: &str, script: &str) {
        let path = self.bin().join(name);
        fs::write(&path, script).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }
    }

    /// The berth binary, run inside the sandbox.
    fn berth(&self) -> Command {
        let mut cmd = Command::cargo_bin("berth").unwrap();
        cmd.current_dir(self.root())
            .env("HOME", self.root())
            .env("BERTH_SEARCH_PATH", self.bin())
            .arg("--no-color");
        cmd
    }
}

// ============================================================================
// berth list
// ============================================================================

#[cfg(target_os = "linux")]
#[test]
fn test_list_shows_found_and_missing_families() {
    let machine = Machine::new();
    machine.install_gcc("10.2.1");

    machine
        .berth()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("[OK] gcc 10.2.1"))
        .stdout(predicate::str::contains("[--] swiftc (not found)"))
        .stdout(predicate::str::contains("1 of 2 available"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_list_json() {
    let machine = Machine::new();
    machine.install_gcc("9.3.0");

    let output = machine.berth().args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let list = parsed.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["family"], "gcc");
    assert_eq!(list[0]["version"], "9.3.0");
    assert_eq!(list[0]["unit-test-platform"], "linux");
    assert_eq!(list[1]["family"], "swiftc");
    assert_eq!(list[1]["available"], false);
}

#[cfg(target_os = "linux")]
#[test]
fn test_broken_compiler_is_skipped() {
    let machine = Machine::new();
    machine.install("g++", "#!/bin/sh\necho 'g++: fatal error' >&2\nexit 1\n");

    machine
        .berth()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("[--] gcc (not found)"))
        .stdout(predicate::str::contains("0 of 2 available"));
}

// ============================================================================
// berth default / find
// ============================================================================

#[cfg(target_os = "linux")]
#[test]
fn test_default_toolchain() {
    let machine = Machine::new();
    machine.install_gcc("10.2.1");

    machine
        .berth()
        .arg("default")
        .assert()
        .success()
        .stdout("gcc 10.2.1\n");
}

#[cfg(target_os = "linux")]
#[test]
fn test_default_without_toolchains() {
    let machine = Machine::new();

    machine
        .berth()
        .arg("default")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no toolchain satisfies `AVAILABLE`"))
        .stderr(predicate::str::contains("discovery found no toolchains"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_find_matching_requirement() {
    let machine = Machine::new();
    machine.install_gcc("10.2.1");

    machine
        .berth()
        .args(["find", "gcc-compatible"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("gcc 10.2.1\n"))
        .stdout(predicate::str::contains("kind:    Gcc"))
        .stdout(predicate::str::contains("tests:   linux"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_find_without_match_lists_considered() {
    let machine = Machine::new();
    machine.install_gcc("10.2.1");

    machine
        .berth()
        .args(["find", "VISUALCPP_2015_OR_NEWER"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "no toolchain satisfies `VISUALCPP_2015_OR_NEWER`",
        ))
        .stderr(predicate::str::contains("gcc 10.2.1 does not satisfy it"));
}

#[test]
fn test_find_rejects_unknown_tag() {
    let machine = Machine::new();

    machine
        .berth()
        .args(["find", "FORTRAN"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown toolchain requirement"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_disabled_family_is_not_discovered() {
    let machine = Machine::new();
    machine.install_gcc("10.2.1");
    machine.write_config("disabled = [\"gcc\"]");

    machine
        .berth()
        .arg("default")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "note: discovery of gcc is disabled by configuration",
        ))
        .stderr(predicate::str::contains("help: consider:\n"))
        .stderr(predicate::str::contains("help: Check").not());
}

// ============================================================================
// berth config / env / exec
// ============================================================================

#[cfg(target_os = "linux")]
#[test]
fn test_config_block_for_default() {
    let machine = Machine::new();
    machine.install_gcc("10.2.1");

    machine
        .berth()
        .arg("config")
        .assert()
        .success()
        .stdout("gcc(Gcc)\n");
}

#[cfg(target_os = "linux")]
#[test]
fn test_env_empty_for_plain_gcc() {
    let machine = Machine::new();
    machine.install_gcc("10.2.1");

    machine.berth().arg("env").assert().success().stdout("");
}

#[cfg(target_os = "linux")]
#[test]
fn test_exec_propagates_exit_code() {
    let machine = Machine::new();
    machine.install_gcc("10.2.1");

    machine
        .berth()
        .args(["exec", "--", "/bin/sh", "-c", "exit 3"])
        .assert()
        .code(3);

    machine
        .berth()
        .args(["exec", "--", "/bin/sh", "-c", "echo ran"])
        .assert()
        .success()
        .stdout("ran\n");
}

#[test]
fn test_exec_requires_command() {
    let machine = Machine::new();

    machine.berth().arg("exec").assert().failure();
}

// ============================================================================
// berth completions
// ============================================================================

#[test]
fn test_completions_bash() {
    let machine = Machine::new();

    machine
        .berth()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("berth"));
}
