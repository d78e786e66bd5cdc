//! GCC and Clang probing via preprocessor defines.
//!
//! The compiler is run as `<exe> -dM -E -v -` with empty stdin. stdout then
//! holds every predefined macro and stderr the verbose driver banner,
//! including the `Target:` line.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::VersionNumber;
use crate::util::config::DEFAULT_PROBE_TIMEOUT_SECS;

use super::{run_probe, CompilerMetadata, MetadataProvider, SearchResult};

/// Which GCC-compatible compiler a provider accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompilerKind {
    Gcc,
    Clang,
}

impl CompilerKind {
    fn version_defines(&self) -> [&'static str; 3] {
        match self {
            CompilerKind::Gcc => ["__GNUC__", "__GNUC_MINOR__", "__GNUC_PATCHLEVEL__"],
            CompilerKind::Clang => [
                "__clang_major__",
                "__clang_minor__",
                "__clang_patchlevel__",
            ],
        }
    }

    fn name(&self) -> &'static str {
        match self {
            CompilerKind::Gcc => "GCC",
            CompilerKind::Clang => "Clang",
        }
    }
}

/// Metadata provider for GCC-compatible compilers.
#[derive(Debug, Clone)]
pub struct GccMetadataProvider {
    kind: CompilerKind,
    timeout: Duration,
}

impl GccMetadataProvider {
    pub fn for_gcc() -> Self {
        GccMetadataProvider {
            kind: CompilerKind::Gcc,
            timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
        }
    }

    pub fn for_clang() -> Self {
        GccMetadataProvider {
            kind: CompilerKind::Clang,
            timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn kind(&self) -> CompilerKind {
        self.kind
    }

    /// Interpret the output of `-dM -E -v -`.
    pub fn parse_output(&self, stdout: &str, stderr: &str) -> SearchResult {
        let defines = parse_defines(stdout);

        let is_clang = defines.contains_key("__clang__");
        match self.kind {
            CompilerKind::Gcc if is_clang => {
                return SearchResult::unavailable("XCode g++ is a wrapper around Clang. Treating it as Clang and not GCC.");
            }
            CompilerKind::Clang if !is_clang => {
                return SearchResult::unavailable("compiler does not define `__clang__`; not Clang");
            }
            _ => {}
        }

        let [major_key, minor_key, patch_key] = self.kind.version_defines();
        let Some(major) = defines.get(major_key).and_then(|v| v.parse::<u64>().ok()) else {
            return SearchResult::unavailable(format!(
                "could not determine {} version: `{}` is not defined",
                self.kind.name(),
                major_key
            ));
        };
        let minor = defines
            .get(minor_key)
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);
        let patch = defines
            .get(patch_key)
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        let vendor = defines
            .contains_key("__apple_build_version__")
            .then(|| "Apple".to_string());

        let target = stderr
            .lines()
            .find_map(|line| line.trim().strip_prefix("Target:"))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        SearchResult::Available(CompilerMetadata {
            version: VersionNumber::new(&[major, minor, patch]),
            vendor,
            target,
            raw: defines,
        })
    }
}

impl MetadataProvider for GccMetadataProvider {
    fn probe(&self, executable: &Path, args: &[String], path_entries: &[PathBuf]) -> SearchResult {
        let mut all_args: Vec<String> = args.to_vec();
        all_args.extend(["-dM", "-E", "-v", "-"].map(String::from));

        match run_probe(executable, &all_args, path_entries, self.timeout) {
            Ok(output) => self.parse_output(
                &String::from_utf8_lossy(&output.stdout),
                &String::from_utf8_lossy(&output.stderr),
            ),
            Err(diagnostic) => SearchResult::unavailable(diagnostic),
        }
    }
}

/// Collect `#define NAME VALUE` lines. Function-like macros are skipped.
fn parse_defines(output: &str) -> BTreeMap<String, String> {
    output
        .lines()
        .filter_map(|line| line.trim().strip_prefix("#define "))
        .filter_map(|rest| {
            let mut parts = rest.splitn(2, ' ');
            let name = parts.next()?;
            if name.contains('(') {
                return None;
            }
            let value = parts.next().unwrap_or("").trim();
            Some((name.to_string(), value.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GCC_DEFINES: &str = "#define __STDC__ 1\n\
        #define __GNUC__ 9\n\
        #define __GNUC_MINOR__ 3\n\
        #define __GNUC_PATCHLEVEL__ 0\n\
        #define __x86_64__ 1\n\
        #define __has_include(STR) __has_include__(STR)\n";

    const CLANG_DEFINES: &str = "#define __clang__ 1\n\
        #define __clang_major__ 11\n\
        #define __clang_minor__ 0\n\
        #define __clang_patchlevel__ 3\n\
        #define __GNUC__ 4\n\
        #define __GNUC_MINOR__ 2\n\
        #define __apple_build_version__ 11030032\n";

    #[test]
    fn test_parse_gcc_version() {
        let provider = GccMetadataProvider::for_gcc();
        let stderr = "Using built-in specs.\nTarget: x86_64-linux-gnu\nThread model: posix\n";

        let SearchResult::Available(metadata) = provider.parse_output(GCC_DEFINES, stderr) else {
            panic!("expected gcc to be available");
        };
        assert_eq!(metadata.version, VersionNumber::new(&[9, 3, 0]));
        assert_eq!(metadata.target.as_deref(), Some("x86_64-linux-gnu"));
        assert!(metadata.vendor.is_none());
        assert_eq!(metadata.raw.get("__x86_64__").map(String::as_str), Some("1"));
        assert!(!metadata.raw.keys().any(|k| k.contains('(')));
    }

    #[test]
    fn test_gcc_provider_rejects_clang() {
        let provider = GccMetadataProvider::for_gcc();
        let result = provider.parse_output(CLANG_DEFINES, "");
        assert!(!result.is_available());
    }

    #[test]
    fn test_parse_clang_version() {
        let provider = GccMetadataProvider::for_clang();
        let SearchResult::Available(metadata) = provider.parse_output(CLANG_DEFINES, "") else {
            panic!("expected clang to be available");
        };
        assert_eq!(metadata.version, VersionNumber::new(&[11, 0, 3]));
        assert_eq!(metadata.vendor.as_deref(), Some("Apple"));
    }

    #[test]
    fn test_clang_provider_rejects_gcc() {
        let provider = GccMetadataProvider::for_clang();
        assert!(!provider.parse_output(GCC_DEFINES, "").is_available());
    }

    #[test]
    fn test_unparsable_output_is_unavailable() {
        let provider = GccMetadataProvider::for_gcc();
        let result = provider.parse_output("this is not a compiler\n", "");
        match result {
            SearchResult::Unavailable { diagnostic } => {
                assert!(diagnostic.contains("__GNUC__"), "{}", diagnostic)
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_probe_fake_gcc_script() {
        use crate::test_support::write_fake_gcc;
        use tempfile::TempDir;

        let tmp = TempDir::new().unwrap();
        let gpp = write_fake_gcc(tmp.path(), "g++", "10.2.1");

        let result = GccMetadataProvider::for_gcc().probe(&gpp, &[], &[]);
        assert_eq!(result.version(), Some(&VersionNumber::new(&[10, 2, 1])));
    }
}
