//! Swift compiler probing.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;

use crate::core::VersionNumber;
use crate::util::config::DEFAULT_PROBE_TIMEOUT_SECS;

use super::{run_probe, CompilerMetadata, MetadataProvider, SearchResult};

static SWIFT_VERSION: OnceLock<Option<Regex>> = OnceLock::new();

fn swift_version_regex() -> Option<&'static Regex> {
    SWIFT_VERSION
        .get_or_init(|| Regex::new(r"Swift version (\d+)\.(\d+)(?:\.(\d+))?").ok())
        .as_ref()
}

/// Runs `swiftc --version` and parses the banner.
#[derive(Debug, Clone)]
pub struct SwiftcMetadataProvider {
    timeout: Duration,
}

impl Default for SwiftcMetadataProvider {
    fn default() -> Self {
        SwiftcMetadataProvider {
            timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
        }
    }
}

impl SwiftcMetadataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Interpret the `--version` banner.
    pub fn parse_output(&self, stdout: &str) -> SearchResult {
        let Some(captures) = swift_version_regex().and_then(|re| re.captures(stdout)) else {
            return SearchResult::unavailable(format!(
                "could not determine Swift version from output: {}",
                stdout.lines().next().unwrap_or("").trim()
            ));
        };

        let component = |i: usize| {
            captures
                .get(i)
                .and_then(|m| m.as_str().parse::<u64>().ok())
                .unwrap_or(0)
        };
        let version = VersionNumber::new(&[component(1), component(2), component(3)]);

        let mut raw = BTreeMap::new();
        if let Some(banner) = stdout.lines().find(|l| l.contains("Swift version")) {
            raw.insert("banner".to_string(), banner.trim().to_string());
        }
        let target = stdout
            .lines()
            .find_map(|l| l.trim().strip_prefix("Target:"))
            .map(|t| t.trim().to_string());

        SearchResult::Available(CompilerMetadata {
            version,
            vendor: stdout.contains("Apple Swift").then(|| "Apple".to_string()),
            target,
            raw,
        })
    }
}

impl MetadataProvider for SwiftcMetadataProvider {
    fn probe(&self, executable: &Path, args: &[String], path_entries: &[PathBuf]) -> SearchResult {
        let mut all_args: Vec<String> = args.to_vec();
        all_args.push("--version".to_string());

        match run_probe(executable, &all_args, path_entries, self.timeout) {
            Ok(output) => {
                // Some releases print the banner on stderr.
                let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
                text.push_str(&String::from_utf8_lossy(&output.stderr));
                self.parse_output(&text)
            }
            Err(diagnostic) => SearchResult::unavailable(diagnostic),
        }
    }
}
