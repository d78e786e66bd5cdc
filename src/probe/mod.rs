//! Compiler probing.
//!
//! A [`MetadataProvider`] runs a candidate executable and reports either
//! its parsed version or a diagnostic explaining why it is not usable.
//! Discovery never treats a failed probe as fatal; the candidate is simply
//! dropped.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use crate::core::{OperatingSystem, VersionNumber};
use crate::util::fs::prepend_search_path;
use crate::util::process::ProcessBuilder;

pub mod gcc;
pub mod swiftc;
pub mod visual_studio;

pub use gcc::{CompilerKind, GccMetadataProvider};
pub use swiftc::SwiftcMetadataProvider;
pub use visual_studio::{VisualStudioInstall, VisualStudioLocator, VswhereLocator};

/// What a successful probe learned about a compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerMetadata {
    /// Parsed compiler version
    pub version: VersionNumber,
    /// Vendor, when the compiler identifies one (e.g. "Apple")
    pub vendor: Option<String>,
    /// Default target triple, when reported
    pub target: Option<String>,
    /// Provider-specific raw values (preprocessor defines, banner lines)
    pub raw: BTreeMap<String, String>,
}

impl CompilerMetadata {
    /// Metadata carrying only a version.
    pub fn with_version(version: VersionNumber) -> Self {
        CompilerMetadata {
            version,
            vendor: None,
            target: None,
            raw: BTreeMap::new(),
        }
    }
}

/// Outcome of probing a single executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    Available(CompilerMetadata),
    Unavailable { diagnostic: String },
}

impl SearchResult {
    pub fn unavailable(diagnostic: impl Into<String>) -> Self {
        SearchResult::Unavailable {
            diagnostic: diagnostic.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, SearchResult::Available(_))
    }

    /// The parsed version, if the probe succeeded.
    pub fn version(&self) -> Option<&VersionNumber> {
        match self {
            SearchResult::Available(metadata) => Some(&metadata.version),
            SearchResult::Unavailable { .. } => None,
        }
    }
}

/// Probes a compiler executable for its version.
pub trait MetadataProvider: Send + Sync {
    /// Probe `executable`.
    ///
    /// `args` are passed in addition to the provider's own arguments and
    /// `path_entries` are prepended to the search path of the probe process
    /// only.
    fn probe(&self, executable: &Path, args: &[String], path_entries: &[PathBuf]) -> SearchResult;
}

/// Run a probe subprocess with empty stdin and a bounded lifetime.
///
/// Every failure mode (spawn error, timeout, non-zero exit) is folded into
/// an `Err` carrying a human-readable diagnostic.
pub(crate) fn run_probe(
    executable: &Path,
    args: &[String],
    path_entries: &[PathBuf],
    timeout: Duration,
) -> Result<Output, String> {
    let mut pb = ProcessBuilder::new(executable).args(args).timeout(timeout);

    if !path_entries.is_empty() {
        let os = OperatingSystem::current();
        let current = std::env::var_os(os.path_var());
        let joined = prepend_search_path(path_entries, current.as_deref())
            .map_err(|e| format!("could not build search path for probe: {}", e))?;
        pb = pb.env(os.path_var(), joined);
    }

    let command = pb.display_command();
    tracing::trace!("probing `{}`", command);

    let output = match pb.exec() {
        Ok(Some(output)) => output,
        Ok(None) => {
            return Err(format!(
                "`{}` did not finish within {}s",
                command,
                timeout.as_secs_f32()
            ))
        }
        Err(e) => return Err(format!("{:#}", e)),
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let first_line = stderr.lines().next().unwrap_or("").trim();
        return Err(if first_line.is_empty() {
            format!("`{}` failed with {}", command, output.status)
        } else {
            format!("`{}` failed with {}: {}", command, output.status, first_line)
        });
    }

    Ok(output)
}
