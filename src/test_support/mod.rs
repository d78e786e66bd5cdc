//! Test utilities and mocks for berth unit tests.
//!
//! The mocks stand in for the two external boundaries of discovery: the
//! compiler probe and the Visual Studio locator.
//!
//! # Example
//!
//! ```rust,ignore
//! use berth::test_support::MockMetadataProvider;
//!
//! let gcc = MockMetadataProvider::new()
//!     .with_result("/usr/bin/g++", SearchResult::unavailable("broken"));
//! let context = DiscoveryContext::new(OperatingSystem::Linux).with_gcc_provider(gcc.clone());
//! // ... run discovery, then inspect gcc.calls()
//! ```

pub mod fixtures;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::probe::{MetadataProvider, SearchResult, VisualStudioInstall, VisualStudioLocator};

// Re-export fixtures for convenience
pub use fixtures::*;

/// Scripted metadata provider.
///
/// Executables without a scripted result probe as unavailable. Clones share
/// the call log, so a clone handed to a discovery context can be inspected
/// afterwards through the original.
#[derive(Debug, Clone, Default)]
pub struct MockMetadataProvider {
    results: HashMap<PathBuf, SearchResult>,
    calls: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockMetadataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the result for `executable`.
    pub fn with_result(mut self, executable: impl Into<PathBuf>, result: SearchResult) -> Self {
        self.results.insert(executable.into(), result);
        self
    }

    /// Executables probed so far, in order.
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }
}

impl MetadataProvider for MockMetadataProvider {
    fn probe(&self, executable: &Path, _args: &[String], _path_entries: &[PathBuf]) -> SearchResult {
        self.calls.lock().unwrap().push(executable.to_path_buf());
        self.results
            .get(executable)
            .cloned()
            .unwrap_or_else(|| {
                SearchResult::unavailable(format!("no scripted result for {}", executable.display()))
            })
    }
}

/// Visual Studio locator returning a fixed list of installs.
#[derive(Debug, Clone, Default)]
pub struct MockVisualStudioLocator {
    installs: Vec<VisualStudioInstall>,
}

impl MockVisualStudioLocator {
    pub fn new(installs: Vec<VisualStudioInstall>) -> Self {
        MockVisualStudioLocator { installs }
    }

    pub fn with_install(mut self, install: VisualStudioInstall) -> Self {
        self.installs.push(install);
        self
    }
}

impl VisualStudioLocator for MockVisualStudioLocator {
    fn locate_all(&self) -> Vec<VisualStudioInstall> {
        self.installs.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::VersionNumber;
    use crate::probe::CompilerMetadata;

    #[test]
    fn test_mock_provider_records_calls() {
        let provider = MockMetadataProvider::new().with_result(
            "/usr/bin/g++",
            SearchResult::Available(CompilerMetadata::with_version(VersionNumber::new(&[9]))),
        );
        let shared = provider.clone();

        assert!(shared.probe(Path::new("/usr/bin/g++"), &[], &[]).is_available());
        assert!(!shared.probe(Path::new("/usr/local/bin/g++"), &[], &[]).is_available());

        assert_eq!(
            provider.calls(),
            vec![PathBuf::from("/usr/bin/g++"), PathBuf::from("/usr/local/bin/g++")]
        );
    }

    #[test]
    fn test_mock_locator() {
        let locator = MockVisualStudioLocator::default()
            .with_install(VisualStudioInstall::new(VersionNumber::new(&[14, 0]), "C:/VS14"));
        assert_eq!(locator.locate_all().len(), 1);
    }
}
