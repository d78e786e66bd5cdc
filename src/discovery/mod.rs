//! Toolchain discovery.
//!
//! Each family has its own strategy returning an ordered list of
//! candidates. Strategies searching the executable search path probe every
//! hit and keep only those that answer; fixed-location strategies (MinGW,
//! Cygwin) only check that the compiler file exists. A strategy invoked
//! with `must_find` always yields at least the unavailable sentinel.
//!
//! [`DiscoveryContext`] carries everything a strategy depends on: host OS,
//! the search path, the metadata providers and the Visual Studio locator.
//! Tests swap any of these for fakes.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::core::{OperatingSystem, TargetArch, ToolFamily};
use crate::probe::{
    GccMetadataProvider, MetadataProvider, SwiftcMetadataProvider, VisualStudioLocator,
    VswhereLocator,
};
use crate::toolchain::ToolchainCandidate;
use crate::util::config::Config;

mod gcc;
pub mod search;
mod swift;
mod windows;

pub use gcc::{find_clangs, find_gccs};
pub use swift::find_swiftcs;
pub use windows::{find_cygwin, find_mingw, find_visual_cpps};

/// Environment variable that replaces the search path used for discovery.
pub const SEARCH_PATH_ENV: &str = "BERTH_SEARCH_PATH";

/// Fixed installation roots checked by the location-based strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locations {
    pub mingw: PathBuf,
    pub cygwin: PathBuf,
    pub cygwin64: PathBuf,
    pub swift_root: PathBuf,
}

impl Default for Locations {
    fn default() -> Self {
        Locations {
            mingw: PathBuf::from("C:/MinGW"),
            cygwin: PathBuf::from("C:/cygwin"),
            cygwin64: PathBuf::from("C:/cygwin64"),
            swift_root: PathBuf::from("/opt/swift"),
        }
    }
}

impl Locations {
    /// Defaults with any configured overrides applied.
    pub fn from_config(config: &Config) -> Self {
        let overrides = &config.discovery.locations;
        let defaults = Locations::default();
        Locations {
            mingw: overrides.mingw.clone().unwrap_or(defaults.mingw),
            cygwin: overrides.cygwin.clone().unwrap_or(defaults.cygwin),
            cygwin64: overrides.cygwin64.clone().unwrap_or(defaults.cygwin64),
            swift_root: overrides.swift_root.clone().unwrap_or(defaults.swift_root),
        }
    }
}

/// Inputs shared by every discovery strategy.
pub struct DiscoveryContext {
    os: OperatingSystem,
    arch: TargetArch,
    search_path: Option<OsString>,
    gcc: Box<dyn MetadataProvider>,
    clang: Box<dyn MetadataProvider>,
    swiftc: Box<dyn MetadataProvider>,
    visual_studio: Box<dyn VisualStudioLocator>,
    locations: Locations,
    disabled: Vec<ToolFamily>,
}

impl DiscoveryContext {
    /// Real providers with default settings for `os`.
    pub fn new(os: OperatingSystem) -> Self {
        let arch = TargetArch::host().unwrap_or(TargetArch::X86_64);
        DiscoveryContext {
            os,
            arch,
            search_path: None,
            gcc: Box::new(GccMetadataProvider::for_gcc()),
            clang: Box::new(GccMetadataProvider::for_clang()),
            swiftc: Box::new(SwiftcMetadataProvider::new()),
            visual_studio: Box::new(VswhereLocator::new(arch)),
            locations: Locations::default(),
            disabled: Vec::new(),
        }
    }

    /// Context for the running host, honouring `config` and
    /// [`SEARCH_PATH_ENV`].
    pub fn from_config(config: &Config) -> Self {
        let os = OperatingSystem::current();
        let timeout = config.probe_timeout();
        let mut context = DiscoveryContext::new(os);

        context.gcc = Box::new(GccMetadataProvider::for_gcc().with_timeout(timeout));
        context.clang = Box::new(GccMetadataProvider::for_clang().with_timeout(timeout));
        context.swiftc = Box::new(SwiftcMetadataProvider::new().with_timeout(timeout));
        context.visual_studio = Box::new(VswhereLocator::new(context.arch).with_timeout(timeout));
        context.locations = Locations::from_config(config);
        context.disabled = config.discovery.disabled.clone();
        context.search_path = std::env::var_os(SEARCH_PATH_ENV);
        context
    }

    pub fn with_search_path(mut self, search_path: impl Into<OsString>) -> Self {
        self.search_path = Some(search_path.into());
        self
    }

    pub fn with_arch(mut self, arch: TargetArch) -> Self {
        self.arch = arch;
        self
    }

    pub fn with_gcc_provider(mut self, provider: impl MetadataProvider + 'static) -> Self {
        self.gcc = Box::new(provider);
        self
    }

    pub fn with_clang_provider(mut self, provider: impl MetadataProvider + 'static) -> Self {
        self.clang = Box::new(provider);
        self
    }

    pub fn with_swiftc_provider(mut self, provider: impl MetadataProvider + 'static) -> Self {
        self.swiftc = Box::new(provider);
        self
    }

    pub fn with_visual_studio_locator(
        mut self,
        locator: impl VisualStudioLocator + 'static,
    ) -> Self {
        self.visual_studio = Box::new(locator);
        self
    }

    pub fn with_locations(mut self, locations: Locations) -> Self {
        self.locations = locations;
        self
    }

    pub fn with_disabled(mut self, families: impl IntoIterator<Item = ToolFamily>) -> Self {
        self.disabled.extend(families);
        self
    }

    pub fn os(&self) -> OperatingSystem {
        self.os
    }

    pub fn arch(&self) -> TargetArch {
        self.arch
    }

    pub fn locations(&self) -> &Locations {
        &self.locations
    }

    /// The search path to scan: the override if set, else the process value.
    pub fn search_path(&self) -> OsString {
        self.search_path
            .clone()
            .or_else(|| std::env::var_os(self.os.path_var()))
            .unwrap_or_default()
    }

    pub fn is_disabled(&self, family: ToolFamily) -> bool {
        self.disabled.contains(&family)
    }

    /// Families turned off by configuration.
    pub fn disabled(&self) -> &[ToolFamily] {
        &self.disabled
    }

    /// Whether configuration turned off any family.
    pub fn has_disabled(&self) -> bool {
        !self.disabled.is_empty()
    }
}

/// Run every strategy for the context's OS, in priority order.
///
/// - Windows: Visual C++, MinGW, Cygwin
/// - macOS: Clang, GCC, Swift
/// - other: GCC, Clang, Swift
pub fn discover_all(context: &DiscoveryContext) -> Vec<ToolchainCandidate> {
    let mut toolchains = Vec::new();

    match context.os() {
        OperatingSystem::Windows => {
            toolchains.extend(find_visual_cpps(context));
            toolchains.push(find_mingw(context));
            toolchains.push(find_cygwin(context));
        }
        OperatingSystem::MacOs => {
            toolchains.extend(find_clangs(context, true));
            toolchains.extend(find_gccs(context, false));
            toolchains.extend(find_swiftcs(context));
        }
        OperatingSystem::Linux | OperatingSystem::Unix => {
            toolchains.extend(find_gccs(context, true));
            toolchains.extend(find_clangs(context, false));
            toolchains.extend(find_swiftcs(context));
        }
    }

    tracing::debug!(
        "Discovered {} toolchain candidates ({} available)",
        toolchains.len(),
        toolchains.iter().filter(|t| t.is_available()).count()
    );
    toolchains
}

/// Newest first; equal versions keep discovery order.
pub(crate) fn sort_latest_first(toolchains: &mut [ToolchainCandidate]) {
    toolchains.sort_by(|a, b| b.version().cmp(a.version()));
}

pub(crate) fn sentinel_if(must_find: bool, family: ToolFamily) -> Vec<ToolchainCandidate> {
    if must_find {
        vec![ToolchainCandidate::unavailable(family)]
    } else {
        Vec::new()
    }
}
