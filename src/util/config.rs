//! Configuration file support for Berth.
//!
//! Berth supports two configuration file locations:
//! - Global: `~/.berth/config.toml` - User-wide defaults
//! - Project: `.berth/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::ToolFamily;

/// Default time a single probe subprocess may run before it is killed.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 30;

/// Berth configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Discovery settings
    pub discovery: DiscoveryConfig,
}

/// Discovery-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DiscoveryConfig {
    /// Per-probe subprocess timeout in seconds
    pub probe_timeout_secs: Option<u64>,

    /// Families that are never probed
    pub disabled: Vec<ToolFamily>,

    /// Fixed installation locations
    pub locations: LocationsConfig,
}

/// Overrides for the fixed installation locations checked during discovery.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LocationsConfig {
    /// MinGW root (contains `bin/g++.exe`)
    pub mingw: Option<PathBuf>,

    /// 32-bit Cygwin root
    pub cygwin: Option<PathBuf>,

    /// 64-bit Cygwin root
    pub cygwin64: Option<PathBuf>,

    /// Directory holding versioned Swift installations
    pub swift_root: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        let discovery = other.discovery;
        if discovery.probe_timeout_secs.is_some() {
            self.discovery.probe_timeout_secs = discovery.probe_timeout_secs;
        }
        if !discovery.disabled.is_empty() {
            self.discovery.disabled = discovery.disabled;
        }

        let locations = discovery.locations;
        if locations.mingw.is_some() {
            self.discovery.locations.mingw = locations.mingw;
        }
        if locations.cygwin.is_some() {
            self.discovery.locations.cygwin = locations.cygwin;
        }
        if locations.cygwin64.is_some() {
            self.discovery.locations.cygwin64 = locations.cygwin64;
        }
        if locations.swift_root.is_some() {
            self.discovery.locations.swift_root = locations.swift_root;
        }
    }

    /// Effective probe timeout.
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(
            self.discovery
                .probe_timeout_secs
                .unwrap_or(DEFAULT_PROBE_TIMEOUT_SECS),
        )
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.berth/config.toml)
/// 2. Global config (~/.berth/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    // Load global config first
    if global_path.exists() {
        let global = Config::load_or_default(global_path);
        config.merge(global);
    }

    // Project config overrides global
    if project_path.exists() {
        let project = Config::load_or_default(project_path);
        config.merge(project);
    }

    config
}

/// Load configuration for a process running in `cwd`.
pub fn load_config_for(cwd: &Path) -> Config {
    let project_path = project_config_path(cwd);
    match global_config_path() {
        Some(global) => load_config(&global, &project_path),
        None => load_config(&PathBuf::new(), &project_path),
    }
}

/// Get the global berth config directory (~/.berth).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".berth"))
}

/// Get the global config path (~/.berth/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.berth/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".berth").join("config.toml")
}
