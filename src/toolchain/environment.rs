//! Scoped mutation of the process search path.
//!
//! Activating a toolchain prepends its path entries to the search-path
//! variable so that its executables resolve by name. The variable is
//! process-global, so at most one activation may be outstanding: the slot
//! below records it, and a second activation is rejected until the first
//! [`ActivationGuard`] is released. Releasing the guard restores exactly
//! the value captured at activation, including "unset".

use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::core::OperatingSystem;
use crate::util::fs::prepend_search_path;

use super::ToolchainError;

struct ActiveEnvironment {
    token: u64,
    toolchain: String,
    var: &'static str,
    /// `None` when no path entries were applied.
    original: Option<Option<OsString>>,
}

static ACTIVE: Mutex<Option<ActiveEnvironment>> = Mutex::new(None);
static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

fn slot() -> MutexGuard<'static, Option<ActiveEnvironment>> {
    ACTIVE.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Display name of the toolchain currently holding the search path.
#[cfg(test)]
pub(crate) fn active_toolchain() -> Option<String> {
    slot().as_ref().map(|active| active.toolchain.clone())
}

/// Proof that a toolchain's environment is active.
///
/// Dropping the guard restores the search path. Use
/// [`ActivationGuard::deactivate`] to observe restoration errors.
#[derive(Debug)]
#[must_use = "the search path is restored as soon as the guard is dropped"]
pub struct ActivationGuard {
    token: u64,
    released: bool,
}

impl ActivationGuard {
    /// Restore the search path to its value before activation.
    pub fn deactivate(mut self) -> Result<(), ToolchainError> {
        self.released = true;
        restore(self.token)
    }
}

impl Drop for ActivationGuard {
    fn drop(&mut self) {
        if !self.released {
            if let Err(e) = restore(self.token) {
                tracing::warn!("failed to restore search path: {}", e);
            }
        }
    }
}

/// Prepend `entries` to the search path on behalf of `toolchain`.
pub(crate) fn activate(
    toolchain: &str,
    os: OperatingSystem,
    entries: &[PathBuf],
) -> Result<ActivationGuard, ToolchainError> {
    let mut slot = slot();
    if let Some(active) = slot.as_ref() {
        return Err(ToolchainError::ActivationInProgress {
            active: active.toolchain.clone(),
        });
    }

    let var = os.path_var();
    let original = if entries.is_empty() {
        None
    } else {
        let current = std::env::var_os(var);
        let path = prepend(entries, current.as_ref())?;
        tracing::info!("Using path {}", path.to_string_lossy());
        std::env::set_var(var, &path);
        Some(current)
    };

    let token = NEXT_TOKEN.fetch_add(1, Ordering::Relaxed);
    *slot = Some(ActiveEnvironment {
        token,
        toolchain: toolchain.to_string(),
        var,
        original,
    });

    Ok(ActivationGuard {
        token,
        released: false,
    })
}

fn restore(token: u64) -> Result<(), ToolchainError> {
    let mut slot = slot();
    match slot.as_ref() {
        Some(active) if active.token == token => {}
        _ => return Err(ToolchainError::NotActive),
    }

    let Some(active) = slot.take() else {
        return Err(ToolchainError::NotActive);
    };
    match active.original {
        Some(Some(value)) => {
            tracing::info!("Restored {} for {}", active.var, active.toolchain);
            std::env::set_var(active.var, value);
        }
        Some(None) => {
            tracing::info!("Removed {} for {}", active.var, active.toolchain);
            std::env::remove_var(active.var);
        }
        None => {}
    }
    Ok(())
}

fn prepend(entries: &[PathBuf], current: Option<&OsString>) -> Result<OsString, ToolchainError> {
    for entry in entries {
        if std::env::join_paths([entry]).is_err() {
            return Err(ToolchainError::InvalidPathEntry {
                entry: entry.clone(),
            });
        }
    }

    prepend_search_path(entries, current.map(OsString::as_os_str)).map_err(|_| {
        ToolchainError::InvalidPathEntry {
            entry: entries.first().cloned().unwrap_or_default(),
        }
    })
}

/// `VAR=entries<sep>current` for a process running a binary built by the
/// toolchain, or nothing when the toolchain needs no path entries.
pub(crate) fn runtime_path_assignment(os: OperatingSystem, entries: &[PathBuf]) -> Vec<String> {
    if entries.is_empty() {
        return Vec::new();
    }

    let separator = os.path_separator().to_string();
    let mut parts: Vec<String> = entries
        .iter()
        .map(|e| e.to_string_lossy().into_owned())
        .collect();
    parts.push(std::env::var(os.path_var()).unwrap_or_default());

    vec![format!("{}={}", os.path_var(), parts.join(&separator))]
}
