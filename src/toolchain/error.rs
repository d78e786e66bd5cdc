use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::core::ToolFamily;

/// Errors raised by operations on a toolchain candidate.
#[derive(Debug, Error, Diagnostic)]
pub enum ToolchainError {
    #[error("toolchain `{family}` is not available")]
    #[diagnostic(
        code(berth::toolchain::unavailable),
        help("Run `berth list` to see which toolchains were found")
    )]
    Unavailable { family: ToolFamily },

    #[error("the search path is already activated for {active}")]
    #[diagnostic(
        code(berth::environment::active),
        help("Deactivate the current toolchain before activating another")
    )]
    ActivationInProgress { active: String },

    #[error("path entry `{}` contains the search-path separator", .entry.display())]
    #[diagnostic(code(berth::environment::invalid_path_entry))]
    InvalidPathEntry { entry: PathBuf },

    #[error("this activation no longer owns the search path")]
    #[diagnostic(code(berth::environment::not_active))]
    NotActive,
}
