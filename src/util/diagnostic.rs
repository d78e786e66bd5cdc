//! User-friendly diagnostic messages.
//!
//! Every error shown by the CLI carries the root cause, the facts that led
//! to it and a suggested next step.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::ToolchainRequirement;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when no toolchain could be found at all.
    pub const NO_TOOLCHAIN: &str = "Install gcc, clang or Visual Studio and re-run `berth list`";

    /// Suggestion when a requirement is not met by any candidate.
    pub const NO_MATCH: &str = "Run `berth list` to see every discovered toolchain";

    /// Suggestion when discovery output is unexpectedly empty.
    pub const VERBOSE: &str = "Run with `--verbose` to see why candidates were dropped";

    /// Suggestion when a family has been disabled in configuration.
    pub const DISABLED_FAMILY: &str =
        "Check `[discovery] disabled` in .berth/config.toml or ~/.berth/config.toml";
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Error,
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Create a new note.
    pub fn note(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Note,
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let severity_str = if color {
            match self.severity {
                Severity::Error => "\x1b[1;31merror\x1b[0m",
                Severity::Note => "\x1b[1;36mnote\x1b[0m",
            }
        } else {
            match self.severity {
                Severity::Error => "error",
                Severity::Note => "note",
            }
        };

        output.push_str(&format!("{}: {}\n", severity_str, self.message));

        for ctx in &self.context {
            output.push_str(&format!("  → {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            output.push('\n');
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            output.push_str(&format!("{}: consider:\n", help_prefix));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// No discovered toolchain satisfies a requirement.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("no toolchain satisfies `{requirement}`")]
#[diagnostic(
    code(berth::resolve::no_match),
    help("Run `berth list` to see every discovered toolchain")
)]
pub struct NoMatchingToolchainError {
    pub requirement: ToolchainRequirement,
    /// Display names of the candidates that were considered.
    pub considered: Vec<String>,
}

impl NoMatchingToolchainError {
    /// Render as a terminal diagnostic listing what was considered.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.to_string());
        if self.considered.is_empty() {
            diag = diag
                .with_context("discovery found no toolchains")
                .with_suggestion(suggestions::NO_TOOLCHAIN);
        } else {
            for name in &self.considered {
                diag = diag.with_context(format!("{} does not satisfy it", name));
            }
            diag = diag.with_suggestion(suggestions::NO_MATCH);
        }
        diag.with_suggestion(suggestions::VERBOSE)
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
