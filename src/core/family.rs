//! Compiler product lines.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The compiler product line a toolchain belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolFamily {
    Gcc,
    Clang,
    VisualCpp,
    MingwGcc,
    CygwinGcc,
    CygwinGcc64,
    Swiftc,
}

impl ToolFamily {
    /// All families, in declaration order.
    pub const ALL: [ToolFamily; 7] = [
        ToolFamily::Gcc,
        ToolFamily::Clang,
        ToolFamily::VisualCpp,
        ToolFamily::MingwGcc,
        ToolFamily::CygwinGcc,
        ToolFamily::CygwinGcc64,
        ToolFamily::Swiftc,
    ];

    /// Human-readable label, used as the prefix of display names.
    pub fn display_label(&self) -> &'static str {
        match self {
            ToolFamily::Gcc => "gcc",
            ToolFamily::Clang => "clang",
            ToolFamily::VisualCpp => "visual c++",
            ToolFamily::MingwGcc => "mingw",
            ToolFamily::CygwinGcc => "gcc cygwin",
            ToolFamily::CygwinGcc64 => "gcc cygwin64",
            ToolFamily::Swiftc => "swiftc",
        }
    }

    /// Stable machine tag, as used in config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolFamily::Gcc => "gcc",
            ToolFamily::Clang => "clang",
            ToolFamily::VisualCpp => "visual-cpp",
            ToolFamily::MingwGcc => "mingw-gcc",
            ToolFamily::CygwinGcc => "cygwin-gcc",
            ToolFamily::CygwinGcc64 => "cygwin-gcc64",
            ToolFamily::Swiftc => "swiftc",
        }
    }
}

impl fmt::Display for ToolFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_label())
    }
}

impl FromStr for ToolFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolFamily::ALL
            .iter()
            .copied()
            .find(|family| family.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = ToolFamily::ALL.iter().map(|f| f.as_str()).collect();
                format!(
                    "unknown tool family '{}'; expected one of: {}",
                    s,
                    known.join(", ")
                )
            })
    }
}
