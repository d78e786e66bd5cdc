//! High-level operations.
//!
//! This module contains the implementation of berth commands.

pub mod toolchains;

pub use toolchains::{
    exec_with, format_list, list_toolchains, select_toolchain, to_json, ToolchainSummary,
};
