//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use berth::ToolchainRequirement;

/// Berth - discover native toolchains and pick one by capability
#[derive(Parser)]
#[command(name = "berth")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every discovered toolchain, including families that were not found
    List(ListArgs),

    /// Show the default toolchain
    Default,

    /// Find the first toolchain meeting a requirement
    Find(FindArgs),

    /// Print the build-script configuration block for a toolchain
    Config(SelectArgs),

    /// Print the environment needed to run binaries built by a toolchain
    Env(SelectArgs),

    /// Run a command with a toolchain's directories on the search path
    Exec(ExecArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct FindArgs {
    /// Requirement tag, e.g. GCC_COMPATIBLE or VISUALCPP_2015_OR_NEWER
    pub requirement: ToolchainRequirement,
}

#[derive(Args)]
pub struct SelectArgs {
    /// Use the first toolchain meeting this requirement instead of the default
    #[arg(long, short = 'r')]
    pub requires: Option<ToolchainRequirement>,
}

#[derive(Args)]
pub struct ExecArgs {
    /// Use the first toolchain meeting this requirement instead of the default
    #[arg(long, short = 'r')]
    pub requires: Option<ToolchainRequirement>,

    /// Command to run, after `--`
    #[arg(last = true, required = true)]
    pub command: Vec<String>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
