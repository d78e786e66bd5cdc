//! Berth CLI - discover native toolchains and pick one by capability

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("berth=debug")
    } else {
        EnvFilter::new("berth=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let color = !cli.no_color;

    // Execute command
    match cli.command {
        Commands::List(args) => commands::list::execute(args, cli.verbose),
        Commands::Default => commands::default::execute(color),
        Commands::Find(args) => commands::find::execute(args, color),
        Commands::Config(args) => commands::config::execute(args, color),
        Commands::Env(args) => commands::env::execute(args, color),
        Commands::Exec(args) => commands::exec::execute(args, color),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
