//! `berth find` command
//!
//! Prints the first toolchain meeting the requirement, in discovery
//! priority order, with the details a build script needs.

use anyhow::Result;

use crate::cli::FindArgs;

pub fn execute(args: FindArgs, color: bool) -> Result<()> {
    let resolver = super::resolver()?;
    let toolchain = super::select_or_exit(&resolver, Some(args.requirement), color);

    println!("{}", toolchain.display_name());
    println!("  id:      {}", toolchain.id());
    println!("  kind:    {}", toolchain.implementation_kind());
    if let Some(platform) = toolchain.unit_test_platform() {
        println!("  tests:   {}", platform);
    }
    if let Some(compiler) = toolchain.cpp_compiler() {
        println!("  c++:     {}", compiler.display());
    }
    if let Some(dir) = toolchain.install_dir() {
        println!("  install: {}", dir.display());
    }
    for entry in toolchain.path_entries() {
        println!("  path:    {}", entry.display());
    }

    Ok(())
}
