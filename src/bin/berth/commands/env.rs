//! `berth env` command
//!
//! One `VAR=value` assignment per line; nothing when the toolchain's
//! binaries run without extra setup.

use anyhow::Result;

use crate::cli::SelectArgs;

pub fn execute(args: SelectArgs, color: bool) -> Result<()> {
    let resolver = super::resolver()?;
    let toolchain = super::select_or_exit(&resolver, args.requires, color);

    for assignment in toolchain.runtime_environment() {
        println!("{}", assignment);
    }
    Ok(())
}
