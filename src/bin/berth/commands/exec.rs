//! `berth exec` command

use anyhow::Result;

use crate::cli::ExecArgs;
use berth::ops::exec_with;

pub fn execute(args: ExecArgs, color: bool) -> Result<()> {
    let resolver = super::resolver()?;
    let toolchain = super::select_or_exit(&resolver, args.requires, color);

    let status = exec_with(toolchain, &args.command)?;
    if !status.success() {
        std::process::exit(status.code().unwrap_or(1));
    }

    Ok(())
}
