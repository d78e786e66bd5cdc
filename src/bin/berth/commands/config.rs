//! `berth config` command

use anyhow::Result;

use crate::cli::SelectArgs;

pub fn execute(args: SelectArgs, color: bool) -> Result<()> {
    let resolver = super::resolver()?;
    let toolchain = super::select_or_exit(&resolver, args.requires, color);

    print!("{}", toolchain.build_script_config_text());
    Ok(())
}
