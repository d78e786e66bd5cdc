//! `berth default` command

use anyhow::Result;

pub fn execute(color: bool) -> Result<()> {
    let resolver = super::resolver()?;
    let toolchain = super::select_or_exit(&resolver, None, color);

    println!("{}", toolchain.display_name());
    Ok(())
}
