//! `berth list` command

use anyhow::Result;

use crate::cli::ListArgs;
use berth::ops::{format_list, list_toolchains, to_json};

pub fn execute(args: ListArgs, verbose: bool) -> Result<()> {
    let resolver = super::resolver()?;
    let summaries = list_toolchains(&resolver);

    if args.json {
        println!("{}", to_json(&summaries)?);
    } else {
        print!("{}", format_list(&summaries, verbose));
    }

    Ok(())
}
