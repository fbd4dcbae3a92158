//! Render command implementation.
use color_eyre::eyre::WrapErr;

use bump_changelog::{
    render::{self, RenderOptions},
    version::Version,
};

use crate::{cli::RenderArgs, command::read_changelog, result::Result};

pub fn execute(args: RenderArgs) -> Result<()> {
    let changelog = read_changelog(&args.changelog)?;

    let version = args
        .version
        .as_deref()
        .map(|v| {
            Version::parse(v).wrap_err_with(|| format!("invalid version \"{v}\""))
        })
        .transpose()?;

    let options = RenderOptions {
        version,
        date: args.date.resolve(),
    };

    println!("{}", render::render(&changelog, &options)?);

    Ok(())
}
