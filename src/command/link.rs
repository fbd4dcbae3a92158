//! Link command implementation.
use color_eyre::eyre::WrapErr;
use log::*;

use bump_changelog::{config::Config, linker::Linker};

use crate::{
    cli::LinkArgs,
    command::{read_changelog, write_changelog},
    result::Result,
};

/// Fill in dependency changelog links and write the result.
pub async fn execute(config: &Config, args: LinkArgs) -> Result<()> {
    let mut changelog = read_changelog(&args.changelog)?;

    let linker = Linker::from_config(&config.linker)
        .wrap_err("failed to set up changelog linker")?;
    linker.link(&mut changelog).await;

    let linked = changelog
        .dependencies
        .iter()
        .filter(|d| d.changelog.is_some())
        .count();
    info!(
        "{linked} of {} dependencies have a changelog link",
        changelog.dependencies.len()
    );

    let output = args.output.unwrap_or(args.changelog);
    write_changelog(&output, &changelog)
}
