use clap::Parser;
use color_eyre::eyre::WrapErr;

use bump_changelog::config::Config;

mod cli;
mod command;
mod result;

use crate::{cli::Command, result::Result};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("bump_changelog")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli_args = cli::Args::parse();

    initialize_logger(cli_args.debug)?;

    let config = Config::load(&cli_args.config).wrap_err_with(|| {
        format!("failed to load config {}", cli_args.config.display())
    })?;

    match cli_args.command {
        Command::Extract(args) => {
            command::extract::execute(&config, &cli_args.repo, args)
        }
        Command::Validate { file } => command::validate::execute(&file),
        Command::Bump(args) => {
            command::bump::execute(&config, &cli_args.repo, args)
        }
        Command::Render(args) => command::render::execute(args),
        Command::Merge(args) => command::merge::execute(args),
        Command::Link(args) => command::link::execute(&config, args).await,
    }
}
