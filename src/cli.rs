//! CLI argument parsing.
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use bump_changelog::config::DEFAULT_CONFIG_FILE;

/// Collect, bump, render and merge structured changelogs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    pub debug: bool,

    #[arg(long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    /// Project configuration file. Defaults apply when it does not exist.
    pub config: PathBuf,

    #[arg(long, default_value = ".", global = true)]
    /// Path inside the git repository to read commits and tags from.
    pub repo: PathBuf,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Collect a structured changelog from markdown and bot commits.
    Extract(ExtractArgs),

    /// Check a markdown changelog for structural problems.
    Validate {
        /// Markdown changelog to check.
        file: PathBuf,
    },

    /// Print the next version implied by a structured changelog.
    Bump(BumpArgs),

    /// Render a structured changelog as a markdown release section.
    Render(RenderArgs),

    /// Render a structured changelog and insert it into a markdown
    /// changelog.
    Merge(MergeArgs),

    /// Fill in changelog links for dependency updates.
    Link(LinkArgs),
}

#[derive(clap::Args, Debug)]
pub struct ExtractArgs {
    #[arg(long)]
    /// Markdown changelog with an "Unreleased" section.
    pub markdown: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    /// Collect dependabot updates from commits.
    pub dependabot: bool,

    #[arg(long, default_value_t = false)]
    /// Collect renovate updates from commits.
    pub renovate: bool,

    #[arg(long, conflicts_with = "since_last_tag")]
    /// Only read commits after this commit hash.
    pub since: Option<String>,

    #[arg(long, default_value_t = false)]
    /// Only read commits after the highest version tag.
    pub since_last_tag: bool,

    #[arg(long)]
    /// Structured changelog to write. Prints YAML when omitted.
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct BumpArgs {
    #[arg(long)]
    /// Structured changelog file.
    pub changelog: PathBuf,

    #[arg(long, required_unless_present = "from_tags", conflicts_with = "from_tags")]
    /// Current version.
    pub version: Option<String>,

    #[arg(long, default_value_t = false)]
    /// Use the highest version tag of the repository as current version.
    pub from_tags: bool,
}

#[derive(clap::Args, Debug, Clone, Copy)]
pub struct DateArgs {
    #[arg(long, conflicts_with = "today")]
    /// Release date (YYYY-MM-DD).
    pub date: Option<NaiveDate>,

    #[arg(long, default_value_t = false)]
    /// Use today's date as release date.
    pub today: bool,
}

impl DateArgs {
    pub fn resolve(&self) -> Option<NaiveDate> {
        if self.today {
            return Some(Local::now().date_naive());
        }
        self.date
    }
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    #[arg(long)]
    /// Structured changelog file.
    pub changelog: PathBuf,

    #[arg(long)]
    /// Version shown in the section header.
    pub version: Option<String>,

    #[command(flatten)]
    pub date: DateArgs,
}

#[derive(clap::Args, Debug)]
pub struct MergeArgs {
    #[arg(long)]
    /// Structured changelog file.
    pub changelog: PathBuf,

    #[arg(long)]
    /// Markdown changelog updated in place.
    pub into: PathBuf,

    #[arg(long)]
    /// Version of the new release section.
    pub version: String,

    #[command(flatten)]
    pub date: DateArgs,
}

#[derive(clap::Args, Debug)]
pub struct LinkArgs {
    #[arg(long)]
    /// Structured changelog file.
    pub changelog: PathBuf,

    #[arg(long)]
    /// Where to write the linked changelog. Defaults to updating the input.
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let args = Args::parse_from([
            "bump-changelog",
            "validate",
            "CHANGELOG.md",
            "--debug",
            "--config",
            "custom.toml",
        ]);

        assert!(args.debug);
        assert_eq!(args.config, PathBuf::from("custom.toml"));
        assert!(matches!(args.command, Command::Validate { .. }));
    }

    #[test]
    fn bump_requires_a_version_source() {
        assert!(
            Args::try_parse_from([
                "bump-changelog",
                "bump",
                "--changelog",
                "c.yaml"
            ])
            .is_err()
        );
        assert!(
            Args::try_parse_from([
                "bump-changelog",
                "bump",
                "--changelog",
                "c.yaml",
                "--version",
                "1.0.0",
                "--from-tags",
            ])
            .is_err()
        );
    }

    #[test]
    fn parses_dates() {
        let args = Args::parse_from([
            "bump-changelog",
            "render",
            "--changelog",
            "c.yaml",
            "--date",
            "2022-02-01",
        ]);

        let Command::Render(render) = args.command else {
            panic!("expected render");
        };
        assert_eq!(render.date.resolve(), NaiveDate::from_ymd_opt(2022, 2, 1));
        assert_eq!(render.version, None);
    }
}
