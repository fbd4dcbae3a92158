//! Extract command implementation.
use color_eyre::eyre::WrapErr;
use log::*;
use std::path::Path;

use bump_changelog::{
    Changelog,
    changelog::io::{self, Format},
    config::Config,
    diagnostics::Diagnostics,
    git::{GitRepository, TagsVersionGetter},
    markdown::source::MarkdownSource,
    source::{DependabotSource, RenovateSource, Source},
};

use crate::{
    cli::ExtractArgs,
    command::write_changelog,
    result::Result,
};

pub fn execute(config: &Config, repo: &Path, args: ExtractArgs) -> Result<()> {
    let mut diagnostics = Diagnostics::new();
    let changelog = collect(config, repo, &args, &mut diagnostics)?;

    let warnings = diagnostics.warnings().count();
    if warnings > 0 {
        warn!("extraction finished with {warnings} warning(s)");
    }

    match args.output {
        Some(path) => {
            info!("writing changelog to {}", path.display());
            write_changelog(&path, &changelog)
        }
        None => {
            print!("{}", io::to_string(&changelog, Format::Yaml)?);
            Ok(())
        }
    }
}

/// Merge the requested sources in order: markdown, dependabot, renovate.
fn collect(
    config: &Config,
    repo: &Path,
    args: &ExtractArgs,
    diagnostics: &mut Diagnostics,
) -> Result<Changelog> {
    let mut changelog = Changelog::default();

    if let Some(path) = &args.markdown {
        info!("reading markdown changelog {}", path.display());
        let source = MarkdownSource::from_path(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        let extracted = source
            .changelog(diagnostics)
            .wrap_err_with(|| format!("failed to parse {}", path.display()))?;
        changelog.merge(extracted);
    }

    if !args.dependabot && !args.renovate {
        return Ok(changelog);
    }

    let repository = GitRepository::open(repo).wrap_err_with(|| {
        format!("failed to open git repository at {}", repo.display())
    })?;

    let mut commits = config.commits.clone();
    commits.since = if args.since_last_tag {
        repository
            .last_version_hash()
            .wrap_err("failed to read version tags")?
    } else {
        args.since.clone()
    };

    if args.dependabot {
        info!("collecting dependabot updates");
        let source = DependabotSource::new(&repository, commits.clone());
        changelog.merge(source.changelog(diagnostics)?);
    }

    if args.renovate {
        info!("collecting renovate updates");
        let source = RenovateSource::new(&repository, commits);
        changelog.merge(source.changelog(diagnostics)?);
    }

    Ok(changelog)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use tempfile::TempDir;

    use super::*;
    use bump_changelog::changelog::EntryType;

    const MARKDOWN: &str = r#"# Changelog

## Unreleased

### Bugfixes

- fixed a crash

## v1.0.0 - 2022-01-01

- first release
"#;

    fn args(markdown: Option<&Path>) -> ExtractArgs {
        ExtractArgs {
            markdown: markdown.map(Path::to_path_buf),
            dependabot: false,
            renovate: false,
            since: None,
            since_last_tag: false,
            output: None,
        }
    }

    #[test]
    fn collects_markdown_without_git() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("CHANGELOG.md");
        fs::write(&path, MARKDOWN).unwrap();

        let changelog = collect(
            &Config::default(),
            tmp.path(),
            &args(Some(&path)),
            &mut Diagnostics::new(),
        )
        .unwrap();

        assert_eq!(changelog.changes.len(), 1);
        assert_eq!(changelog.changes[0].kind, EntryType::Bugfix);
        assert_eq!(changelog.changes[0].message, "fixed a crash");
    }

    #[test]
    fn writes_output_file() {
        let tmp = TempDir::new().unwrap();
        let markdown = tmp.path().join("CHANGELOG.md");
        let output = tmp.path().join("changelog.json");
        fs::write(&markdown, MARKDOWN).unwrap();

        let mut args = args(Some(&markdown));
        args.output = Some(output.clone());
        execute(&Config::default(), tmp.path(), args).unwrap();

        let written = io::read(&output).unwrap();
        assert_eq!(written.changes.len(), 1);
    }

    #[test]
    fn missing_markdown_file_fails() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing.md");

        let result = collect(
            &Config::default(),
            tmp.path(),
            &args(Some(&path)),
            &mut Diagnostics::new(),
        );

        assert!(result.is_err());
    }
}
