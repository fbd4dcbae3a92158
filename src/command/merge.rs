//! Merge command implementation.
use color_eyre::eyre::WrapErr;
use log::*;
use std::{
    fs::{self, File},
    io::BufReader,
};

use bump_changelog::{
    markdown::merger,
    render::{self, RenderOptions},
    version::Version,
};

use crate::{cli::MergeArgs, command::read_changelog, result::Result};

/// Render the structured changelog and splice it into the markdown file.
pub fn execute(args: MergeArgs) -> Result<()> {
    let changelog = read_changelog(&args.changelog)?;

    let version = Version::parse(&args.version)
        .wrap_err_with(|| format!("invalid version \"{}\"", args.version))?;

    let section = render::render(
        &changelog,
        &RenderOptions {
            version: Some(version),
            date: args.date.resolve(),
        },
    )?;

    let mut output = vec![];

    if args.into.exists() {
        let file = File::open(&args.into)
            .wrap_err_with(|| format!("failed to open {}", args.into.display()))?;
        merger::merge(BufReader::new(file), &section, &mut output)?;
    } else {
        warn!("{} does not exist: creating it", args.into.display());
        merger::merge("".as_bytes(), &section, &mut output)?;
    }

    info!("writing release {} to {}", args.version, args.into.display());
    fs::write(&args.into, output)
        .wrap_err_with(|| format!("failed to write {}", args.into.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::cli::DateArgs;
    use chrono::NaiveDate;

    const EXISTING: &str = r#"# Changelog

## Unreleased

### Bugfixes

- fixed a crash

## v1.2.3 - 2022-01-01

### Enhancements

- added a flag
"#;

    const CHANGELOG: &str = r#"changes:
  - type: bugfix
    message: fixed a crash
"#;

    #[test]
    fn merges_in_place() {
        let tmp = TempDir::new().unwrap();
        let changelog = tmp.path().join("changelog.yaml");
        let markdown = tmp.path().join("CHANGELOG.md");
        fs::write(&changelog, CHANGELOG).unwrap();
        fs::write(&markdown, EXISTING).unwrap();

        execute(MergeArgs {
            changelog,
            into: markdown.clone(),
            version: "1.2.4".into(),
            date: DateArgs {
                date: NaiveDate::from_ymd_opt(2022, 2, 1),
                today: false,
            },
        })
        .unwrap();

        assert_eq!(
            fs::read_to_string(&markdown).unwrap(),
            r#"# Changelog

## Unreleased

## v1.2.4 - 2022-02-01

### 🐞 Bugfixes

- fixed a crash

## v1.2.3 - 2022-01-01

### Enhancements

- added a flag
"#
        );
    }

    #[test]
    fn creates_missing_markdown() {
        let tmp = TempDir::new().unwrap();
        let changelog = tmp.path().join("changelog.yaml");
        let markdown = tmp.path().join("CHANGELOG.md");
        fs::write(&changelog, CHANGELOG).unwrap();

        execute(MergeArgs {
            changelog,
            into: markdown.clone(),
            version: "0.1.0".into(),
            date: DateArgs {
                date: None,
                today: false,
            },
        })
        .unwrap();

        assert_eq!(
            fs::read_to_string(&markdown).unwrap(),
            "## v0.1.0\n\n### 🐞 Bugfixes\n\n- fixed a crash\n"
        );
    }
}
