//! Bump command implementation.
use color_eyre::eyre::{WrapErr, eyre};
use std::path::Path;

use bump_changelog::{
    bumper::Bumper, config::Config, git::GitRepository, version::Version,
};

use crate::{cli::BumpArgs, command::read_changelog, result::Result};

/// Print the next version.
pub fn execute(config: &Config, repo: &Path, args: BumpArgs) -> Result<()> {
    let next = next_version(config, repo, &args)?;
    println!("{next}");
    Ok(())
}

fn next_version(config: &Config, repo: &Path, args: &BumpArgs) -> Result<Version> {
    let changelog = read_changelog(&args.changelog)?;
    let bumper = Bumper::new(&changelog, config.bump);

    if args.from_tags {
        let repository = GitRepository::open(repo).wrap_err_with(|| {
            format!("failed to open git repository at {}", repo.display())
        })?;
        return bumper
            .bump_source(&repository)
            .wrap_err("failed to bump from version tags");
    }

    let current = args
        .version
        .as_deref()
        .ok_or_else(|| eyre!("either --version or --from-tags is required"))?;
    let current = Version::parse(current)
        .wrap_err_with(|| format!("invalid version \"{current}\""))?;

    Ok(bumper.bump(&current))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use tempfile::TempDir;

    use super::*;
    use bump_changelog::bump::Bump;

    const CHANGELOG: &str = r#"changes:
  - type: enhancement
    message: added a flag
dependencies:
  - name: foo
    from: 1.0.0
    to: 2.0.0
"#;

    fn args(path: &Path, version: &str) -> BumpArgs {
        BumpArgs {
            changelog: path.to_path_buf(),
            version: Some(version.into()),
            from_tags: false,
        }
    }

    #[test]
    fn bumps_given_version() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("changelog.yaml");
        fs::write(&path, CHANGELOG).unwrap();

        let next =
            next_version(&Config::default(), tmp.path(), &args(&path, "v1.4.2"))
                .unwrap();

        assert_eq!(next.original(), "v2.0.0");
    }

    #[test]
    fn honours_configured_caps() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("changelog.yaml");
        fs::write(&path, CHANGELOG).unwrap();

        let mut config = Config::default();
        config.bump.dependencies = Bump::Patch;

        let next =
            next_version(&config, tmp.path(), &args(&path, "1.4.2")).unwrap();

        assert_eq!(next.original(), "1.5.0");
    }

    #[test]
    fn rejects_invalid_version() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("changelog.yaml");
        fs::write(&path, CHANGELOG).unwrap();

        assert!(
            next_version(&Config::default(), tmp.path(), &args(&path, "latest"))
                .is_err()
        );
    }
}
