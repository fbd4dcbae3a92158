//! Configuration loading and parsing for `changelog.toml` files.
use log::*;
use serde::Deserialize;
use std::{fs, path::Path};

use crate::{
    bumper::BumpCaps, error::Result, linker::LinkerConfig,
    source::CommitSourceConfig,
};

/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "changelog.toml";

/// Root configuration structure for `changelog.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Limits for the bump implied by changes and dependency updates.
    pub bump: BumpCaps,
    /// Commit selection for the bot sources.
    pub commits: CommitSourceConfig,
    /// Changelog link resolution for dependencies.
    pub linker: LinkerConfig,
}

impl Config {
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load the configuration at `path`, falling back to the defaults when
    /// the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("configuration not found at {}: using default", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use tempfile::TempDir;

    use super::*;
    use crate::bump::Bump;

    #[test]
    fn loads_defaults() {
        let config = Config::default();
        assert_eq!(config.bump.changes, Bump::Major);
        assert_eq!(config.bump.dependencies, Bump::Major);
        assert!(config.commits.paths.is_empty());
        assert!(config.linker.github);
        assert!(!config.linker.validate_prefix);
    }

    #[test]
    fn parses_every_table() {
        let config = Config::parse(
            r#"
[bump]
dependencies = "patch"

[commits]
paths = ["charts/api", "go.mod"]

[linker]
dictionary = "links.yaml"
github = false
validate_prefix = true
"#,
        )
        .unwrap();

        assert_eq!(config.bump.changes, Bump::Major);
        assert_eq!(config.bump.dependencies, Bump::Patch);
        assert_eq!(config.commits.paths, vec!["charts/api", "go.mod"]);
        assert_eq!(config.commits.since, None);
        assert_eq!(config.linker.dictionary, Some(PathBuf::from("links.yaml")));
        assert!(!config.linker.github);
        assert!(config.linker.validate_prefix);
    }

    #[test]
    fn rejects_unknown_bump() {
        assert!(Config::parse("[bump]\nchanges = \"huge\"").is_err());
    }

    #[test]
    fn missing_file_is_default() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load(tmp.path().join(DEFAULT_CONFIG_FILE)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn loads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "[linker]\ngithub = false\n").unwrap();

        let config = Config::load(&path).unwrap();

        assert!(!config.linker.github);
    }
}
