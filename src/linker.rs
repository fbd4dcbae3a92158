//! Fills in changelog links for updated dependencies.
//!
//! A [`Linker`] asks each of its [`Mapper`]s in turn for the changelog URL of
//! a dependency and keeps the first answer. Mappers never fail: anything that
//! goes wrong while resolving a link means "no link".

use async_trait::async_trait;
use log::*;
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::Arc, time::Duration};

use crate::{
    changelog::{Changelog, Dependency},
    error::Result,
};

mod dictionary;
mod github;
mod prefix;

pub use dictionary::DictionaryMapper;
pub use github::GithubMapper;
pub use prefix::{HttpChecker, UrlChecker, VersionPrefixValidator};

/// Resolves the changelog URL of a dependency.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mapper: Send + Sync {
    async fn resolve(&self, dependency: &Dependency) -> Option<String>;
}

fn default_github() -> bool {
    true
}

fn default_timeout() -> u64 {
    1
}

/// Which mappers to use and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkerConfig {
    /// YAML file mapping dependency names to URL templates.
    pub dictionary: Option<PathBuf>,
    /// Derive release URLs for `github.com/org/repo` dependencies.
    #[serde(default = "default_github")]
    pub github: bool,
    /// Check every URL over HTTP and retry with the leading `v` of the
    /// version toggled when the check fails.
    pub validate_prefix: bool,
    /// HTTP check timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            dictionary: None,
            github: default_github(),
            validate_prefix: false,
            timeout: default_timeout(),
        }
    }
}

/// Ordered chain of [`Mapper`]s.
///
/// Only dependencies with a target version and no changelog link are
/// touched. For each one the mappers are asked in order and the first
/// non-empty answer is kept; when no mapper answers the link stays empty.
///
/// # Examples
///
/// ```
/// use bump_changelog::{
///     changelog::{Changelog, Dependency},
///     linker::{GithubMapper, Linker},
///     version::Version,
/// };
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let linker = Linker::new(vec![Box::new(GithubMapper)]);
/// let mut changelog = Changelog {
///     dependencies: vec![Dependency {
///         name: "github.com/spf13/cobra".into(),
///         to: Some(Version::parse("v1.8.0").unwrap()),
///         ..Default::default()
///     }],
///     ..Default::default()
/// };
///
/// linker.link(&mut changelog).await;
///
/// assert_eq!(
///     changelog.dependencies[0].changelog.as_deref(),
///     Some("https://github.com/spf13/cobra/releases/tag/v1.8.0")
/// );
/// # });
/// ```
pub struct Linker {
    mappers: Vec<Box<dyn Mapper>>,
}

impl Linker {
    pub fn new(mappers: Vec<Box<dyn Mapper>>) -> Self {
        Self { mappers }
    }

    /// Build the mapper chain described by `config`: dictionary first, then
    /// the GitHub convention.
    pub fn from_config(config: &LinkerConfig) -> Result<Self> {
        let mut mappers: Vec<Box<dyn Mapper>> = vec![];

        if let Some(path) = &config.dictionary {
            debug!("loading link dictionary from {}", path.display());
            mappers.push(Box::new(DictionaryMapper::from_path(path)?));
        }

        if config.github {
            mappers.push(Box::new(GithubMapper));
        }

        if config.validate_prefix {
            let checker: Arc<dyn UrlChecker> =
                Arc::new(HttpChecker::new(Duration::from_secs(config.timeout))?);
            mappers = mappers
                .into_iter()
                .map(|inner| {
                    Box::new(VersionPrefixValidator::new(inner, checker.clone()))
                        as Box<dyn Mapper>
                })
                .collect();
        }

        Ok(Self { mappers })
    }

    /// Set the changelog link of every dependency that has a target version
    /// and no link yet.
    pub async fn link(&self, changelog: &mut Changelog) {
        for dependency in changelog.dependencies.iter_mut() {
            if dependency.changelog.is_some() || dependency.to.is_none() {
                continue;
            }

            for mapper in &self.mappers {
                if let Some(url) = mapper.resolve(dependency).await
                    && !url.is_empty()
                {
                    debug!("linked {} to {url}", dependency.name);
                    dependency.changelog = Some(url);
                    break;
                }
            }

            if dependency.changelog.is_none() {
                debug!("no changelog link found for {}", dependency.name);
            }
        }
    }
}

/// Accept `url` only when it parses as an absolute URL.
fn valid_url(url: String) -> Option<String> {
    match url::Url::parse(&url) {
        Ok(_) => Some(url),
        Err(err) => {
            debug!("discarding invalid url \"{url}\": {err}");
            None
        }
    }
}
