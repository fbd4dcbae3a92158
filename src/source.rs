//! Sources of changelog data.
//!
//! Each source turns its input into a fresh [`Changelog`]. Sources never fail
//! because they found nothing: an empty changelog is a valid result, and
//! individual inputs that cannot be understood are skipped and recorded in
//! the [`Diagnostics`].
use serde::{Deserialize, Serialize};

use crate::{
    changelog::Changelog,
    diagnostics::Diagnostics,
    error::Result,
    git::{Commit, CommitsGetter},
};

pub mod dependabot;
pub mod renovate;

pub use dependabot::DependabotSource;
pub use renovate::RenovateSource;

/// Something a [`Changelog`] can be extracted from.
///
/// Results of several sources are combined with [`Changelog::merge`] in a
/// caller chosen order.
pub trait Source {
    fn changelog(&self, diagnostics: &mut Diagnostics) -> Result<Changelog>;
}

/// Settings shared by the commit based sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitSourceConfig {
    /// Only consider commits after this hash.
    #[serde(skip)]
    pub since: Option<String>,
    /// Only consider commits touching one of these path prefixes. Empty
    /// means every commit.
    pub paths: Vec<String>,
}

impl CommitSourceConfig {
    fn touches_paths(&self, commit: &Commit) -> bool {
        if self.paths.is_empty() {
            return true;
        }
        commit.files.iter().any(|file| {
            self.paths.iter().any(|path| {
                let path = path.trim_start_matches("./").trim_end_matches('/');
                path.is_empty()
                    || path == "."
                    || file == path
                    || file.starts_with(&format!("{path}/"))
            })
        })
    }

    /// Fetch commits and drop the ones outside the configured paths.
    pub(crate) fn commits(
        &self,
        getter: &dyn CommitsGetter,
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<Commit>> {
        let commits = getter.commits(self.since.clone())?;

        Ok(commits
            .into_iter()
            .filter(|commit| {
                let keep = self.touches_paths(commit);
                if !keep {
                    diagnostics.debug(format!(
                        "skipping commit {}: no changes under {:?}",
                        commit.hash, self.paths
                    ));
                }
                keep
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockCommitsGetter;

    fn commit(hash: &str, files: &[&str]) -> Commit {
        Commit {
            hash: hash.into(),
            files: files.iter().map(|f| f.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn keeps_everything_without_paths() {
        let config = CommitSourceConfig::default();
        assert!(config.touches_paths(&commit("a", &[])));
    }

    #[test]
    fn matches_path_prefixes_on_directory_boundaries() {
        let config = CommitSourceConfig {
            paths: vec!["./api/".into(), "go.mod".into()],
            ..Default::default()
        };

        assert!(config.touches_paths(&commit("a", &["api/main.go"])));
        assert!(config.touches_paths(&commit("b", &["go.mod"])));
        assert!(!config.touches_paths(&commit("c", &["apis/main.go"])));
        assert!(!config.touches_paths(&commit("d", &["web/go.mod"])));
    }

    #[test]
    fn filters_commits_and_records_skips() {
        let mut getter = MockCommitsGetter::new();
        getter
            .expect_commits()
            .withf(|since| since.as_deref() == Some("abc"))
            .returning(|_| {
                Ok(vec![commit("1", &["api/x"]), commit("2", &["web/y"])])
            });

        let config = CommitSourceConfig {
            since: Some("abc".into()),
            paths: vec!["api".into()],
        };
        let mut diagnostics = Diagnostics::new();

        let commits = config.commits(&getter, &mut diagnostics).unwrap();

        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].hash, "1");
        assert_eq!(diagnostics.entries().len(), 1);
    }
}
