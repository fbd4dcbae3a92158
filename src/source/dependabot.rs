//! Dependency updates from dependabot commit messages.
//!
//! Dependabot titles its commits `Bump <name> from <old> to <new> (#<pr>)`,
//! usually behind a conventional commit prefix.
use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::{
    changelog::{Changelog, Dependency, Meta},
    diagnostics::Diagnostics,
    error::Result,
    git::{Commit, CommitsGetter},
    source::{CommitSourceConfig, Source},
    version::Version,
};

static BUMP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)[Bb]ump (\S+)(?: from (\S+))?(?: to (\S+))?(?:.+\([#!](\d+)\)$)?",
    )
    .unwrap()
});

/// Dependency updates from dependabot commits.
///
/// Every commit returned by the getter (after the path filter of the
/// [`CommitSourceConfig`]) is matched against the dependabot title. Commits
/// that do not match are skipped with a debug diagnostic. Dependencies come
/// out oldest first.
///
/// # Examples
///
/// ```ignore
/// let repository = GitRepository::open(".")?;
/// let source = DependabotSource::new(&repository, CommitSourceConfig::default());
/// let changelog = source.changelog(&mut Diagnostics::new())?;
/// ```
pub struct DependabotSource<'g> {
    getter: &'g dyn CommitsGetter,
    config: CommitSourceConfig,
}

impl<'g> DependabotSource<'g> {
    pub fn new(getter: &'g dyn CommitsGetter, config: CommitSourceConfig) -> Self {
        Self { getter, config }
    }
}

impl Source for DependabotSource<'_> {
    fn changelog(&self, diagnostics: &mut Diagnostics) -> Result<Changelog> {
        let commits = self.config.commits(self.getter, diagnostics)?;

        let mut dependencies: Vec<Dependency> = commits
            .iter()
            .filter_map(|commit| parse_commit(commit, diagnostics))
            .collect();

        // commits arrive newest first
        dependencies.reverse();

        Ok(Changelog {
            dependencies,
            ..Default::default()
        })
    }
}

/// Parse the first `Bump ...` statement of a commit message.
pub fn parse_commit(
    commit: &Commit,
    diagnostics: &mut Diagnostics,
) -> Option<Dependency> {
    let Some(captures) = BUMP_REGEX.captures(&commit.message) else {
        diagnostics.debug(format!(
            "skipping commit {}: not a dependabot bump",
            commit.hash
        ));
        return None;
    };

    let version = |index: usize, diagnostics: &mut Diagnostics| {
        parse_version(&captures, index, &commit.hash, diagnostics)
    };

    Some(Dependency {
        name: captures[1].to_string(),
        from: version(2, diagnostics),
        to: version(3, diagnostics),
        changelog: None,
        meta: Meta {
            author: Some(commit.author.clone()).filter(|a| !a.is_empty()),
            pr: captures.get(4).map(|m| m.as_str().to_string()),
            commit: Some(commit.hash.clone()),
        },
    })
}

fn parse_version(
    captures: &Captures,
    index: usize,
    hash: &str,
    diagnostics: &mut Diagnostics,
) -> Option<Version> {
    let text = captures.get(index)?.as_str();
    match Version::parse(text) {
        Ok(version) => Some(version),
        Err(err) => {
            diagnostics.debug(format!(
                "commit {hash}: ignoring version \"{text}\": {err}"
            ));
            None
        }
    }
}
