//! Commits and tags: the version control collaborators of the extractors.
//!
//! Extraction only depends on the [`CommitsGetter`] and [`TagsVersionGetter`]
//! traits. [`GitRepository`] implements both on top of a local `git2`
//! repository.
use git2::{Sort, TreeWalkMode};
use log::*;
use std::path::{Path, PathBuf};

use crate::{error::Result, version::Version};

/// A commit as seen by the extractors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Commit {
    pub message: String,
    pub hash: String,
    pub author: String,
    /// Paths changed by this commit, relative to the repository root.
    pub files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub hash: String,
}

/// Source of commits for the bot extractors.
#[cfg_attr(test, mockall::automock)]
pub trait CommitsGetter {
    /// Commits reachable from HEAD but not from `since`, newest first.
    fn commits(&self, since: Option<String>) -> Result<Vec<Commit>>;
}

/// Source of released versions.
#[cfg_attr(test, mockall::automock)]
pub trait TagsVersionGetter {
    /// Every tag that parses as a version, in no particular order.
    fn versions(&self) -> Result<Vec<Version>>;
    /// Commit hash of the highest version tag.
    fn last_version_hash(&self) -> Result<Option<String>>;
}

/// Local git repository.
pub struct GitRepository {
    repo: git2::Repository,
}

impl GitRepository {
    /// Open the repository containing `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let repo = git2::Repository::discover(path)?;
        Ok(Self { repo })
    }

    pub fn tags(&self) -> Result<Vec<Tag>> {
        let mut tags = vec![];

        for name in self.repo.tag_names(None)?.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{name}"))?;
            let commit = reference.peel_to_commit()?;
            tags.push(Tag {
                name: name.to_string(),
                hash: commit.id().to_string(),
            });
        }

        Ok(tags)
    }

    fn version_tags(&self) -> Result<Vec<(Version, Tag)>> {
        Ok(self
            .tags()?
            .into_iter()
            .filter_map(|tag| match Version::parse(&tag.name) {
                Ok(version) => Some((version, tag)),
                Err(_) => {
                    debug!("ignoring non version tag: {}", tag.name);
                    None
                }
            })
            .collect())
    }

    fn changed_files(&self, commit: &git2::Commit) -> Result<Vec<String>> {
        let mut changes: Vec<PathBuf> = vec![];

        if let Ok(parent) = commit.parent(0) {
            let diff = self.repo.diff_tree_to_tree(
                Some(&parent.tree()?),
                Some(&commit.tree()?),
                None,
            )?;
            changes.extend(diff.deltas().filter_map(|delta| {
                delta
                    .new_file()
                    .path()
                    .or_else(|| delta.old_file().path())
                    .map(PathBuf::from)
            }));
        } else {
            // the first commit has nothing to diff against: every file in
            // its tree is new
            commit.tree()?.walk(TreeWalkMode::PreOrder, |dir, entry| {
                if entry.kind() != Some(git2::ObjectType::Blob) {
                    return 0;
                }
                if let Some(name) = entry.name() {
                    changes.push(Path::new(dir).join(name));
                }
                0
            })?;
        }

        Ok(changes
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect())
    }
}

impl CommitsGetter for GitRepository {
    fn commits(&self, since: Option<String>) -> Result<Vec<Commit>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push_head()?;

        if let Some(since) = since {
            info!("collecting commits since {since}");
            revwalk.hide(git2::Oid::from_str(&since)?)?;
        }

        let mut commits = vec![];

        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            commits.push(Commit {
                message: commit.message().unwrap_or("").to_string(),
                hash: commit.id().to_string(),
                author: commit.author().name().unwrap_or("").to_string(),
                files: self.changed_files(&commit)?,
            });
        }

        Ok(commits)
    }
}

impl TagsVersionGetter for GitRepository {
    fn versions(&self) -> Result<Vec<Version>> {
        Ok(self
            .version_tags()?
            .into_iter()
            .map(|(version, _)| version)
            .collect())
    }

    fn last_version_hash(&self) -> Result<Option<String>> {
        Ok(self
            .version_tags()?
            .into_iter()
            .max_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, tag)| tag.hash))
    }
}
