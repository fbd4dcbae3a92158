//! Decides the next version from a changelog.
use log::*;
use serde::{Deserialize, Serialize};

use crate::{
    bump::Bump,
    changelog::Changelog,
    error::{ChangelogError, Result},
    git::TagsVersionGetter,
    version::Version,
};

/// Upper limits for the bump implied by each part of a changelog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BumpCaps {
    /// Limit for the bump implied by `changes`.
    pub changes: Bump,
    /// Limit for the bump implied by `dependencies`.
    pub dependencies: Bump,
}

impl Default for BumpCaps {
    fn default() -> Self {
        Self {
            changes: Bump::Major,
            dependencies: Bump::Major,
        }
    }
}

/// Decides the next version implied by a [`Changelog`].
///
/// Changes and dependency updates are looked at separately: each part takes
/// the largest bump among its items, limited by its cap in [`BumpCaps`].
/// The larger of the two results is applied to the current version.
///
/// # Examples
///
/// ```
/// use bump_changelog::{
///     bump::Bump,
///     bumper::{BumpCaps, Bumper},
///     changelog::{Changelog, Entry, EntryType},
///     version::Version,
/// };
///
/// let changelog = Changelog {
///     changes: vec![Entry::new(EntryType::Breaking, "removed the v1 api")],
///     ..Default::default()
/// };
/// let caps = BumpCaps {
///     changes: Bump::Minor,
///     ..Default::default()
/// };
///
/// let next = Bumper::new(&changelog, caps).bump(&Version::parse("v1.4.2").unwrap());
/// assert_eq!(next.original(), "v1.5.0");
/// ```
pub struct Bumper<'c> {
    changelog: &'c Changelog,
    caps: BumpCaps,
}

impl<'c> Bumper<'c> {
    pub fn new(changelog: &'c Changelog, caps: BumpCaps) -> Self {
        Self { changelog, caps }
    }

    /// Bump implied by the changelog once each part is capped.
    pub fn severity(&self) -> Bump {
        let changes = self
            .changelog
            .changes
            .iter()
            .map(|entry| entry.bump().cap(self.caps.changes))
            .fold(Bump::None, Bump::compose);

        let dependencies = self
            .changelog
            .dependencies
            .iter()
            .map(|dependency| dependency.bump().cap(self.caps.dependencies))
            .fold(Bump::None, Bump::compose);

        changes.compose(dependencies)
    }

    pub fn bump(&self, current: &Version) -> Version {
        let severity = self.severity();
        let next = severity.apply(current);
        debug!("{severity} bump: {current} -> {next}");
        next
    }

    /// Bump the highest version known to `tags`.
    pub fn bump_source(&self, tags: &dyn TagsVersionGetter) -> Result<Version> {
        let current = tags
            .versions()?
            .into_iter()
            .max()
            .ok_or(ChangelogError::NoTags)?;

        info!("current version: {current}");

        Ok(self.bump(&current))
    }
}
