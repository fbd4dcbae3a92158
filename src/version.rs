//! Semantic versions as they appear in tags, bot commits and changelogs.
//!
//! Bots and humans write versions loosely (`v1.2.3`, `3`, `1.2`). A
//! [`Version`] accepts those forms, compares by semantic value only and keeps
//! the literal text it was parsed from so it can be written back verbatim.
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{cmp::Ordering, fmt::Display, hash::Hash, str::FromStr};

use crate::error::Result;

/// A leniently parsed semantic version.
///
/// # Examples
///
/// ```
/// use bump_changelog::version::Version;
///
/// let version = Version::parse("v2").unwrap();
/// assert_eq!(version.semver().to_string(), "2.0.0");
/// assert_eq!(version.original(), "v2");
/// ```
#[derive(Debug, Clone)]
pub struct Version {
    original: String,
    semver: semver::Version,
}

impl Version {
    /// Parse a version, tolerating a leading `v` and missing minor/patch
    /// components.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let bare = strip_prefix(trimmed);
        let semver = semver::Version::parse(&pad_components(bare))?;

        Ok(Self {
            original: trimmed.to_string(),
            semver,
        })
    }

    /// Build a version from a semver value, optionally with a `v` prefix.
    pub fn from_semver(semver: semver::Version, prefixed: bool) -> Self {
        let original = if prefixed {
            format!("v{semver}")
        } else {
            semver.to_string()
        };
        Self { original, semver }
    }

    pub fn semver(&self) -> &semver::Version {
        &self.semver
    }

    /// The literal text this version was parsed from.
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn has_prefix(&self) -> bool {
        self.original.starts_with(['v', 'V'])
    }

    /// Same version with the leading `v` added when missing or removed when
    /// present.
    pub fn toggle_prefix(&self) -> Self {
        let original = if self.has_prefix() {
            self.original[1..].to_string()
        } else {
            format!("v{}", self.original)
        };
        Self {
            original,
            semver: self.semver.clone(),
        }
    }
}

fn strip_prefix(text: &str) -> &str {
    text.strip_prefix(['v', 'V']).unwrap_or(text)
}

/// Pads `1` to `1.0.0` and `1.2` to `1.2.0`, leaving prerelease and build
/// suffixes untouched.
fn pad_components(text: &str) -> String {
    let split_at = text.find(['-', '+']).unwrap_or(text.len());
    let (core, suffix) = text.split_at(split_at);
    let parts: Vec<&str> = core.split('.').collect();

    let numeric = parts
        .iter()
        .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()));

    if !numeric || parts.len() >= 3 {
        return text.to_string();
    }

    let mut padded = parts.join(".");
    for _ in parts.len()..3 {
        padded.push_str(".0");
    }
    padded.push_str(suffix);
    padded
}

impl FromStr for Version {
    type Err = crate::error::ChangelogError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.original)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.semver == other.semver
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.semver.cmp(&other.semver)
    }
}

impl Hash for Version {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.semver.hash(state)
    }
}

impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.original)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Version::parse(&text).map_err(serde::de::Error::custom)
    }
}
