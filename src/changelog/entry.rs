use serde::{Deserialize, Serialize};
use std::fmt::Display;
use strum::{Display as StrumDisplay, EnumString};

use crate::bump::Bump;

/// Kind of a typed changelog entry.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    StrumDisplay,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EntryType {
    Enhancement,
    Bugfix,
    Security,
    Breaking,
    /// Reserved: dependency updates are tracked as [`super::Dependency`].
    Dependency,
}

impl EntryType {
    pub fn bump(self) -> Bump {
        match self {
            EntryType::Bugfix => Bump::Patch,
            EntryType::Enhancement | EntryType::Security => Bump::Minor,
            EntryType::Breaking => Bump::Major,
            EntryType::Dependency => Bump::None,
        }
    }
}

/// Where a change came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Pull (or merge) request number, without the leading `#`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

impl Meta {
    pub fn is_empty(&self) -> bool {
        self.author.is_none() && self.pr.is_none() && self.commit.is_none()
    }
}

/// A single typed change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "type")]
    pub kind: EntryType,
    pub message: String,
    #[serde(default, skip_serializing_if = "Meta::is_empty")]
    pub meta: Meta,
}

impl Entry {
    pub fn new(kind: EntryType, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            meta: Meta::default(),
        }
    }

    pub fn bump(&self) -> Bump {
        self.kind.bump()
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)?;
        if let Some(pr) = &self.meta.pr {
            write!(f, " (#{pr})")?;
        }
        if let Some(author) = &self.meta.author {
            write!(f, " by @{author}")?;
        }
        Ok(())
    }
}
