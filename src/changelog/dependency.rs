use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt::Display};

use crate::{bump::Bump, changelog::Meta, version::Version};

/// An update of a single dependency, as found in a bot commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Version>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Version>,
    /// Link to the human readable changelog of the dependency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changelog: Option<String>,
    #[serde(default, skip_serializing_if = "Meta::is_empty")]
    pub meta: Meta,
}

impl Dependency {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Bump implied by this update. Without both versions the safe guess is
    /// a patch.
    pub fn bump(&self) -> Bump {
        match (&self.from, &self.to) {
            (Some(from), Some(to)) => Bump::between(from, to),
            _ => Bump::Patch,
        }
    }

    pub fn verb(&self) -> &'static str {
        match (&self.from, &self.to) {
            (Some(from), Some(to)) => match to.cmp(from) {
                Ordering::Greater => "Upgraded",
                Ordering::Less => "Downgraded",
                Ordering::Equal => "Updated",
            },
            _ => "Updated",
        }
    }
}

impl Display for Dependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ", self.verb())?;

        match &self.changelog {
            Some(link) => write!(f, "[{}]({link})", self.name)?,
            None => f.write_str(&self.name)?,
        }

        if let Some(from) = &self.from {
            write!(f, " from {from}")?;
        }
        if let Some(to) = &self.to {
            write!(f, " to {to}")?;
        }
        if let Some(pr) = &self.meta.pr {
            write!(f, " (#{pr})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dep(from: Option<&str>, to: Option<&str>) -> Dependency {
        Dependency {
            name: "foo".into(),
            from: from.map(|v| Version::parse(v).unwrap()),
            to: to.map(|v| Version::parse(v).unwrap()),
            ..Default::default()
        }
    }

    #[test]
    fn picks_verb_from_version_order() {
        assert_eq!(dep(Some("1.0.0"), Some("1.1.0")).verb(), "Upgraded");
        assert_eq!(dep(Some("1.1.0"), Some("1.0.0")).verb(), "Downgraded");
        assert_eq!(dep(Some("1.0.0"), Some("v1.0.0")).verb(), "Updated");
        assert_eq!(dep(None, Some("1.0.0")).verb(), "Updated");
        assert_eq!(dep(None, None).verb(), "Updated");
    }

    #[test]
    fn bump_defaults_to_patch() {
        assert_eq!(dep(None, Some("2.0.0")).bump(), Bump::Patch);
        assert_eq!(dep(Some("1.0.0"), Some("2.0.0")).bump(), Bump::Major);
        assert_eq!(dep(Some("1.0.0"), Some("1.0.0")).bump(), Bump::None);
    }

    #[test]
    fn displays_human_line() {
        let mut dependency = dep(Some("v1.0.0"), Some("v1.2.0"));
        assert_eq!(dependency.to_string(), "Upgraded foo from v1.0.0 to v1.2.0");

        dependency.changelog = Some("https://example.com/foo".into());
        dependency.meta.pr = Some("7".into());
        assert_eq!(
            dependency.to_string(),
            "Upgraded [foo](https://example.com/foo) from v1.0.0 to v1.2.0 (#7)"
        );

        assert_eq!(dep(None, Some("3")).to_string(), "Updated foo to 3");
    }
}
