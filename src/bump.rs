//! Version bump severities and how they apply to a version.
use semver::{BuildMetadata, Prerelease};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::version::Version;

/// Severity of a version bump. Variants are declared in increasing order so
/// the derived ordering is the bump lattice.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Bump {
    #[default]
    None,
    Patch,
    Minor,
    Major,
}

impl Bump {
    /// The larger of two bumps.
    pub fn compose(self, other: Bump) -> Bump {
        self.max(other)
    }

    /// Limit this bump to at most `limit`.
    pub fn cap(self, limit: Bump) -> Bump {
        self.min(limit)
    }

    /// Bump that separates two versions, decided by the most significant
    /// differing component.
    pub fn between(from: &Version, to: &Version) -> Bump {
        let (a, b) = (from.semver(), to.semver());
        if a.major != b.major {
            Bump::Major
        } else if a.minor != b.minor {
            Bump::Minor
        } else if a.patch != b.patch {
            Bump::Patch
        } else {
            Bump::None
        }
    }

    /// Returns the next version for this bump without touching `version`.
    pub fn apply(self, version: &Version) -> Version {
        if self == Bump::None {
            return version.clone();
        }

        let mut next = version.semver().clone();

        match self {
            Bump::None => {}
            Bump::Patch => {
                // a prerelease of x.y.z graduates to x.y.z
                if next.pre.is_empty() {
                    next.patch += 1;
                }
            }
            Bump::Minor => {
                next.minor += 1;
                next.patch = 0;
            }
            Bump::Major => {
                next.major += 1;
                next.minor = 0;
                next.patch = 0;
            }
        }

        next.pre = Prerelease::EMPTY;
        next.build = BuildMetadata::EMPTY;

        Version::from_semver(next, version.has_prefix())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    const ALL: [Bump; 4] = [Bump::None, Bump::Patch, Bump::Minor, Bump::Major];

    fn v(text: &str) -> Version {
        Version::parse(text).unwrap()
    }

    #[test]
    fn compose_is_commutative_and_idempotent() {
        for a in ALL {
            assert_eq!(a.compose(a), a);
            for b in ALL {
                assert_eq!(a.compose(b), b.compose(a));
            }
        }
        assert_eq!(Bump::Patch.compose(Bump::Minor), Bump::Minor);
    }

    #[test]
    fn cap_limits_severity() {
        assert_eq!(Bump::Major.cap(Bump::Minor), Bump::Minor);
        assert_eq!(Bump::Patch.cap(Bump::Minor), Bump::Patch);
        assert_eq!(Bump::Major.cap(Bump::None), Bump::None);
        assert_eq!(Bump::Minor.cap(Bump::Major), Bump::Minor);
    }

    #[test]
    fn between_uses_most_significant_component() {
        assert_eq!(Bump::between(&v("1.2.3"), &v("2.0.0")), Bump::Major);
        assert_eq!(Bump::between(&v("1.2.3"), &v("1.3.0")), Bump::Minor);
        assert_eq!(Bump::between(&v("1.2.3"), &v("1.2.4")), Bump::Patch);
        assert_eq!(Bump::between(&v("v1.2.3"), &v("1.2.3")), Bump::None);
        // downgrades still separate the versions
        assert_eq!(Bump::between(&v("2.0.0"), &v("1.9.0")), Bump::Major);
    }

    #[test]
    fn apply_resets_lower_components() {
        assert_eq!(Bump::Patch.apply(&v("1.2.3")), v("1.2.4"));
        assert_eq!(Bump::Minor.apply(&v("1.2.3")), v("1.3.0"));
        assert_eq!(Bump::Major.apply(&v("1.2.3")), v("2.0.0"));
        assert_eq!(Bump::None.apply(&v("1.2.3")), v("1.2.3"));
    }

    #[test]
    fn apply_keeps_prefix() {
        let next = Bump::Minor.apply(&v("v0.9.1"));
        assert_eq!(next.original(), "v0.10.0");
    }

    #[test]
    fn apply_does_not_mutate_input() {
        let original = v("v1.2.3-beta");
        let next = Bump::Major.apply(&original);

        assert_eq!(next, v("2.0.0"));
        assert_eq!(original, v("v1.2.3-beta"));
        assert_eq!(original.original(), "v1.2.3-beta");
    }

    #[test]
    fn patch_graduates_prerelease() {
        assert_eq!(Bump::Patch.apply(&v("1.2.3-rc.1")), v("1.2.3"));
    }

    #[test]
    fn parses_from_config_strings() {
        assert_eq!(Bump::from_str("minor").unwrap(), Bump::Minor);
        assert_eq!(Bump::from_str("MAJOR").unwrap(), Bump::Major);
        assert_eq!(Bump::Patch.to_string(), "patch");
    }
}
