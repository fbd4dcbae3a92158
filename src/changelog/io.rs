//! Reading and writing the structured changelog file.
//!
//! YAML is the default format; a `.json` extension switches to JSON.
use std::{fs, path::Path};

use crate::{changelog::Changelog, error::Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

pub fn from_str(content: &str, format: Format) -> Result<Changelog> {
    let changelog = match format {
        Format::Yaml => serde_yaml::from_str(content)?,
        Format::Json => serde_json::from_str(content)?,
    };
    Ok(changelog)
}

pub fn to_string(changelog: &Changelog, format: Format) -> Result<String> {
    let content = match format {
        Format::Yaml => serde_yaml::to_string(changelog)?,
        Format::Json => serde_json::to_string_pretty(changelog)?,
    };
    Ok(content)
}

/// Load a changelog file. An empty file is an empty changelog.
pub fn read(path: impl AsRef<Path>) -> Result<Changelog> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    if content.trim().is_empty() {
        return Ok(Changelog::default());
    }

    from_str(&content, Format::from_path(path))
}

pub fn write(path: impl AsRef<Path>, changelog: &Changelog) -> Result<()> {
    let path = path.as_ref();
    let content = to_string(changelog, Format::from_path(path))?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{
        changelog::{Dependency, Entry, EntryType, Meta},
        version::Version,
    };

    fn full_changelog() -> Changelog {
        Changelog {
            held: true,
            notes: "Line one\n\nLine two".into(),
            changes: vec![Entry {
                kind: EntryType::Security,
                message: "Patch CVE".into(),
                meta: Meta {
                    author: Some("alice".into()),
                    pr: Some("12".into()),
                    commit: Some("abc123".into()),
                },
            }],
            dependencies: vec![Dependency {
                name: "github.com/org/repo".into(),
                to: Some(Version::parse("v1.0.4").unwrap()),
                ..Default::default()
            }],
        }
    }

    #[test]
    fn yaml_round_trip() {
        let changelog = full_changelog();
        let yaml = to_string(&changelog, Format::Yaml).unwrap();
        let parsed = from_str(&yaml, Format::Yaml).unwrap();
        assert_eq!(parsed, changelog);
        assert_eq!(parsed.dependencies[0].from, None);
    }

    #[test]
    fn yaml_keeps_version_literals_and_omits_empty_fields() {
        let mut changelog = full_changelog();
        changelog.held = false;
        changelog.changes[0].meta = Meta::default();

        let yaml = to_string(&changelog, Format::Yaml).unwrap();

        assert!(yaml.contains("v1.0.4"));
        assert!(!yaml.contains("held"));
        assert!(!yaml.contains("meta"));
        assert!(!yaml.contains("from"));
    }

    #[test]
    fn reads_hand_written_yaml() {
        let yaml = r#"
notes: hello
changes:
  - type: bugfix
    message: fixed it
dependencies:
  - name: foo
    from: 1.0.0
    to: v2.0.0
    meta:
      pr: "3"
"#;
        let changelog = from_str(yaml, Format::Yaml).unwrap();
        assert!(!changelog.held);
        assert_eq!(changelog.changes[0].kind, EntryType::Bugfix);
        assert_eq!(changelog.dependencies[0].to.as_ref().unwrap().original(), "v2.0.0");
        assert_eq!(changelog.dependencies[0].meta.pr.as_deref(), Some("3"));
    }

    #[test]
    fn file_round_trip_by_extension() {
        let tmp = TempDir::new().unwrap();
        let changelog = full_changelog();

        for name in ["changelog.yaml", "changelog.json"] {
            let path = tmp.path().join(name);
            write(&path, &changelog).unwrap();
            assert_eq!(read(&path).unwrap(), changelog);
        }

        let json = fs::read_to_string(tmp.path().join("changelog.json")).unwrap();
        assert!(json.trim_start().starts_with('{'));
    }

    #[test]
    fn empty_file_is_empty_changelog() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("empty.yaml");
        fs::write(&path, "").unwrap();
        assert!(read(&path).unwrap().is_empty());
    }
}
