//! Renders a [`Changelog`] as a markdown release section.
//!
//! The output is made of up to three kinds of parts, each separated by a
//! single blank line:
//!
//! 1. a `## v{version} - {date}` header, when a version or date is known
//! 2. the free-form notes, copied verbatim
//! 3. one `###` section per entry type and one for dependency updates
//!
//! Empty parts are left out entirely, and the result is trimmed as a whole.
//!
//! # Examples
//!
//! ```
//! use bump_changelog::{
//!     changelog::{Changelog, Entry, EntryType},
//!     render::{RenderOptions, render},
//!     version::Version,
//! };
//!
//! let changelog = Changelog {
//!     changes: vec![Entry::new(EntryType::Bugfix, "fixed a crash")],
//!     ..Default::default()
//! };
//! let options = RenderOptions {
//!     version: Some(Version::parse("1.2.4").unwrap()),
//!     date: None,
//! };
//!
//! assert_eq!(
//!     render(&changelog, &options).unwrap(),
//!     "## v1.2.4\n\n### 🐞 Bugfixes\n\n- fixed a crash"
//! );
//! ```
use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    changelog::{Changelog, EntryType},
    error::Result,
    version::Version,
};

/// Template of a single `###` section.
pub const SECTION_TEMPLATE: &str = r#"### {{ title }}

{% for line in lines %}- {{ line }}
{% endfor %}"#;

/// Typed sections in the order they are rendered.
const SECTIONS: [(EntryType, &str); 4] = [
    (EntryType::Breaking, "⚠️ Breaking Changes"),
    (EntryType::Security, "🛡️ Security"),
    (EntryType::Enhancement, "🚀 Enhancements"),
    (EntryType::Bugfix, "🐞 Bugfixes"),
];

const DEPENDENCIES_TITLE: &str = "⛓️ Dependencies";

/// What goes into the section header.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub version: Option<Version>,
    pub date: Option<NaiveDate>,
}

#[derive(Serialize)]
struct Section {
    title: &'static str,
    lines: Vec<String>,
}

impl Section {
    fn render(&self) -> Result<String> {
        let context = tera::Context::from_serialize(self)?;
        let rendered = tera::Tera::one_off(SECTION_TEMPLATE, &context, false)?;
        Ok(rendered.trim_end().to_string())
    }
}

fn header(options: &RenderOptions) -> String {
    let version = options.version.as_ref().map(|v| format!("v{}", v.semver()));
    let date = options.date.map(|d| d.format("%Y-%m-%d").to_string());

    let header = [version, date]
        .into_iter()
        .flatten()
        .collect::<Vec<String>>()
        .join(" - ");

    if header.is_empty() {
        header
    } else {
        format!("## {header}")
    }
}

/// Render the changelog as markdown, trimmed as a whole.
pub fn render(changelog: &Changelog, options: &RenderOptions) -> Result<String> {
    let mut sections: Vec<Section> = SECTIONS
        .iter()
        .map(|(kind, title)| Section {
            title: *title,
            lines: changelog
                .changes
                .iter()
                .filter(|entry| entry.kind == *kind)
                .map(|entry| entry.to_string())
                .collect(),
        })
        .collect();

    sections.push(Section {
        title: DEPENDENCIES_TITLE,
        lines: changelog
            .dependencies
            .iter()
            .map(|dependency| dependency.to_string())
            .collect(),
    });

    let mut parts = vec![header(options), changelog.notes.trim().to_string()];

    for section in sections.iter().filter(|s| !s.lines.is_empty()) {
        parts.push(section.render()?);
    }

    Ok(parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<String>>()
        .join("\n\n")
        .trim()
        .to_string())
}
