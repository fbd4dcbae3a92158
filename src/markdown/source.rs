//! Changelog entries from the "Unreleased" section of a hand written
//! CHANGELOG.md.
use std::{collections::HashSet, fs, io::Read, path::Path};

use crate::{
    changelog::{Changelog, Entry, EntryType},
    diagnostics::Diagnostics,
    error::Result,
    markdown::{
        Node,
        tree::{HeadingTree, SectionId},
    },
    source::Source,
};

/// Recognized subsections of "Unreleased", in the order their entries are
/// emitted.
const TYPED_SECTIONS: [(&str, EntryType); 4] = [
    ("breaking", EntryType::Breaking),
    ("security", EntryType::Security),
    ("enhancement", EntryType::Enhancement),
    ("bugfix", EntryType::Bugfix),
];

const UNRELEASED: &str = "unreleased";
const HELD: &str = "held";

/// Reads a markdown changelog.
pub struct MarkdownSource {
    content: String,
}

impl MarkdownSource {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Ok(Self::new(content))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(fs::read_to_string(path)?))
    }
}

impl Source for MarkdownSource {
    fn changelog(&self, diagnostics: &mut Diagnostics) -> Result<Changelog> {
        let tree = HeadingTree::parse(&self.content, diagnostics)?;
        let mut changelog = Changelog::default();

        let Some(root) = tree.root() else {
            diagnostics.debug("markdown changelog has no headings");
            return Ok(changelog);
        };

        let Some(unreleased) = tree.find_one(root, UNRELEASED) else {
            diagnostics.debug("markdown changelog has no unreleased section");
            return Ok(changelog);
        };

        let mut visited: HashSet<SectionId> = HashSet::new();

        for (needle, kind) in TYPED_SECTIONS {
            for id in tree.find(unreleased, needle) {
                visited.insert(id);
                changelog
                    .changes
                    .extend(section_entries(&tree, id, kind, diagnostics));
            }
        }

        if let Some(held) = tree.find_one(root, HELD) {
            visited.insert(held);
            if !tree.section(held).is_empty() {
                changelog.held = true;
            }
        }

        changelog.notes = tree
            .section(unreleased)
            .children
            .iter()
            .filter(|id| !visited.contains(id))
            .map(|id| tree.render(*id))
            .collect::<Vec<String>>()
            .join("\n\n");

        Ok(changelog)
    }
}

/// Entries from the itemized lists of a typed section.
fn section_entries(
    tree: &HeadingTree,
    id: SectionId,
    kind: EntryType,
    diagnostics: &mut Diagnostics,
) -> Vec<Entry> {
    let section = tree.section(id);

    if section.is_empty() {
        diagnostics.warn(format!("skipping empty section \"{}\"", section.name));
        return vec![];
    }

    section
        .body()
        .iter()
        .filter_map(|node| match node {
            Node::List { items, .. } => Some(items),
            _ => None,
        })
        .flatten()
        .map(|item| Entry::new(kind, item.clone()))
        .collect()
}

#[cfg(test)]
#[path = "./source_tests.rs"]
mod tests;
