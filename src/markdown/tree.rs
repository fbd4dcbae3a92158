//! Heading tree: markdown sections nested by heading level.
//!
//! Sections live in a flat arena and refer to each other by index. The parent
//! link is only used while building, to walk back up when a heading closes
//! the current section.
use log::*;

use crate::{
    diagnostics::Diagnostics,
    error::{ChangelogError, Result},
    markdown::{self, Node},
};

/// Index of a section inside its [`HeadingTree`].
pub type SectionId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Heading text.
    pub name: String,
    pub level: u8,
    /// Blocks of this section, starting with the heading itself.
    pub content: Vec<Node>,
    pub children: Vec<SectionId>,
    pub parent: Option<SectionId>,
}

impl Section {
    /// True when the section holds nothing but its heading.
    pub fn is_empty(&self) -> bool {
        self.content.len() <= 1
    }

    /// Content after the heading node.
    pub fn body(&self) -> &[Node] {
        self.content.get(1..).unwrap_or_default()
    }
}

/// Sections of a markdown document nested by heading level.
///
/// The first heading must be a non-empty level 1 heading and becomes the
/// root. Every following heading nests under the closest previous heading
/// with a lower level. Content before the root is dropped, and so are
/// headings at the root's own level.
///
/// # Examples
///
/// ```
/// use bump_changelog::{diagnostics::Diagnostics, markdown::tree::HeadingTree};
///
/// let content = "# Changelog\n\n## Unreleased\n\n### Breaking changes\n\n- x\n";
/// let tree = HeadingTree::parse(content, &mut Diagnostics::new()).unwrap();
///
/// let root = tree.root().unwrap();
/// let breaking = tree.find_one(root, "breaking").unwrap();
/// assert_eq!(tree.section(breaking).name, "Breaking changes");
/// assert_eq!(tree.section(breaking).level, 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HeadingTree {
    sections: Vec<Section>,
    current: Option<SectionId>,
}

impl HeadingTree {
    /// Parse markdown content into a tree.
    pub fn parse(content: &str, diagnostics: &mut Diagnostics) -> Result<Self> {
        Self::from_node(&markdown::parse(content), diagnostics)
    }

    /// Build a tree from a [`Node::Document`].
    pub fn from_node(node: &Node, diagnostics: &mut Diagnostics) -> Result<Self> {
        let Node::Document(blocks) = node else {
            return Err(ChangelogError::NotADocument);
        };

        let mut tree = Self::default();
        for block in blocks {
            tree.append(block.clone(), diagnostics)?;
        }
        Ok(tree)
    }

    /// The level 1 section, absent when the document has no headings.
    pub fn root(&self) -> Option<SectionId> {
        if self.sections.is_empty() { None } else { Some(0) }
    }

    pub fn section(&self, id: SectionId) -> &Section {
        &self.sections[id]
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    fn push_section(
        &mut self,
        name: &str,
        level: u8,
        parent: Option<SectionId>,
        heading: Node,
    ) -> SectionId {
        let id = self.sections.len();
        self.sections.push(Section {
            name: name.to_string(),
            level,
            content: vec![heading],
            children: vec![],
            parent,
        });
        if let Some(parent) = parent {
            self.sections[parent].children.push(id);
        }
        id
    }

    /// Fold one block into the tree.
    fn append(
        &mut self,
        node: Node,
        diagnostics: &mut Diagnostics,
    ) -> Result<()> {
        let Some((level, text)) =
            node.heading().map(|(level, text)| (level, text.to_string()))
        else {
            match self.current {
                Some(current) => self.sections[current].content.push(node),
                None => diagnostics.debug(
                    "dropping markdown content found before the first heading",
                ),
            }
            return Ok(());
        };

        let Some(mut current) = self.current else {
            if text.is_empty() {
                return Err(ChangelogError::EmptyHeading);
            }
            if level != 1 {
                return Err(ChangelogError::RootNotLevelOne(level));
            }
            self.current = Some(self.push_section(&text, level, None, node));
            return Ok(());
        };

        // walk up until we find a section this heading can nest under
        while level <= self.sections[current].level {
            match self.sections[current].parent {
                Some(parent) => current = parent,
                None => {
                    diagnostics.warn(format!(
                        "dropping heading \"{text}\": headings next to the level 1 root are not supported"
                    ));
                    return Ok(());
                }
            }
        }

        trace!("nesting \"{text}\" under \"{}\"", self.sections[current].name);
        self.current = Some(self.push_section(&text, level, Some(current), node));
        Ok(())
    }

    /// Sections at or below `id` whose name contains `needle`, ignoring case.
    ///
    /// A matching section is returned without searching its children.
    pub fn find(&self, id: SectionId, needle: &str) -> Vec<SectionId> {
        let needle = needle.to_lowercase();
        let mut found = vec![];
        self.find_into(id, &needle, &mut found);
        found
    }

    fn find_into(&self, id: SectionId, needle: &str, found: &mut Vec<SectionId>) {
        let section = &self.sections[id];
        if section.name.to_lowercase().contains(needle) {
            found.push(id);
            return;
        }
        for child in &section.children {
            self.find_into(*child, needle, found);
        }
    }

    /// First section matching `needle` in document order.
    pub fn find_one(&self, id: SectionId, needle: &str) -> Option<SectionId> {
        self.find(id, needle).into_iter().next()
    }

    /// Markdown of a section and everything nested under it.
    pub fn render(&self, id: SectionId) -> String {
        let mut nodes = vec![];
        self.collect_nodes(id, &mut nodes);
        markdown::join_markdown(&nodes)
    }

    fn collect_nodes(&self, id: SectionId, nodes: &mut Vec<Node>) {
        let section = &self.sections[id];
        nodes.extend(section.content.iter().cloned());
        for child in &section.children {
            self.collect_nodes(*child, nodes);
        }
    }
}

#[cfg(test)]
#[path = "./tree_tests.rs"]
mod tests;
