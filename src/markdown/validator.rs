//! Structural checks for a hand written CHANGELOG.md.
//!
//! The validator is stricter than [`super::source::MarkdownSource`]: it
//! reports every problem it finds and never stops at the first one.
use thiserror::Error;

use crate::{
    diagnostics::Diagnostics,
    error::{ChangelogError, Result},
    markdown::tree::{HeadingTree, SectionId},
};

const ROOT_NAME: &str = "Changelog";

/// Level 3 headings under "Unreleased" that must hold a single list.
const ITEMIZED_SECTIONS: [&str; 5] = [
    "breaking",
    "security",
    "enhancement",
    "bugfix",
    "dependenc",
];

/// A structural problem in a markdown changelog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("document must start with a level 1 \"Changelog\" header")]
    NoChangelogHeader,

    #[error("document must contain a level 2 \"Unreleased\" header")]
    NoUnreleasedL2Header,

    #[error("\"{parent}\" may only contain level 3 headers, found \"{name}\"")]
    L2WrongChildren { parent: String, name: String },

    #[error("header \"{0}\" has no content")]
    L3HeaderEmptyContent(String),

    #[error("header \"{0}\" must contain a single itemized list")]
    L3HeaderNoItemizedList(String),

    #[error("\"Held\" header must explain why the release is held")]
    EmptyHeldHeader,
}

/// Parse and validate markdown content.
///
/// A document whose first heading is empty or not level 1 has no
/// "Changelog" root to check against, so it is reported as missing both the
/// root and the "Unreleased" header rather than failing.
///
/// # Examples
///
/// ```
/// use bump_changelog::markdown::validator::{Violation, validate};
///
/// let violations = validate("## Unreleased\n\n- fixed\n").unwrap();
/// assert_eq!(
///     violations,
///     vec![Violation::NoChangelogHeader, Violation::NoUnreleasedL2Header]
/// );
/// ```
pub fn validate(content: &str) -> Result<Vec<Violation>> {
    match HeadingTree::parse(content, &mut Diagnostics::new()) {
        Ok(tree) => Ok(validate_tree(&tree)),
        Err(ChangelogError::EmptyHeading | ChangelogError::RootNotLevelOne(_)) => {
            Ok(vec![
                Violation::NoChangelogHeader,
                Violation::NoUnreleasedL2Header,
            ])
        }
        Err(err) => Err(err),
    }
}

pub fn validate_tree(tree: &HeadingTree) -> Vec<Violation> {
    let mut violations = vec![];

    let Some(root) = tree.root() else {
        violations.push(Violation::NoChangelogHeader);
        violations.push(Violation::NoUnreleasedL2Header);
        return violations;
    };

    let root_section = tree.section(root);
    if root_section.level != 1 || root_section.name != ROOT_NAME {
        violations.push(Violation::NoChangelogHeader);
    }

    let has_unreleased = root_section.children.iter().any(|id| {
        let section = tree.section(*id);
        section.level == 2 && section.name.to_lowercase().contains("unreleased")
    });
    if !has_unreleased {
        violations.push(Violation::NoUnreleasedL2Header);
    }

    for id in &root_section.children {
        let section = tree.section(*id);
        let name = section.name.to_lowercase();

        if name.contains("unreleased") {
            check_unreleased(tree, *id, &mut violations);
        } else if name.contains("held") && section.is_empty() {
            violations.push(Violation::EmptyHeldHeader);
        }
    }

    violations
}

fn check_unreleased(
    tree: &HeadingTree,
    id: SectionId,
    violations: &mut Vec<Violation>,
) {
    let unreleased = tree.section(id);

    for child in &unreleased.children {
        let section = tree.section(*child);

        if section.level != 3 {
            violations.push(Violation::L2WrongChildren {
                parent: unreleased.name.clone(),
                name: section.name.clone(),
            });
            continue;
        }

        if section.is_empty() {
            violations.push(Violation::L3HeaderEmptyContent(section.name.clone()));
            continue;
        }

        let name = section.name.to_lowercase();
        let itemized = ITEMIZED_SECTIONS.iter().any(|s| name.contains(s));
        let body = section.body();

        if itemized && !(body.len() == 1 && body[0].is_list()) {
            violations
                .push(Violation::L3HeaderNoItemizedList(section.name.clone()));
        }
    }
}
