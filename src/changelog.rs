//! The structured changelog document and its aggregation rules.
//!
//! A [`Changelog`] is built fresh for every source (markdown, dependabot,
//! renovate) and the results are merged in the order the caller chooses.
//! Merging never deduplicates: feeding the same data twice yields twice the
//! entries.
use log::*;
use serde::{Deserialize, Serialize};

mod dependency;
mod entry;
pub mod io;

pub use dependency::Dependency;
pub use entry::{Entry, EntryType, Meta};

/// Aggregate root for everything that goes into the next release notes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Changelog {
    /// Release is held back for manual gating.
    #[serde(skip_serializing_if = "is_false")]
    pub held: bool,
    /// Free-form markdown placed above the typed sections.
    pub notes: String,
    /// Typed change entries in source order.
    pub changes: Vec<Entry>,
    /// Dependency updates in source order.
    pub dependencies: Vec<Dependency>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Changelog {
    /// True when nothing at all has been recorded, including the held flag.
    pub fn is_empty(&self) -> bool {
        !self.held
            && self.notes.is_empty()
            && self.changes.is_empty()
            && self.dependencies.is_empty()
    }

    /// Append `other` onto this changelog.
    ///
    /// Notes are joined with a blank line. That is a naive strategy: two
    /// sources that both carry notes are reported so a human can check the
    /// result.
    pub fn merge(&mut self, other: Changelog) {
        let ours = self.notes.trim();
        let theirs = other.notes.trim();

        self.notes = match (ours.is_empty(), theirs.is_empty()) {
            (true, _) => theirs.to_string(),
            (false, true) => ours.to_string(),
            (false, false) => {
                warn!("both changelogs carry notes: joining them verbatim");
                format!("{ours}\n\n{theirs}")
            }
        };

        self.held = self.held || other.held;
        self.changes.extend(other.changes);
        self.dependencies.extend(other.dependencies);
    }
}
