//! Structured changelogs for releases driven by humans and dependency bots.
//!
//! Changelog data is collected from a markdown `CHANGELOG.md` and from the
//! commits of dependabot and renovate, merged into one [`Changelog`], and
//! then used to decide the next version, render release notes and splice
//! them into the markdown changelog.
pub mod bump;
pub mod bumper;
pub mod changelog;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod git;
pub mod linker;
pub mod markdown;
pub mod render;
pub mod source;
pub mod version;

pub use changelog::Changelog;
pub use error::{ChangelogError, Result};
