//! Command execution for the CLI.
//!
//! Each command reads its inputs in full, runs the library operation and
//! writes its outputs in full:
//!
//! - **extract**: collect a structured changelog from markdown and commits
//! - **validate**: report structural problems of a markdown changelog
//! - **bump**: print the next version implied by a structured changelog
//! - **render**: print the markdown release section of a structured changelog
//! - **merge**: splice the rendered release section into `CHANGELOG.md`
//! - **link**: fill in changelog links for dependency updates
pub mod bump;
pub mod extract;
pub mod link;
pub mod merge;
pub mod render;
pub mod validate;

use color_eyre::eyre::WrapErr;
use std::path::Path;

use bump_changelog::{Changelog, changelog::io};

use crate::result::Result;

/// Read a structured changelog file with the path in the error context.
pub fn read_changelog(path: &Path) -> Result<Changelog> {
    io::read(path)
        .wrap_err_with(|| format!("failed to read changelog {}", path.display()))
}

/// Write a structured changelog file with the path in the error context.
pub fn write_changelog(path: &Path, changelog: &Changelog) -> Result<()> {
    io::write(path, changelog)
        .wrap_err_with(|| format!("failed to write changelog {}", path.display()))
}
