//! Validate command implementation.
use color_eyre::eyre::{WrapErr, eyre};
use log::*;
use std::{fs, path::Path};

use bump_changelog::markdown::validator;

use crate::result::Result;

/// Log every violation and fail when there is at least one.
pub fn execute(file: &Path) -> Result<()> {
    let content = fs::read_to_string(file)
        .wrap_err_with(|| format!("failed to read {}", file.display()))?;

    let violations = validator::validate(&content)
        .wrap_err_with(|| format!("failed to parse {}", file.display()))?;

    if violations.is_empty() {
        info!("{} is valid", file.display());
        return Ok(());
    }

    for violation in &violations {
        error!("{}: {violation}", file.display());
    }

    Err(eyre!(
        "{} has {} violation(s)",
        file.display(),
        violations.len()
    ))
}
