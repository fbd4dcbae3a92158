//! Splices a freshly rendered release section into an existing changelog.
//!
//! The existing document is scanned once, line by line. The "Unreleased"
//! section is emptied, a "Held" section is dropped, and the new section is
//! inserted right before the first other level 2 header (or appended at the
//! end when there is none). Every other line is copied verbatim.
use log::*;
use regex::Regex;
use std::{
    io::{BufRead, Write},
    sync::LazyLock,
};

use crate::error::Result;

static UNRELEASED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^##\s+unreleased").unwrap());

static HELD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^##\s+held").unwrap());

/// Any level 2 header; `###` and deeper never match.
static L2_HEADER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^##\s+\S").unwrap());

/// Merge `section` into the document read from `existing`, writing the
/// result to `output`.
pub fn merge<R: BufRead, W: Write>(
    existing: R,
    section: &str,
    output: &mut W,
) -> Result<()> {
    let mut pending = Some(section.trim());
    let mut ignore = false;

    for line in existing.lines() {
        let line = line?;

        if UNRELEASED_REGEX.is_match(&line) {
            debug!("emptying section: {line}");
            writeln!(output, "{line}\n")?;
            ignore = true;
            continue;
        }

        if HELD_REGEX.is_match(&line) {
            debug!("dropping section: {line}");
            ignore = true;
            continue;
        }

        if L2_HEADER_REGEX.is_match(&line) {
            ignore = false;
            if let Some(section) = pending.take()
                && !section.is_empty()
            {
                debug!("inserting new section before: {line}");
                write!(output, "{section}\n\n")?;
            }
        }

        if !ignore {
            writeln!(output, "{line}")?;
        }
    }

    if let Some(section) = pending.take()
        && !section.is_empty()
    {
        debug!("appending new section at end of document");
        writeln!(output, "{section}")?;
    }

    output.flush()?;

    Ok(())
}

/// [`merge`] over in-memory strings.
pub fn merge_str(existing: &str, section: &str) -> Result<String> {
    let mut output = vec![];
    merge(existing.as_bytes(), section, &mut output)?;
    Ok(String::from_utf8_lossy(&output).into_owned())
}
