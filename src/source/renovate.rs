//! Dependency updates from renovate commits.
//!
//! Renovate commit titles are too free-form to recognise by content, so only
//! commits authored by renovate are considered. The commit body usually holds
//! a markdown table with one row per updated package; when it does not, the
//! title is picked apart instead.
use regex::Regex;
use std::sync::LazyLock;

use crate::{
    changelog::{Changelog, Dependency, Meta},
    diagnostics::Diagnostics,
    error::Result,
    git::{Commit, CommitsGetter},
    source::{CommitSourceConfig, Source},
    version::Version,
};

/// `[name](url)` in the package column of the body table.
static LINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]*\)").unwrap());

/// `` `from` -> `to` `` in the change column of the body table.
static CHANGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`\s*->\s*`([^`]+)`").unwrap());

/// Trailing `(#123)` or `(!123)` on the title.
static PR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([#!](\d+)\)\s*$").unwrap());

static UPDATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)update (.+)").unwrap());

static TITLE_PR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s*\([#!](\d+)\)\s*$").unwrap());

static TITLE_TO_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+) to (v?\d\S*)$").unwrap());

/// Words renovate puts around a package name depending on the manager.
const MANAGER_AFFIXES: [&str; 5] =
    ["helm release", "module", "docker tag", "action", "dependency"];

const RENOVATE_AUTHOR: &str = "renovate";

/// Dependency updates from renovate commits.
///
/// Only commits whose author contains "renovate" are read. The body table
/// is preferred over the title, and dependencies come out oldest first
/// with table rows in table order.
pub struct RenovateSource<'g> {
    getter: &'g dyn CommitsGetter,
    config: CommitSourceConfig,
}

impl<'g> RenovateSource<'g> {
    pub fn new(getter: &'g dyn CommitsGetter, config: CommitSourceConfig) -> Self {
        Self { getter, config }
    }
}

impl Source for RenovateSource<'_> {
    fn changelog(&self, diagnostics: &mut Diagnostics) -> Result<Changelog> {
        let commits = self.config.commits(self.getter, diagnostics)?;
        let mut dependencies = vec![];

        for commit in &commits {
            if !commit.author.to_lowercase().contains(RENOVATE_AUTHOR) {
                diagnostics.debug(format!(
                    "skipping commit {}: author \"{}\" is not renovate",
                    commit.hash, commit.author
                ));
                continue;
            }
            dependencies.extend(parse_commit(commit, diagnostics));
        }

        // commits arrive newest first
        dependencies.reverse();

        Ok(Changelog {
            dependencies,
            ..Default::default()
        })
    }
}

/// Dependencies updated by a single renovate commit. Table rows come back in
/// reverse table order, ready for the caller's final reversal.
pub fn parse_commit(
    commit: &Commit,
    diagnostics: &mut Diagnostics,
) -> Vec<Dependency> {
    let message = commit.message.trim();

    if message.lines().count() > 1 {
        let mut rows = parse_body(commit, diagnostics);
        if !rows.is_empty() {
            rows.reverse();
            return rows;
        }
    }

    parse_title(commit, diagnostics).into_iter().collect()
}

fn parse_body(commit: &Commit, diagnostics: &mut Diagnostics) -> Vec<Dependency> {
    let title = commit.message.lines().next().unwrap_or_default();
    let pr = PR_REGEX.captures(title).map(|c| c[1].to_string());

    commit
        .message
        .lines()
        .skip(1)
        .filter_map(|line| parse_row(line, diagnostics))
        .map(|(name, from, to)| Dependency {
            name,
            from,
            to,
            changelog: None,
            meta: Meta {
                author: None,
                pr: pr.clone(),
                commit: Some(commit.hash.clone()),
            },
        })
        .collect()
}

/// Parse a `| package | update | change |` table row.
fn parse_row(
    line: &str,
    diagnostics: &mut Diagnostics,
) -> Option<(String, Option<Version>, Option<Version>)> {
    let line = line.trim();
    if !line.starts_with('|') || !line.ends_with('|') || line.len() < 2 {
        return None;
    }

    let cells: Vec<&str> = line[1..line.len() - 1].split('|').map(str::trim).collect();
    if cells.len() != 3 {
        diagnostics.debug(format!("skipping table row with {} cells: {line}", cells.len()));
        return None;
    }

    let Some(change) = CHANGE_REGEX.captures(cells[2]) else {
        diagnostics.debug(format!("skipping table row without a version change: {line}"));
        return None;
    };

    let name = match LINK_REGEX.captures(cells[0]) {
        Some(link) => link[1].to_string(),
        None => cells[0].trim_matches('`').to_string(),
    };

    Some((
        name,
        lenient_version(&change[1], diagnostics),
        lenient_version(&change[2], diagnostics),
    ))
}

/// Parse a title like `chore(deps): update helm release foo to v1.0.4 (#12)`.
fn parse_title(commit: &Commit, diagnostics: &mut Diagnostics) -> Option<Dependency> {
    let title = commit.message.lines().next().unwrap_or_default().trim();

    let Some(update) = UPDATE_REGEX.captures(title) else {
        diagnostics.debug(format!(
            "skipping commit {}: title is not a renovate update: {title}",
            commit.hash
        ));
        return None;
    };
    let mut rest = update.get(1).map_or("", |m| m.as_str()).trim();

    let mut pr = None;
    if let Some(captures) = TITLE_PR_REGEX.captures(rest) {
        pr = Some(captures[2].to_string());
        rest = captures.get(1).map_or(rest, |m| m.as_str());
    }

    let mut to = None;
    if let Some(captures) = TITLE_TO_REGEX.captures(rest) {
        to = lenient_version(&captures[2], diagnostics);
        rest = captures.get(1).map_or(rest, |m| m.as_str());
    }

    let name = strip_affixes(rest.trim());
    if name.is_empty() {
        diagnostics.debug(format!("skipping commit {}: no package name", commit.hash));
        return None;
    }

    Some(Dependency {
        name,
        from: None,
        to,
        changelog: None,
        meta: Meta {
            author: None,
            pr,
            commit: Some(commit.hash.clone()),
        },
    })
}

/// Remove manager words from the start or end of a name, leaving names that
/// merely contain one of them (`my-module`) alone.
fn strip_affixes(name: &str) -> String {
    let mut name = name.to_string();

    for affix in MANAGER_AFFIXES {
        let lower = name.to_lowercase();
        if lower.starts_with(&format!("{affix} ")) {
            name = name[affix.len() + 1..].trim_start().to_string();
        } else if lower.ends_with(&format!(" {affix}")) {
            name = name[..name.len() - affix.len() - 1].trim_end().to_string();
        }
    }

    name
}

fn lenient_version(text: &str, diagnostics: &mut Diagnostics) -> Option<Version> {
    match Version::parse(text) {
        Ok(version) => Some(version),
        Err(err) => {
            diagnostics.debug(format!("ignoring version \"{text}\": {err}"));
            None
        }
    }
}

#[cfg(test)]
#[path = "./renovate_tests.rs"]
mod tests;
