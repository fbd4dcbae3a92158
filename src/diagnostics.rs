//! Diagnostics collected while extracting changelog data.
//!
//! Heuristic extraction skips malformed commits, rows and headings instead of
//! failing. Every skip is recorded here so callers and tests can observe it,
//! and is forwarded to the `log` facade at the same time.

use log::*;
use std::fmt::Display;

/// Severity of a recorded diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Warn,
}

/// A single recorded diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
}

/// Sink for diagnostics produced by extraction and parsing.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an item that was skipped as part of normal operation.
    pub fn debug(&mut self, message: impl Display) {
        let message = message.to_string();
        debug!("{message}");
        self.entries.push(Diagnostic {
            level: Level::Debug,
            message,
        });
    }

    /// Record something a human should probably look at.
    pub fn warn(&mut self, message: impl Display) {
        let message = message.to_string();
        warn!("{message}");
        self.entries.push(Diagnostic {
            level: Level::Warn,
            message,
        });
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(|d| d.level == Level::Warn)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
