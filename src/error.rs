//! Error types for the changelog library.
//!
//! Everything in the library returns [`Result`], whose error is a
//! [`ChangelogError`]. Only structural failures end up here: a markdown
//! document without a usable root heading, a repository without version
//! tags, unreadable files, or malformed YAML, JSON and TOML input.
//!
//! Problems with individual inputs are not errors. A commit that does not
//! look like a bot update or a table row with an unparseable version is
//! skipped and recorded in [`crate::diagnostics::Diagnostics`] instead, and
//! markdown validation problems are returned as
//! [`crate::markdown::validator::Violation`]s.
//!
//! # Examples
//!
//! ```
//! use bump_changelog::{ChangelogError, version::Version};
//!
//! let err = Version::parse("latest").unwrap_err();
//! assert!(matches!(err, ChangelogError::InvalidVersion(_)));
//! ```

use thiserror::Error;

/// Main error type for changelog operations.
///
/// Conversions from the underlying library errors are derived with
/// `#[from]`, so `?` works on their results directly.
#[derive(Error, Debug)]
pub enum ChangelogError {
    // Heading tree errors
    #[error("markdown input is not a document node")]
    NotADocument,

    #[error("heading text is empty")]
    EmptyHeading,

    #[error("root heading must be level 1, found level {0}")]
    RootNotLevelOne(u8),

    // Version errors
    #[error("no version tags found")]
    NoTags,

    #[error("Invalid version format: {0}")]
    InvalidVersion(#[from] semver::Error),

    #[error("Template rendering failed: {0}")]
    TemplateError(#[from] tera::Error),

    // Serialization errors
    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("Git operation failed: {0}")]
    GitError(#[from] git2::Error),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias using ChangelogError
pub type Result<T> = std::result::Result<T, ChangelogError>;

