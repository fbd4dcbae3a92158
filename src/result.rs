//! Result type for the command layer.
//!
//! Library code returns [`crate::error::Result`] with typed errors; the CLI
//! commands convert everything into a `color_eyre` report so failures print
//! with their wrapped context.
//!
//! ```rust,ignore
//! use color_eyre::eyre::WrapErr;
//!
//! fn load(path: &str) -> Result<Changelog> {
//!     changelog::io::read(path).wrap_err("failed to read changelog file")
//! }
//! ```

use color_eyre::eyre::Result as EyreResult;

/// Standard result type used by the CLI commands.
pub type Result<T> = EyreResult<T>;
