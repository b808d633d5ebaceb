//! Error types and handling for sfmc-build
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Two kinds of failure exist:
//! - [`BuildError`]: run-level failures that stop the whole invocation
//! - [`UnitIssue`]: problems scoped to one unit (or one variant of it); these are
//!   collected, reported and never abort the run
//!
//! Constructors for [`BuildError`] are grouped by domain:
//! - [`fs`]: File system errors
//! - [`manifest`]: Manifest and renderer configuration errors

pub mod fs;
pub mod manifest;
pub mod unit;

pub use unit::UnitIssue;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for sfmc-build operations
#[derive(Error, Diagnostic, Debug)]
pub enum BuildError {
    // File system errors
    #[error("Project root not found: {path}")]
    #[diagnostic(
        code(sfmc_build::fs::root_not_found),
        help("Pass an existing directory with --root or run from inside the project")
    )]
    RootNotFound { path: String },

    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(sfmc_build::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(sfmc_build::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(sfmc_build::fs::io_error))]
    IoError { message: String },

    // Manifest errors
    #[error("Failed to parse manifest: {path}: {reason}")]
    #[diagnostic(
        code(sfmc_build::manifest::parse_failed),
        help("Manifests must be valid JSON objects")
    )]
    ManifestParseFailed { path: String, reason: String },

    #[error("Failed to parse documentation config: {path}: {reason}")]
    #[diagnostic(
        code(sfmc_build::docs::config_parse_failed),
        help("Supported keys: headingDepth (1-6), private (bool), fileHeadings (bool)")
    )]
    DocsConfigParseFailed { path: String, reason: String },

    // CLI errors
    #[error("Unknown shell: {shell}")]
    #[diagnostic(
        code(sfmc_build::cli::unknown_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnknownShell { shell: String },

    #[error("{failed} of {found} units were not updated")]
    #[diagnostic(
        code(sfmc_build::build::units_failed),
        help("Fix the errors listed above and re-run the printed command")
    )]
    UnitsFailed { failed: usize, found: usize },
}

impl From<std::io::Error> for BuildError {
    fn from(err: std::io::Error) -> Self {
        BuildError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, BuildError>;
