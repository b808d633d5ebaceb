//! Problems scoped to a single unit or variant
//!
//! Each pipeline step returns the issues it found instead of mutating a shared
//! status record; the orchestrator merges them and decides whether a write
//! may happen.

use thiserror::Error;

use super::BuildError;

#[derive(Error, Debug)]
pub enum UnitIssue {
    #[error("File not found ({list}): {file}")]
    MissingFile { list: String, file: String },

    #[error("Invalid manifest: {message}")]
    Invalid { message: String },

    #[error("Configuration error: {message}")]
    ConfigPairing { message: String },

    #[error("Template '{template}' is not defined, bundling untouched content")]
    TemplateNotDefined { template: String },

    #[error("No Markdown created. {pattern} not found")]
    DocsNotRendered { pattern: String },

    #[error(transparent)]
    Unreadable(BuildError),

    #[error(transparent)]
    Write(BuildError),
}

impl UnitIssue {
    /// Creates a missing file issue for the given manifest list key
    pub fn missing_file(list: impl Into<String>, file: impl Into<String>) -> Self {
        UnitIssue::MissingFile {
            list: list.into(),
            file: file.into(),
        }
    }

    /// Whether this issue must prevent the bundle from being written
    pub fn blocks_write(&self) -> bool {
        !matches!(
            self,
            UnitIssue::TemplateNotDefined { .. } | UnitIssue::DocsNotRendered { .. }
        )
    }
}

/// Whether any of the collected issues prevents a write
pub fn any_blocking(issues: &[UnitIssue]) -> bool {
    issues.iter().any(UnitIssue::blocks_write)
}
