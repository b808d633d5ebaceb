//! Manifest and documentation config errors

use super::BuildError;

/// Creates a manifest parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl ToString) -> BuildError {
    BuildError::ManifestParseFailed {
        path: path.into(),
        reason: reason.to_string(),
    }
}

/// Creates a documentation config parse failed error
pub fn docs_config_failed(path: impl Into<String>, reason: impl ToString) -> BuildError {
    BuildError::DocsConfigParseFailed {
        path: path.into(),
        reason: reason.to_string(),
    }
}
