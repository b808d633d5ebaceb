//! File system errors

use super::BuildError;

/// Creates a file read failed error
pub fn read_failed(path: impl Into<String>, reason: impl ToString) -> BuildError {
    BuildError::FileReadFailed {
        path: path.into(),
        reason: reason.to_string(),
    }
}

/// Creates a file write failed error
pub fn write_failed(path: impl Into<String>, reason: impl ToString) -> BuildError {
    BuildError::FileWriteFailed {
        path: path.into(),
        reason: reason.to_string(),
    }
}

/// Creates a root not found error
pub fn root_not_found(path: impl Into<String>) -> BuildError {
    BuildError::RootNotFound { path: path.into() }
}
