//! Cross-platform path utilities
//!
//! Paths shown to users, written into bundle headers or matched against globs
//! always use forward slashes.

use std::path::Path;

/// Convert a path to a string with forward slashes
///
/// # Examples
///
/// ```ignore
/// let forward = to_forward_slashes(Path::new("pages\\landing\\cloudpage.json"));
/// assert_eq!(forward, "pages/landing/cloudpage.json");
/// ```
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Path of `path` relative to `root`, forward-slashed
///
/// Falls back to the full path when `path` is not below `root`. The root
/// itself is reported as `.`.
pub fn relative_to(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Ok(rel) => to_forward_slashes(rel),
        Err(_) => to_forward_slashes(path),
    }
}
