//! Manifest discovery
//!
//! Walks the invocation root for every file with the requested manifest name.
//! Results are sorted so repeated runs process units in the same order.

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Directories that never contain units of this project
const SKIPPED_DIRS: &[&str] = &["node_modules", ".git"];

fn is_skipped(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

/// Find all manifests named `file_name` below `root`
pub fn discover_manifests(root: &Path, file_name: &str) -> Vec<PathBuf> {
    let mut manifests: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| !is_skipped(e))
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file() && e.file_name() == file_name)
        .map(DirEntry::into_path)
        .collect();

    manifests.sort();
    manifests
}
