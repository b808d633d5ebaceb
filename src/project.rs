//! Project metadata lookups

use std::path::Path;

use serde_json::Value;

/// Repository URL of the project at `root`, if one can be found
///
/// `package.json`'s `repository` field wins (string or `{ "url": ... }`);
/// otherwise the `origin` remote of the enclosing git repository is used.
pub fn repository_url(root: &Path) -> Option<String> {
    package_repository(root).or_else(|| git_origin(root))
}

fn package_repository(root: &Path) -> Option<String> {
    let content = std::fs::read_to_string(root.join("package.json")).ok()?;
    let package: Value = serde_json::from_str(&content).ok()?;
    let url = match package.get("repository")? {
        Value::String(url) => url.as_str(),
        Value::Object(repo) => repo.get("url")?.as_str()?,
        _ => return None,
    };
    let url = url.trim().trim_start_matches("git+");
    (!url.is_empty()).then(|| url.to_string())
}

fn git_origin(root: &Path) -> Option<String> {
    let repo = git2::Repository::discover(root).ok()?;
    let remote = repo.find_remote("origin").ok()?;
    remote.url().map(str::to_string)
}
