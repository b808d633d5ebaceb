//! Informational header prepended to every written bundle

use chrono::{DateTime, Utc};

use super::loader::LibMode;

/// Everything the header reports about a bundle
#[derive(Debug, Clone)]
pub struct BundleHeader<'a> {
    pub manifest_file: &'a str,
    pub target: &'a str,
    pub template: Option<&'a str>,
    pub author: &'a str,
    pub repository: Option<&'a str>,
    pub unit_path: &'a str,
    pub lib_mode: Option<LibMode>,
}

impl BundleHeader<'_> {
    /// Render the header as a comment block
    ///
    /// Wrapped in an AMPscript block so it is inert in pages and emails;
    /// raw script libraries get the bare comment.
    pub fn render(&self, now: DateTime<Utc>) -> String {
        let mut lines = vec![
            "/*".to_string(),
            format!(" * source:     {}", self.manifest_file),
            format!(" * target:     {}", self.target),
            format!(" * template:   {}", self.template.unwrap_or("n/a")),
            format!(" * author:     {}", self.author),
            format!(" * built:      {}", now.format("%Y-%m-%d %H:%M:%S GMT")),
        ];
        if let Some(url) = self.repository {
            lines.push(format!(" * repository: {url}"));
        }
        lines.push(format!(" * path:       {}", self.unit_path));
        lines.push(" */".to_string());

        let block = lines.join("\n");
        if self.lib_mode == Some(LibMode::Ssjs) {
            format!("{block}\n")
        } else {
            format!("%%[\n{block}\n]%%\n")
        }
    }
}
