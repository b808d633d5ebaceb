//! Documentation renderer configuration (`docs-conf.json`)

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, fs as fs_err, manifest as manifest_err};

/// Default configuration file name, relative to the project root
pub const DEFAULT_DOCS_CONFIG: &str = "docs-conf.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct DocsConfig {
    /// Markdown heading level of the top-level headings
    pub heading_depth: usize,

    /// Include symbols tagged `@private`
    pub private: bool,

    /// Emit one heading per source file
    pub file_headings: bool,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            heading_depth: 2,
            private: false,
            file_headings: true,
        }
    }
}

impl DocsConfig {
    /// Load the configuration; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let display = path.display().to_string();
        let content =
            std::fs::read_to_string(path).map_err(|e| fs_err::read_failed(&display, e))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| manifest_err::docs_config_failed(&display, e))?;

        if !(1..=6).contains(&config.heading_depth) {
            return Err(manifest_err::docs_config_failed(
                &display,
                format!("headingDepth must be between 1 and 6, got {}", config.heading_depth),
            ));
        }

        Ok(config)
    }
}
