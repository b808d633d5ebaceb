//! Unit manifests (`cloudpage.json`, `email.json`, `sfmc-lib.json`)
//!
//! A manifest is read fresh from disk for every invocation, validated as raw
//! JSON (so every problem can be reported at once) and only then turned into
//! the typed [`Manifest`]. It is never written back.

pub mod discovery;
pub mod kind;
pub mod serialization;
pub mod validation;

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, fs as fs_err, manifest as manifest_err};

pub use kind::UnitKind;
pub use serialization::OrderedMap;

/// Search → replacement pairs of one named template
pub type Substitutions = OrderedMap<String>;

/// Typed view of a validated manifest
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub name: String,

    pub author: String,

    /// Primary bundle path, relative to the unit directory
    pub dest: String,

    /// Companion config fragment path; paired with `server.config`
    #[serde(default)]
    pub dest_config: Option<String>,

    #[serde(default)]
    pub server: ServerSection,

    /// Client-facing assets (scripts, styles, markup)
    #[serde(default)]
    pub public: Vec<String>,

    /// Library-only mode; bypasses server/public assembly when it lists files
    #[serde(default)]
    pub lib: Option<LibSection>,

    /// Named substitution sets
    #[serde(default)]
    pub template: OrderedMap<Substitutions>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSection {
    #[serde(default)]
    pub dependencies: Dependencies,

    #[serde(default)]
    pub src: Vec<String>,

    #[serde(default)]
    pub script_attributes: OrderedMap<Value>,

    #[serde(default)]
    pub core_version: Option<String>,

    #[serde(default)]
    pub config: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dependencies {
    #[serde(default)]
    pub ssjs: Vec<String>,

    #[serde(default)]
    pub other: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LibSection {
    #[serde(default)]
    pub ssjs: Vec<String>,

    #[serde(default)]
    pub amp: Vec<String>,
}

impl LibSection {
    pub fn is_empty(&self) -> bool {
        self.ssjs.is_empty() && self.amp.is_empty()
    }
}

impl Manifest {
    /// Build the typed manifest from an already validated JSON document
    pub fn from_value(path: &Path, value: Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| manifest_err::parse_failed(path.display().to_string(), e))
    }

    /// Library section, if it actually lists files
    pub fn library(&self) -> Option<&LibSection> {
        self.lib.as_ref().filter(|lib| !lib.is_empty())
    }

    /// Names of all templates, in declaration order
    pub fn template_names(&self) -> Vec<String> {
        self.template.keys().map(str::to_string).collect()
    }
}

/// Read a manifest file as raw JSON
///
/// The document must be a JSON object; field-level checks are left to
/// [`validation::validate`].
pub fn read_manifest(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| fs_err::read_failed(path.display().to_string(), e))?;
    let value: Value = serde_json::from_str(&content)
        .map_err(|e| manifest_err::parse_failed(path.display().to_string(), e))?;

    if !value.is_object() {
        return Err(manifest_err::parse_failed(
            path.display().to_string(),
            "expected a JSON object",
        ));
    }

    Ok(value)
}
