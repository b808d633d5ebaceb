//! Manifest validation
//!
//! Every rule is evaluated so the user sees all problems of a manifest in one
//! run. A manifest with any error is skipped entirely.

use serde_json::Value;

/// Outcome of validating one manifest
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Validation {
    pub errors: Vec<String>,
}

impl Validation {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

fn non_empty_string(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_some_and(|s| !s.trim().is_empty())
}

fn non_empty_list(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_array)
        .is_some_and(|items| !items.is_empty())
}

/// Validate a raw manifest document
pub fn validate(manifest: &Value) -> Validation {
    let mut errors = Vec::new();

    if !non_empty_string(manifest.get("name")) {
        errors.push("\"name\" is required".to_string());
    }

    if !non_empty_string(manifest.get("author")) {
        errors.push("\"author\" is required".to_string());
    }

    let server = manifest.get("server");
    if !server.is_some_and(Value::is_object) {
        errors.push("\"server\" must be an object".to_string());
    }

    let has_content = non_empty_list(manifest.get("public"))
        || non_empty_list(manifest.pointer("/server/src"))
        || non_empty_list(manifest.pointer("/lib/ssjs"))
        || non_empty_list(manifest.pointer("/lib/amp"));
    if !has_content {
        errors.push(
            "at least one of \"public\", \"server.src\", \"lib.ssjs\" or \"lib.amp\" must list files"
                .to_string(),
        );
    }

    if non_empty_list(manifest.pointer("/server/dependencies/ssjs"))
        && !non_empty_string(manifest.pointer("/server/coreVersion"))
    {
        errors.push(
            "\"server.coreVersion\" is required when \"server.dependencies.ssjs\" lists files"
                .to_string(),
        );
    }

    if !non_empty_string(manifest.get("dest")) {
        errors.push("\"dest\" is required".to_string());
    }

    Validation { errors }
}
