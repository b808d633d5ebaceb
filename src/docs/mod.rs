//! Documentation side channel
//!
//! After a unit is written its script sources are documented next to the
//! manifest: `docs-js.md` for client scripts and `docs-ssjs.md` for server
//! scripts. A doc file whose source type is no longer used is removed.

pub mod config;
pub mod renderer;

use std::path::{Path, PathBuf};

use crate::bundler::loader::UnitStatus;
use crate::bundler::writer;
use crate::error::UnitIssue;

pub use config::{DEFAULT_DOCS_CONFIG, DocsConfig};
pub use renderer::{DocRenderer, JsDocRenderer};

/// A documentation file and the sources it is generated from
struct DocTarget {
    pattern: &'static str,
    file_name: &'static str,
}

const JS_DOCS: DocTarget = DocTarget {
    pattern: "src/**/*.js",
    file_name: "docs-js.md",
};

const SSJS_DOCS: DocTarget = DocTarget {
    pattern: "src/**/*.ssjs",
    file_name: "docs-ssjs.md",
};

/// What a docs refresh changed on disk
#[derive(Debug, Default)]
pub struct DocsOutcome {
    pub written: Vec<PathBuf>,
    pub removed: Vec<PathBuf>,
    pub issues: Vec<UnitIssue>,
}

/// Regenerate or remove the doc files of one unit
pub fn refresh_docs(
    unit_dir: &Path,
    status: &UnitStatus,
    renderer: &dyn DocRenderer,
) -> DocsOutcome {
    let mut outcome = DocsOutcome::default();
    refresh_target(unit_dir, &JS_DOCS, status.js_found, renderer, &mut outcome);
    refresh_target(unit_dir, &SSJS_DOCS, status.ssjs_found, renderer, &mut outcome);
    outcome
}

fn refresh_target(
    unit_dir: &Path,
    target: &DocTarget,
    found: bool,
    renderer: &dyn DocRenderer,
    outcome: &mut DocsOutcome,
) {
    let doc_path = unit_dir.join(target.file_name);

    let rendered = if found {
        match renderer.render(unit_dir, target.pattern) {
            Ok(markdown) => Some(markdown),
            Err(e) => {
                outcome.issues.push(UnitIssue::DocsNotRendered { pattern: e.pattern });
                None
            }
        }
    } else {
        None
    };

    match rendered {
        Some(markdown) => match writer::write_artifact(&doc_path, &markdown) {
            Ok(()) => outcome.written.push(doc_path),
            Err(e) => outcome.issues.push(UnitIssue::Write(e)),
        },
        None if doc_path.is_file() => match std::fs::remove_file(&doc_path) {
            Ok(()) => outcome.removed.push(doc_path),
            Err(e) => outcome.issues.push(UnitIssue::Write(
                crate::error::fs::write_failed(doc_path.display().to_string(), e),
            )),
        },
        None => {}
    }
}
