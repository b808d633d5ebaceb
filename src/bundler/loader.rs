//! Unit loading: resolve, read, filter and wrap every file a manifest lists
//!
//! Files are resolved against `<unit dir>/src/` and concatenated in the order
//! the manifest declares them. A missing file does not stop loading; it is
//! recorded as an issue, contributes an empty string, and the remaining
//! entries are still processed so one pass reports every missing file.

use std::path::{Path, PathBuf};

use crate::error::{UnitIssue, fs as fs_err};
use crate::manifest::{LibSection, Manifest};

use super::filter::CommentFilter;
use super::wrap::{FileType, RenderContext};

/// Which library flavour a unit was bundled as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibMode {
    Ssjs,
    Amp,
}

impl LibMode {
    pub fn as_str(self) -> &'static str {
        match self {
            LibMode::Ssjs => "ssjs",
            LibMode::Amp => "amp",
        }
    }
}

/// What a load pass found, besides content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitStatus {
    pub js_found: bool,
    pub ssjs_found: bool,
    pub lib_mode: Option<LibMode>,
}

/// Result of loading one unit (or one config fragment)
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub content: String,
    pub status: UnitStatus,
    pub issues: Vec<UnitIssue>,
    /// Files that were read, in concatenation order
    pub files: Vec<PathBuf>,
}

impl LoadOutcome {
    fn append(&mut self, section: Section) {
        self.content.push_str(&section.text);
        self.issues.extend(section.issues);
        self.files.extend(section.files);
    }
}

/// Text assembled from one manifest list plus what went wrong reading it
#[derive(Debug, Default)]
struct Section {
    text: String,
    issues: Vec<UnitIssue>,
    files: Vec<PathBuf>,
}

/// Loads the files of one manifest
pub struct UnitLoader<'a> {
    manifest: &'a Manifest,
    src_dir: PathBuf,
    filter: CommentFilter,
}

impl<'a> UnitLoader<'a> {
    pub fn new(manifest: &'a Manifest, unit_dir: &Path, filter: CommentFilter) -> Self {
        Self {
            manifest,
            src_dir: unit_dir.join("src"),
            filter,
        }
    }

    /// Assemble the unit's bundle body
    ///
    /// Library manifests short-circuit into library mode. Everything else is
    /// assembled as: ssjs dependencies, other dependencies, server sources,
    /// public assets.
    pub fn load(&self, ctx: &mut RenderContext<'_>) -> LoadOutcome {
        if let Some(lib) = self.manifest.library() {
            return self.load_library(lib);
        }

        let mut outcome = LoadOutcome::default();
        let server = &self.manifest.server;

        if !server.dependencies.ssjs.is_empty() {
            let mut section = self.concat(
                "server.dependencies.ssjs",
                &server.dependencies.ssjs,
                "\n\n",
                |name, content| format!("{}{content}", FileType::Ssjs.banner(name)),
            );
            section.text = ctx.wrap(FileType::Ssjs, &section.text);
            outcome.append(section);
        }

        if !server.dependencies.other.is_empty() {
            let mut section = self.concat(
                "server.dependencies.other",
                &server.dependencies.other,
                "\n",
                |name, content| format!("{}{content}", FileType::Html.banner(name)),
            );
            section.text = ctx.wrap(FileType::Other, &section.text);
            outcome.append(section);
        }

        if !server.src.is_empty() {
            outcome.status.ssjs_found |= contains_type(&server.src, FileType::Ssjs);
            outcome.append(self.concat_wrapped("server.src", &server.src, ctx));
        }

        if !self.manifest.public.is_empty() {
            outcome.status.js_found |= contains_type(&self.manifest.public, FileType::Js);
            outcome.status.ssjs_found |= contains_type(&self.manifest.public, FileType::Ssjs);
            outcome.append(self.concat_wrapped("public", &self.manifest.public, ctx));
        }

        outcome
    }

    /// Render the separate `server.config` fragment
    pub fn load_fragment(&self, name: &str, ctx: &mut RenderContext<'_>) -> LoadOutcome {
        let mut outcome = LoadOutcome::default();
        outcome.append(self.concat_wrapped("server.config", &[name.to_string()], ctx));
        outcome
    }

    fn load_library(&self, lib: &LibSection) -> LoadOutcome {
        let (key, files, mode, file_type) = if lib.ssjs.is_empty() {
            ("lib.amp", &lib.amp, LibMode::Amp, FileType::Amp)
        } else {
            ("lib.ssjs", &lib.ssjs, LibMode::Ssjs, FileType::Ssjs)
        };

        let mut outcome = LoadOutcome {
            status: UnitStatus {
                js_found: false,
                ssjs_found: mode == LibMode::Ssjs,
                lib_mode: Some(mode),
            },
            ..LoadOutcome::default()
        };
        outcome.append(self.concat(key, files, "\n\n", |name, content| {
            format!("{}{content}", file_type.banner(name))
        }));
        outcome
    }

    /// Each entry wrapped on its own, preceded by a markup banner
    fn concat_wrapped(
        &self,
        list: &str,
        names: &[String],
        ctx: &mut RenderContext<'_>,
    ) -> Section {
        self.concat(list, names, "\n", |name, content| {
            let wrapped = ctx.wrap(FileType::from_name(name), content);
            format!("{}{wrapped}", FileType::Html.banner(name))
        })
    }

    fn concat<F>(&self, list: &str, names: &[String], separator: &str, mut render: F) -> Section
    where
        F: FnMut(&str, &str) -> String,
    {
        let mut section = Section::default();
        let mut parts = Vec::with_capacity(names.len());

        for name in names {
            match self.read_filtered(list, name) {
                Ok((path, content)) => {
                    parts.push(render(name, &content));
                    section.files.push(path);
                }
                Err(issue) => {
                    section.issues.push(issue);
                    parts.push(String::new());
                }
            }
        }

        section.text = parts.join(separator);
        section
    }

    fn read_filtered(&self, list: &str, name: &str) -> Result<(PathBuf, String), UnitIssue> {
        let path = self.src_dir.join(name);
        if !path.is_file() {
            return Err(UnitIssue::missing_file(list, name));
        }

        let raw = std::fs::read_to_string(&path).map_err(|e| {
            UnitIssue::Unreadable(fs_err::read_failed(path.display().to_string(), e))
        })?;
        let content = self.filter.filter(raw.trim());
        Ok((path, content))
    }
}

fn contains_type(names: &[String], file_type: FileType) -> bool {
    names.iter().any(|n| FileType::from_name(n) == file_type)
}
